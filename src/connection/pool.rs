//! Session Pool
//!
//! Single responsibility: hold a fixed set of sessions and hand each out
//! to one caller at a time.
//!
//! The pool owns `pool_size` sessions for its whole life; no more are ever
//! created. [`SessionPool::acquire`] waits until one is free and returns a
//! [`PooledSession`] guard with exclusive use of it. Dropping the guard
//! puts the session back in whatever state it is in; a session torn down
//! mid-request is repaired by the next caller's `ensure_logged_in`, not
//! discarded. The free set lives in a channel, which is the only shared
//! mutable structure in the pool.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use super::session::Session;
use crate::config::ClientConfig;
use crate::error::VndbError;

/// A fixed-capacity pool of API sessions.
pub struct SessionPool {
    /// Free sessions. Channel capacity equals the total session count, so
    /// returning a session can never find the channel full.
    slots_tx: mpsc::Sender<Session>,
    slots_rx: Mutex<mpsc::Receiver<Session>>,
    capacity: usize,
}

impl SessionPool {
    /// Create a pool of `config.pool_size` disconnected sessions.
    ///
    /// Sessions log in lazily on first use, so construction does no I/O
    /// and cannot fail.
    pub fn new(config: ClientConfig) -> Arc<Self> {
        let capacity = config.pool_size.max(1);
        let config = Arc::new(config);
        let (slots_tx, slots_rx) = mpsc::channel(capacity);
        for _ in 0..capacity {
            // the channel was sized for exactly this many
            let _ = slots_tx.try_send(Session::new(Arc::clone(&config)));
        }

        info!(capacity = capacity, host = %config.host, "Session pool ready");
        Arc::new(Self {
            slots_tx,
            slots_rx: Mutex::new(slots_rx),
            capacity,
        })
    }

    /// Total number of sessions this pool owns.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Wait for a free session.
    ///
    /// Callers that stop waiting (by dropping the future, for example
    /// under `tokio::time::timeout`) consume nothing. Fails only when the
    /// pool has been closed.
    pub async fn acquire(&self) -> Result<PooledSession, VndbError> {
        let session = {
            let mut slots = self.slots_rx.lock().await;
            slots.recv().await
        };

        match session {
            Some(session) => Ok(PooledSession {
                session: Some(session),
                slots: self.slots_tx.clone(),
            }),
            None => Err(VndbError::PoolClosed),
        }
    }

    /// Close the pool and drop its free sessions.
    ///
    /// Later `acquire` calls fail with [`VndbError::PoolClosed`]. Sessions
    /// checked out at this moment are dropped when their guards drop
    /// instead of coming back. A caller already waiting in `acquire` is
    /// served by the next returned session before the close takes effect.
    pub async fn close(&self) {
        let mut slots = self.slots_rx.lock().await;
        slots.close();
        while slots.try_recv().is_ok() {}
        info!("Session pool closed");
    }
}

/// Exclusive use of one pooled session, returned to the pool on drop.
///
/// Dereferences to [`Session`], so exchanges run directly on the guard.
#[derive(Debug)]
pub struct PooledSession {
    session: Option<Session>,
    slots: mpsc::Sender<Session>,
}

impl Deref for PooledSession {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session.as_ref().expect("session held until drop")
    }
}

impl DerefMut for PooledSession {
    fn deref_mut(&mut self) -> &mut Session {
        self.session.as_mut().expect("session held until drop")
    }
}

impl Drop for PooledSession {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            // fails only after close(); the session is dropped instead
            if self.slots.try_send(session).is_err() {
                debug!("Pool closed, dropping session instead of returning it");
            }
        }
    }
}
