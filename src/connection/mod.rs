//! Connection handling for the VNDB API
//!
//! # Architecture
//!
//! The module is organized by concern, with each submodule having a single
//! responsibility:
//!
//! | Module      | Responsibility                                      |
//! |-------------|-----------------------------------------------------|
//! | `transport` | TCP/TLS connect, frame send, read-until-terminator  |
//! | `session`   | Login handshake and command/response exchange       |
//! | `pool`      | Fixed set of sessions with scoped checkout          |
//!
//! A [`Session`] runs one exchange at a time. Exclusive use is enforced by
//! the pool, not by locks inside the session: [`SessionPool::acquire`]
//! hands out a [`PooledSession`] guard owning the session, and dropping
//! the guard returns it whatever happened in between.

mod pool;
mod session;
mod transport;

pub use pool::{PooledSession, SessionPool};
pub use session::{ServerReply, Session};
