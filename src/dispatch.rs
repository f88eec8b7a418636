//! Request Dispatch
//!
//! Single responsibility: run a built command through a pooled session and
//! decode what comes back.
//!
//! Every dispatch follows the same cycle: acquire a session, make sure it
//! is logged in, exchange, decode. The session returns to the pool when
//! the guard drops, which happens on every path out of these functions,
//! success, rejection, and fault alike.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::error;

use crate::connection::{ServerReply, SessionPool};
use crate::error::{Reply, VndbError};
use crate::protocol::{VERB_DBSTATS, VERB_OK, VERB_RESULTS};

/// Runs commands against the pool.
#[derive(Clone)]
pub struct Dispatcher {
    pool: Arc<SessionPool>,
}

impl Dispatcher {
    pub fn new(pool: Arc<SessionPool>) -> Self {
        Self { pool }
    }

    /// Run a query command and decode its `results`/`dbstats` payload.
    ///
    /// A bare `ok` is not a legal answer to a query and fails as a
    /// protocol violation.
    pub async fn execute_get<T>(&self, command: String) -> Result<Reply<T>, VndbError>
    where
        T: DeserializeOwned,
    {
        let mut session = self.pool.acquire().await?;
        if let Reply::Rejected(rejection) = session.ensure_logged_in().await? {
            return Ok(Reply::Rejected(rejection));
        }

        match session.exchange(&command).await? {
            ServerReply::Results(payload) | ServerReply::DbStats(payload) => {
                match serde_json::from_str(&payload) {
                    Ok(data) => Ok(Reply::Data(data)),
                    Err(source) => {
                        error!(request = %command, error = %source, "Undecodable result payload");
                        Err(VndbError::MalformedPayload {
                            request: command,
                            payload,
                            source,
                        })
                    }
                }
            }
            ServerReply::Rejected(rejection) => Ok(Reply::Rejected(rejection)),
            ServerReply::Ack => {
                error!(request = %command, response = VERB_OK, "Acknowledgement answering a query");
                Err(VndbError::UnexpectedResponse {
                    request: command,
                    response: VERB_OK.to_string(),
                })
            }
        }
    }

    /// Run a mutation command and expect a bare acknowledgement.
    ///
    /// A `results`/`dbstats` payload is not a legal answer to a mutation
    /// and fails as a protocol violation.
    pub async fn execute_set(&self, command: String) -> Result<Reply<()>, VndbError> {
        let mut session = self.pool.acquire().await?;
        if let Reply::Rejected(rejection) = session.ensure_logged_in().await? {
            return Ok(Reply::Rejected(rejection));
        }

        match session.exchange(&command).await? {
            ServerReply::Ack => Ok(Reply::Data(())),
            ServerReply::Rejected(rejection) => Ok(Reply::Rejected(rejection)),
            ServerReply::Results(payload) => {
                let response = format!("{} {}", VERB_RESULTS, payload);
                error!(
                    request = %command,
                    response = %response,
                    "Result payload answering a mutation"
                );
                Err(VndbError::UnexpectedResponse {
                    request: command,
                    response,
                })
            }
            ServerReply::DbStats(payload) => {
                let response = format!("{} {}", VERB_DBSTATS, payload);
                error!(
                    request = %command,
                    response = %response,
                    "Result payload answering a mutation"
                );
                Err(VndbError::UnexpectedResponse {
                    request: command,
                    response,
                })
            }
        }
    }

    /// Send a command verbatim and return the raw response text.
    ///
    /// Login still runs first; only its rejection is interpreted. The
    /// response comes back undecoded, error responses included.
    pub async fn execute_raw(&self, command: String) -> Result<Reply<String>, VndbError> {
        let mut session = self.pool.acquire().await?;
        if let Reply::Rejected(rejection) = session.ensure_logged_in().await? {
            return Ok(Reply::Rejected(rejection));
        }

        let response = session.exchange_raw(&command).await?;
        Ok(Reply::Data(response))
    }
}
