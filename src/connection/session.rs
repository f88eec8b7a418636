//! API Session
//!
//! Single responsibility: one logged-in connection to the API, able to run
//! one command/response exchange at a time.
//!
//! # Lifecycle
//!
//! A `Session` starts disconnected and costs nothing to construct. The
//! first [`Session::ensure_logged_in`] connects and runs the login
//! handshake; after that it is a no-op until the connection is torn down.
//! Connecting and authenticating are transient states inside
//! `ensure_logged_in`; an observable session is either disconnected or
//! ready. A held transport has always completed login, so "logged in" is
//! something the session has or doesn't have, not a flag to poll.
//!
//! Transport faults and protocol violations tear the session down. It does
//! not reconnect on its own; the next `ensure_logged_in` repairs it.

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::transport::Transport;
use crate::config::ClientConfig;
use crate::error::{Reply, ServerError, VndbError};
use crate::protocol::{self, Login, VERB_DBSTATS, VERB_ERROR, VERB_OK, VERB_RESULTS};

/// Stand-in for the login command in errors and logs. The real command
/// carries credentials and must never leave the socket.
const LOGIN_REQUEST: &str = "login";

/// A decoded response in one of the shapes the server is allowed to send.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerReply {
    /// `results {json}` answering a query.
    Results(String),
    /// `dbstats {json}` answering a statistics request.
    DbStats(String),
    /// Bare `ok` acknowledging a login or mutation.
    Ack,
    /// `error {json}` rejecting the request.
    Rejected(ServerError),
}

/// One connection to the API and its login state.
#[derive(Debug)]
pub struct Session {
    config: Arc<ClientConfig>,
    /// Live, logged-in connection. `None` means disconnected.
    transport: Option<Transport>,
}

impl Session {
    /// Create a disconnected session. No I/O happens here.
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// True when the session holds a connection that completed login.
    pub fn is_ready(&self) -> bool {
        self.transport.is_some()
    }

    /// Connect and log in unless already done.
    ///
    /// A `Rejected` reply means the server refused the login (bad
    /// credentials, throttling); the session stays disconnected and the
    /// rejection travels back as data. The login command itself never
    /// appears in errors or logs because it carries credentials.
    pub async fn ensure_logged_in(&mut self) -> Result<Reply<()>, VndbError> {
        if self.is_ready() {
            return Ok(Reply::Data(()));
        }

        let mut transport = Transport::connect(&self.config).await?;
        debug!(
            host = %self.config.host,
            client = %self.config.client_name,
            anonymous = self.config.credentials.is_none(),
            "Logging in"
        );

        let command = Login::from_config(&self.config).to_command()?;
        let response = round_trip(&mut transport, &command, &self.config).await?;

        if response == VERB_OK {
            debug!(host = %self.config.host, "Login accepted");
            self.transport = Some(transport);
            return Ok(Reply::Data(()));
        }

        if response.is_empty() {
            error!(request = LOGIN_REQUEST, "Empty login response");
            return Err(VndbError::UnexpectedResponse {
                request: LOGIN_REQUEST.to_string(),
                response,
            });
        }

        let (verb, payload) = protocol::split_response(&response);
        if verb == VERB_ERROR && !payload.is_empty() {
            let rejection = protocol::classify(LOGIN_REQUEST, payload)?;
            warn!(error = %rejection, "Login rejected");
            return Ok(Reply::Rejected(rejection));
        }

        error!(
            request = LOGIN_REQUEST,
            response = %response,
            "Login response outside the protocol shapes"
        );
        Err(VndbError::UnexpectedResponse {
            request: LOGIN_REQUEST.to_string(),
            response,
        })
    }

    /// Run one command/response exchange on a logged-in session.
    ///
    /// Transport faults and responses outside the protocol shapes tear the
    /// session down before the error propagates, so the next
    /// `ensure_logged_in` starts over with a fresh connection. A `Rejected`
    /// reply is a complete, healthy exchange and leaves the session ready.
    pub async fn exchange(&mut self, command: &str) -> Result<ServerReply, VndbError> {
        match self.try_exchange(command).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                self.disconnect();
                Err(e)
            }
        }
    }

    /// Run one exchange and hand back the response text undecoded.
    ///
    /// Transport faults still tear the session down; the response shape is
    /// not checked.
    pub async fn exchange_raw(&mut self, command: &str) -> Result<String, VndbError> {
        match self.try_exchange_raw(command).await {
            Ok(response) => Ok(response),
            Err(e) => {
                self.disconnect();
                Err(e)
            }
        }
    }

    /// Drop the connection and the login that came with it.
    pub fn disconnect(&mut self) {
        if self.transport.take().is_some() {
            warn!(host = %self.config.host, "Session torn down");
        }
    }

    async fn try_exchange_raw(&mut self, command: &str) -> Result<String, VndbError> {
        let transport = self.transport.as_mut().ok_or(VndbError::NotConnected)?;
        debug!(command = %command, "Sending command");
        round_trip(transport, command, &self.config).await
    }

    async fn try_exchange(&mut self, command: &str) -> Result<ServerReply, VndbError> {
        let response = self.try_exchange_raw(command).await?;

        if response == VERB_OK {
            return Ok(ServerReply::Ack);
        }

        match protocol::split_response(&response) {
            (VERB_RESULTS, payload) if !payload.is_empty() => {
                Ok(ServerReply::Results(payload.to_string()))
            }
            (VERB_DBSTATS, payload) if !payload.is_empty() => {
                Ok(ServerReply::DbStats(payload.to_string()))
            }
            (VERB_ERROR, payload) if !payload.is_empty() => {
                Ok(ServerReply::Rejected(protocol::classify(command, payload)?))
            }
            _ => {
                error!(
                    request = %command,
                    response = %response,
                    "Response outside the protocol shapes"
                );
                Err(VndbError::UnexpectedResponse {
                    request: command.to_string(),
                    response,
                })
            }
        }
    }
}

/// One framed round trip on an established transport.
async fn round_trip(
    transport: &mut Transport,
    command: &str,
    config: &ClientConfig,
) -> Result<String, VndbError> {
    transport.send(&protocol::encode_command(command)).await?;
    let frame = transport.read_frame(config.receive_buffer_size).await?;
    Ok(protocol::decode_frame(&frame))
}
