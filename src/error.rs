//! Error types for vndb-client
//!
//! Failures come in two kinds and never mix:
//!
//! - [`VndbError`] is fatal: transport faults, responses outside the wire
//!   protocol, misuse of the client. These travel as the `Err` arm of a
//!   `Result`.
//! - [`ServerError`] is data: the server understood the request and rejected
//!   it with a structured `error` response. These travel inside
//!   [`Reply::Rejected`] on the `Ok` arm, so a caller cannot confuse "the
//!   server said no" with "the conversation broke".

use thiserror::Error;

/// Fatal client-side failures.
///
/// Protocol violations carry the request and response text so the broken
/// conversation can be reconstructed from the error alone.
#[derive(Error, Debug)]
pub enum VndbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TLS server name: {0}")]
    InvalidServerName(String),

    #[error("Session is not logged in")]
    NotConnected,

    #[error("Unexpected response to {request:?}: {response:?}")]
    UnexpectedResponse { request: String, response: String },

    #[error("Undecodable payload answering {request:?}: {source}")]
    MalformedPayload {
        request: String,
        payload: String,
        source: serde_json::Error,
    },

    #[error("Session pool is closed")]
    PoolClosed,

    #[error("Flag {flag:?} is not valid for get {verb}")]
    InvalidFlags { verb: String, flag: String },
}

/// A structured rejection decoded from an `error` response.
///
/// The variant is selected by the `id` field of the error payload. Ids this
/// client does not know about land in [`ServerError::Unknown`] instead of
/// failing, so newer server revisions stay usable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServerError {
    /// `parse`: the server could not parse the command.
    #[error("Syntax error: {msg}")]
    Parse { msg: String },

    /// `missing`: a required field was absent.
    #[error("Missing field {field:?}: {msg}")]
    Missing { msg: String, field: String },

    /// `badarg`: a field carried an invalid value.
    #[error("Bad argument {field:?}: {msg}")]
    BadArgument { msg: String, field: String },

    /// `needlogin`: the command needs an authenticated session.
    #[error("Login required: {msg}")]
    LoginRequired { msg: String },

    /// `throttled`: too many commands. `min_wait` and `full_wait` are in
    /// seconds; the server serves this session again after `min_wait`.
    #[error("Throttled ({kind}): retry after {min_wait}s")]
    Throttled {
        msg: String,
        kind: String,
        min_wait: f64,
        full_wait: f64,
    },

    /// `auth`: the login credentials were wrong.
    #[error("Bad credentials: {msg}")]
    BadAuthentication { msg: String },

    /// `loggedin`: this connection already completed a login.
    #[error("Already logged in: {msg}")]
    AlreadyLoggedIn { msg: String },

    /// `gettype`: unknown entity type in a get command.
    #[error("Unknown get type: {msg}")]
    GetType { msg: String },

    /// `getinfo`: unknown flag in a get command.
    #[error("Unknown get flag {flag:?}: {msg}")]
    GetInfo { msg: String, flag: String },

    /// `filter`: the filter expression does not apply. `value` is whatever
    /// JSON the offending comparison carried.
    #[error("Invalid filter on {field:?} {op}: {msg}")]
    InvalidFilter {
        msg: String,
        field: String,
        op: String,
        value: serde_json::Value,
    },

    /// `settype`: unknown entity type in a set command.
    #[error("Unknown set type: {msg}")]
    SetType { msg: String },

    /// Any discriminator outside the documented set.
    #[error("Unrecognized error id {id:?}: {msg}")]
    Unknown { id: String, msg: String },
}

/// Outcome of a request that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// The server accepted the request and this is the decoded payload.
    Data(T),
    /// The server rejected the request.
    Rejected(ServerError),
}

impl<T> Reply<T> {
    /// True for [`Reply::Data`].
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// True for [`Reply::Rejected`].
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The payload, discarding a rejection.
    pub fn data(self) -> Option<T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Rejected(_) => None,
        }
    }

    /// The rejection, discarding a payload.
    pub fn rejected(self) -> Option<ServerError> {
        match self {
            Self::Rejected(error) => Some(error),
            Self::Data(_) => None,
        }
    }

    /// Treat a rejection as a plain error.
    pub fn into_result(self) -> Result<T, ServerError> {
        match self {
            Self::Data(data) => Ok(data),
            Self::Rejected(error) => Err(error),
        }
    }
}
