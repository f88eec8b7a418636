//! VNDB Wire Protocol
//!
//! Single responsibility: encode and decode messages in the API's
//! sentinel-framed text format. No knowledge of sockets or sessions.
//!
//! # Wire Format
//!
//! Every message in either direction is UTF-8 text terminated by a single
//! `0x04` byte:
//!
//! ```text
//! login {"protocol":1,"client":"vndb-client","clientver":"0.1.0"}<0x04>
//! ok<0x04>
//!
//! get vn basic,details (id = 17) {"results":10}<0x04>
//! results {"num":1,"more":false,"items":[...]}<0x04>
//!
//! set vnlist 17 {"status":2}<0x04>
//! error {"id":"needlogin","msg":"..."}<0x04>
//! ```
//!
//! Responses start with a verb; everything after the first space is the
//! JSON payload. The protocol has no escaping, so the terminator byte can
//! never appear inside a message. The server speaks UTF-8 JSON and never
//! produces it; commands built by this crate never contain it either.

use serde::Serialize;
use tracing::error;

use crate::config::ClientConfig;
use crate::error::{ServerError, VndbError};

/// Frame terminator byte.
pub const EOT: u8 = 0x04;

/// Protocol revision announced in the login command.
pub const PROTOCOL_VERSION: u8 = 1;

/// Response verb announcing a query result payload.
pub const VERB_RESULTS: &str = "results";
/// Response verb announcing a database statistics payload.
pub const VERB_DBSTATS: &str = "dbstats";
/// Response verb announcing a structured error payload.
pub const VERB_ERROR: &str = "error";
/// Bare acknowledgement response.
pub const VERB_OK: &str = "ok";

/// Frame a command for the wire: its UTF-8 bytes plus the terminator.
pub fn encode_command(command: &str) -> Vec<u8> {
    let mut frame = Vec::with_capacity(command.len() + 1);
    frame.extend_from_slice(command.as_bytes());
    frame.push(EOT);
    frame
}

/// Decode a received frame into text, stripping one trailing terminator.
///
/// A frame cut short by a closed connection has no terminator; whatever
/// arrived is decoded as-is and left for the caller to judge.
pub fn decode_frame(frame: &[u8]) -> String {
    let body = match frame.last() {
        Some(&EOT) => &frame[..frame.len() - 1],
        _ => frame,
    };
    String::from_utf8_lossy(body).into_owned()
}

/// Split a response into its verb and payload.
///
/// The verb is everything before the first space, the payload everything
/// after it. A response without a space is all verb and empty payload.
pub fn split_response(response: &str) -> (&str, &str) {
    match response.split_once(' ') {
        Some((verb, payload)) => (verb, payload),
        None => (response, ""),
    }
}

/// Body of the `login` command.
///
/// Credentials are only present when the configuration carries them; the
/// anonymous form logs in without `username`/`password` keys.
#[derive(Debug, Serialize)]
pub struct Login<'a> {
    pub protocol: u8,
    pub client: &'a str,
    pub clientver: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}

impl<'a> Login<'a> {
    /// Build the login body from the client configuration.
    pub fn from_config(config: &'a ClientConfig) -> Self {
        Self {
            protocol: PROTOCOL_VERSION,
            client: &config.client_name,
            clientver: &config.client_version,
            username: config.credentials.as_ref().map(|c| c.username.as_str()),
            password: config.credentials.as_ref().map(|c| c.password.as_str()),
        }
    }

    /// Render the full login command.
    pub fn to_command(&self) -> Result<String, VndbError> {
        Ok(format!("login {}", serde_json::to_string(self)?))
    }
}

/// Classify an `error` payload into the structured error set.
///
/// The discriminator is the `id` field, located and matched without regard
/// to case. An id outside the documented set becomes [`ServerError::Unknown`].
/// A payload that is not a JSON object, or carries no string `id` at all,
/// is a protocol violation rather than a server error.
///
/// Kind-specific fields (`field`, `minwait`, ...) are read leniently; a
/// server that omits one yields an empty or zero value instead of a failure.
pub fn classify(request: &str, payload: &str) -> Result<ServerError, VndbError> {
    let violation = || {
        error!(request = %request, payload = %payload, "Error payload outside the protocol shapes");
        VndbError::UnexpectedResponse {
            request: request.to_string(),
            response: format!("{} {}", VERB_ERROR, payload),
        }
    };

    let value: serde_json::Value = serde_json::from_str(payload).map_err(|_| violation())?;
    let map = value.as_object().ok_or_else(violation)?;

    let id = map
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("id"))
        .and_then(|(_, value)| value.as_str())
        .ok_or_else(violation)?;

    let msg = field_str(map, "msg");

    Ok(match id.to_ascii_lowercase().as_str() {
        "parse" => ServerError::Parse { msg },
        "missing" => ServerError::Missing {
            msg,
            field: field_str(map, "field"),
        },
        "badarg" => ServerError::BadArgument {
            msg,
            field: field_str(map, "field"),
        },
        "needlogin" => ServerError::LoginRequired { msg },
        "throttled" => ServerError::Throttled {
            msg,
            kind: field_str(map, "type"),
            min_wait: field_f64(map, "minwait"),
            full_wait: field_f64(map, "fullwait"),
        },
        "auth" => ServerError::BadAuthentication { msg },
        "loggedin" => ServerError::AlreadyLoggedIn { msg },
        "gettype" => ServerError::GetType { msg },
        "getinfo" => ServerError::GetInfo {
            msg,
            flag: field_str(map, "flag"),
        },
        "filter" => ServerError::InvalidFilter {
            msg,
            field: field_str(map, "field"),
            op: field_str(map, "op"),
            value: map.get("value").cloned().unwrap_or(serde_json::Value::Null),
        },
        "settype" => ServerError::SetType { msg },
        other => ServerError::Unknown {
            id: other.to_string(),
            msg,
        },
    })
}

fn field_str(map: &serde_json::Map<String, serde_json::Value>, key: &str) -> String {
    map.get(key)
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string()
}

fn field_f64(map: &serde_json::Map<String, serde_json::Value>, key: &str) -> f64 {
    map.get(key).and_then(|value| value.as_f64()).unwrap_or_default()
}
