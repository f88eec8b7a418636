//! Request construction
//!
//! Turns typed query and mutation descriptions into the exact command text
//! the server expects:
//!
//! ```text
//! get <entity> <flags> (<filter>) [<json options>]
//! set <entity> <id> [<json body>]
//! ```
//!
//! | Module    | Responsibility                             |
//! |-----------|--------------------------------------------|
//! | `flags`   | Flag tokens and per-entity validity tables |
//! | `filter`  | Rendered filter expressions                |
//! | `options` | Paging and ordering JSON                   |

mod filter;
mod flags;
mod options;

pub use filter::Filter;
pub use flags::{allowed_flags, join_flags, VndbFlag};
pub use options::RequestOptions;

use serde::Serialize;

use crate::error::VndbError;

/// Entity types a query can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GetVerb {
    VisualNovel,
    Release,
    Producer,
    Character,
    Staff,
    User,
    VoteList,
    VnList,
    Wishlist,
}

impl GetVerb {
    /// Token used on the wire after `get`.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::VisualNovel => "vn",
            Self::Release => "release",
            Self::Producer => "producer",
            Self::Character => "character",
            Self::Staff => "staff",
            Self::User => "user",
            Self::VoteList => "votelist",
            Self::VnList => "vnlist",
            Self::Wishlist => "wishlist",
        }
    }
}

/// Entity types a mutation can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetVerb {
    VoteList,
    VnList,
    Wishlist,
}

impl SetVerb {
    /// Token used on the wire after `set`.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::VoteList => "votelist",
            Self::VnList => "vnlist",
            Self::Wishlist => "wishlist",
        }
    }
}

/// Render a query command.
///
/// Flags are validated against the entity's table first; an empty flag
/// list asks for `basic`. Options are appended as JSON only when given.
pub fn build_get_command(
    verb: GetVerb,
    flags: &[VndbFlag],
    filter: &Filter,
    options: Option<&RequestOptions>,
) -> Result<String, VndbError> {
    if let Some(bad) = flags.iter().find(|flag| !flag.valid_for(verb)) {
        return Err(VndbError::InvalidFlags {
            verb: verb.wire_name().to_string(),
            flag: bad.wire_name().to_string(),
        });
    }

    let mut command = format!("get {} {} ({})", verb.wire_name(), join_flags(flags), filter);
    if let Some(options) = options {
        command.push(' ');
        command.push_str(&serde_json::to_string(options)?);
    }
    Ok(command)
}

/// Render a mutation command.
///
/// A missing body, or one serializing to JSON `null`, leaves the command
/// bare, which the server reads as a removal for list entries.
pub fn build_set_command<B>(verb: SetVerb, id: u32, body: Option<&B>) -> Result<String, VndbError>
where
    B: Serialize,
{
    let mut command = format!("set {} {}", verb.wire_name(), id);
    if let Some(body) = body {
        let json = serde_json::to_string(body)?;
        if json != "null" {
            command.push(' ');
            command.push_str(&json);
        }
    }
    Ok(command)
}
