//! Result models
//!
//! Deserialization targets for the JSON payloads the server sends back.
//! Which fields a row carries depends on the flags of the query, so
//! everything beyond the id is optional or defaulted; a model never fails
//! to decode just because a flag was not requested.

mod character;
mod lists;
mod producer;
mod release;
mod staff;
mod stats;
mod user;
mod vn;

pub use character::{Character, CharacterVn, VoiceActorRef};
pub use lists::{
    VnListItem, VnListUpdate, VoteListItem, VoteUpdate, WishlistItem, WishlistUpdate,
};
pub use producer::{Producer, ProducerLinks, ProducerRelation};
pub use release::{Medium, Release, ReleaseProducer, ReleaseVn};
pub use staff::{Staff, StaffAlias, StaffLinks, StaffVnCredit, StaffVoiceCredit};
pub use stats::DatabaseStats;
pub use user::User;
pub use vn::{AnimeRef, Screenshot, StaffCredit, TagScore, VisualNovel, VnLinks, VnRelation};

use serde::{Deserialize, Deserializer};

/// Paginated wrapper around every `results` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultSet<T> {
    /// Number of rows in this page.
    pub num: u32,
    /// True when further pages match the filter.
    #[serde(default)]
    pub more: bool,
    /// The rows themselves.
    pub items: Vec<T>,
}

/// Deserialize a wire field holding values joined into one string by
/// newlines or commas, as the alias fields are.
pub(crate) fn joined_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|joined| {
            joined
                .split(['\n', ','])
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}
