//! User list rows and mutation bodies
//!
//! The three per-user lists share a shape: rows come back from list
//! queries, and the `*Update` structs serialize into `set` bodies. Absent
//! update fields are left out of the JSON so the server keeps the current
//! value; sending no body at all removes the entry instead.

use serde::{Deserialize, Serialize};

/// One vote from `get votelist`.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteListItem {
    pub uid: u32,
    pub vn: u32,
    /// Vote in tenths, 10 to 100.
    pub vote: u16,
    /// Unix timestamp of when the vote was cast.
    pub added: i64,
}

/// One row from `get vnlist`.
#[derive(Debug, Clone, Deserialize)]
pub struct VnListItem {
    pub uid: u32,
    pub vn: u32,
    /// 0 unknown, 1 playing, 2 finished, 3 stalled, 4 dropped.
    pub status: u8,
    pub added: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One row from `get wishlist`.
#[derive(Debug, Clone, Deserialize)]
pub struct WishlistItem {
    pub uid: u32,
    pub vn: u32,
    /// 0 high, 1 medium, 2 low, 3 blacklist.
    pub priority: u8,
    pub added: i64,
}

/// Body for `set votelist`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VoteUpdate {
    /// Vote in tenths, 10 to 100. The server validates the range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote: Option<u16>,
}

/// Body for `set vnlist`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VnListUpdate {
    /// Playing status. The server validates the range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for `set wishlist`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WishlistUpdate {
    /// Priority. The server validates the range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}
