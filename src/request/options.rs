//! Query options

use serde::Serialize;

/// Paging and ordering options appended to a query as JSON.
///
/// Absent fields are left out of the JSON entirely, so the server's
/// defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestOptions {
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Rows per page. The server caps this at 25.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<u32>,
    /// Field to sort on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Sort descending instead of ascending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}
