//! User models

use serde::Deserialize;

/// One user row from `get user`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u32,
    pub username: String,
}
