//! Staff models

use serde::Deserialize;

/// One staff row from `get staff`.
#[derive(Debug, Clone, Deserialize)]
pub struct Staff {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Primary language code.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub links: Option<StaffLinks>,
    #[serde(default)]
    pub description: Option<String>,
    /// All names this person is known by, from the `aliases` group.
    #[serde(default)]
    pub aliases: Vec<StaffAlias>,
    /// Alias id of the name shown by default.
    #[serde(default)]
    pub main_alias: Option<u32>,
    /// Credited work, from the `vns` group.
    #[serde(default)]
    pub vns: Vec<StaffVnCredit>,
    /// Voiced characters, from the `voiced` group.
    #[serde(default)]
    pub voiced: Vec<StaffVoiceCredit>,
}

/// Alias row as sent on the wire: `[alias id, name, original]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StaffAlias(pub u32, pub Option<String>, pub Option<String>);

/// External links of a staff member.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffLinks {
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub wikipedia: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub anidb: Option<u32>,
}

/// Credit on a visual novel.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffVnCredit {
    /// Visual novel id.
    pub id: u32,
    /// Alias id the credit was made under.
    pub aid: u32,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Voice credit on a character.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffVoiceCredit {
    /// Visual novel id.
    pub id: u32,
    /// Alias id the credit was made under.
    pub aid: u32,
    /// Character id.
    pub cid: u32,
    #[serde(default)]
    pub note: Option<String>,
}
