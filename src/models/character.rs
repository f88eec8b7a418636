//! Character models

use serde::Deserialize;

use super::joined_list;

/// One character row from `get character`.
#[derive(Debug, Clone, Deserialize)]
pub struct Character {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
    /// `m`, `f` or `b`.
    #[serde(default)]
    pub gender: Option<String>,
    /// Blood type, one of `a`, `b`, `ab`, `o`.
    #[serde(default)]
    pub bloodt: Option<String>,
    /// `[day, month]`, either part possibly null.
    #[serde(default)]
    pub birthday: Option<(Option<u8>, Option<u8>)>,
    #[serde(default, deserialize_with = "joined_list")]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    // measurements, from the `meas` group, in cm/kg
    #[serde(default)]
    pub bust: Option<u16>,
    #[serde(default)]
    pub waist: Option<u16>,
    #[serde(default)]
    pub hip: Option<u16>,
    #[serde(default)]
    pub height: Option<u16>,
    #[serde(default)]
    pub weight: Option<u16>,
    /// `[trait id, spoiler level]` pairs.
    #[serde(default)]
    pub traits: Vec<(u32, u8)>,
    /// Appearances, from the `vns` group.
    #[serde(default)]
    pub vns: Vec<CharacterVn>,
    /// Voice actors, from the `voiced` group.
    #[serde(default)]
    pub voiced: Vec<VoiceActorRef>,
}

/// Appearance row as sent on the wire:
/// `[vn id, release id, spoiler level, role]`. A release id of 0 means
/// all releases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CharacterVn(pub u32, pub u32, pub u8, pub String);

impl CharacterVn {
    pub fn vn(&self) -> u32 {
        self.0
    }

    pub fn release(&self) -> u32 {
        self.1
    }

    pub fn spoiler_level(&self) -> u8 {
        self.2
    }

    /// `main`, `primary`, `side` or `appears`.
    pub fn role(&self) -> &str {
        &self.3
    }
}

/// Voice actor credit for a character.
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceActorRef {
    /// Staff id.
    pub id: u32,
    /// Alias id the credit was made under.
    pub aid: u32,
    /// Visual novel the voicing applies to.
    pub vid: u32,
    #[serde(default)]
    pub note: Option<String>,
}
