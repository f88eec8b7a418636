//! Producer models

use serde::Deserialize;

use super::joined_list;

/// One producer row from `get producer`.
#[derive(Debug, Clone, Deserialize)]
pub struct Producer {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
    /// `co` company, `in` individual, `ng` amateur group.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Primary language code.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub links: Option<ProducerLinks>,
    /// Alternative names, comma-joined on the wire.
    #[serde(default, deserialize_with = "joined_list")]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub relations: Vec<ProducerRelation>,
}

/// External links of a producer.
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerLinks {
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub wikipedia: Option<String>,
}

/// Related producer.
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerRelation {
    pub id: u32,
    /// Relation kind, e.g. `old` (formerly) or `sub` (subsidiary).
    pub relation: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}
