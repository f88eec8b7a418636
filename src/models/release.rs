//! Release models

use serde::Deserialize;

/// One release row from `get release`.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub id: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    /// `complete`, `partial` or `trial`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub patch: bool,
    #[serde(default)]
    pub freeware: bool,
    #[serde(default)]
    pub doujin: bool,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Age rating, 0 meaning all ages.
    #[serde(default)]
    pub minage: Option<u8>,
    /// JAN/UPC/EAN code.
    #[serde(default)]
    pub gtin: Option<String>,
    #[serde(default)]
    pub catalog: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub media: Vec<Medium>,
    /// Visual novels this release belongs to (`vn` flag).
    #[serde(default)]
    pub vn: Vec<ReleaseVn>,
    #[serde(default)]
    pub producers: Vec<ReleaseProducer>,
}

/// Physical or digital medium of a release.
#[derive(Debug, Clone, Deserialize)]
pub struct Medium {
    pub medium: String,
    /// Quantity, absent for media without one (like internet download).
    #[serde(default)]
    pub qty: Option<u8>,
}

/// Visual novel reference inside a release row.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseVn {
    pub id: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

/// Producer reference inside a release row.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseProducer {
    pub id: u32,
    #[serde(default)]
    pub developer: bool,
    #[serde(default)]
    pub publisher: bool,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}
