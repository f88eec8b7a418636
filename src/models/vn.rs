//! Visual novel models

use serde::Deserialize;

use super::joined_list;

/// One visual novel row from `get vn`.
///
/// `basic` supplies the title and release data, `details` the description
/// block, and the remaining groups their own vectors.
#[derive(Debug, Clone, Deserialize)]
pub struct VisualNovel {
    pub id: u32,
    #[serde(default)]
    pub title: Option<String>,
    /// Title in the original script.
    #[serde(default)]
    pub original: Option<String>,
    /// Release date, `yyyy-mm-dd` with unknown parts elided.
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub orig_lang: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Alternative titles, newline-joined on the wire.
    #[serde(default, deserialize_with = "joined_list")]
    pub aliases: Vec<String>,
    /// Rough length class, 1 (very short) to 5 (very long).
    #[serde(default)]
    pub length: Option<u8>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Option<VnLinks>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_nsfw: bool,
    #[serde(default)]
    pub anime: Vec<AnimeRef>,
    #[serde(default)]
    pub relations: Vec<VnRelation>,
    #[serde(default)]
    pub tags: Vec<TagScore>,
    #[serde(default)]
    pub popularity: Option<f32>,
    /// Bayesian rating between 1 and 10.
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub votecount: Option<u32>,
    #[serde(default)]
    pub screens: Vec<Screenshot>,
    #[serde(default)]
    pub staff: Vec<StaffCredit>,
}

/// External links from the `details` group.
#[derive(Debug, Clone, Deserialize)]
pub struct VnLinks {
    #[serde(default)]
    pub wikipedia: Option<String>,
    #[serde(default)]
    pub encubed: Option<String>,
    #[serde(default)]
    pub renai: Option<String>,
}

/// Related anime.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimeRef {
    pub id: u32,
    #[serde(default)]
    pub ann_id: Option<u32>,
    #[serde(default)]
    pub nfo_id: Option<String>,
    #[serde(default)]
    pub title_romaji: Option<String>,
    #[serde(default)]
    pub title_kanji: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Related visual novel.
#[derive(Debug, Clone, Deserialize)]
pub struct VnRelation {
    pub id: u32,
    /// Relation kind, e.g. `seq` or `fan`.
    pub relation: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub official: bool,
}

/// Tag assignment as sent on the wire: `[tag id, score, spoiler level]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TagScore(pub u32, pub f32, pub u8);

impl TagScore {
    pub fn tag(&self) -> u32 {
        self.0
    }

    pub fn score(&self) -> f32 {
        self.1
    }

    /// 0 none, 1 minor, 2 major.
    pub fn spoiler_level(&self) -> u8 {
        self.2
    }
}

/// Screenshot from the `screens` group.
#[derive(Debug, Clone, Deserialize)]
pub struct Screenshot {
    pub image: String,
    /// Release the screenshot was taken from.
    pub rid: u32,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub width: u32,
}

/// Staff credit from the `staff` group.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffCredit {
    /// Staff id.
    pub sid: u32,
    /// Alias id the credit was made under.
    pub aid: u32,
    pub name: String,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}
