//! Database statistics

use serde::Deserialize;

/// Row counts returned by `dbstats`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseStats {
    pub users: u32,
    pub threads: u32,
    pub tags: u32,
    pub releases: u32,
    pub producers: u32,
    #[serde(rename = "chars")]
    pub characters: u32,
    pub posts: u32,
    #[serde(rename = "vn")]
    pub visual_novels: u32,
    pub traits: u32,
    pub staff: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dbstats_decodes_the_renamed_fields() {
        let stats: DatabaseStats = serde_json::from_str(
            r#"{"users":49084,"threads":3998,"tags":1627,"releases":28071,
                "producers":3456,"chars":14046,"posts":52470,"vn":13051,
                "traits":1272,"staff":1851}"#,
        )
        .unwrap();
        assert_eq!(stats.visual_novels, 13051);
        assert_eq!(stats.characters, 14046);
    }
}
