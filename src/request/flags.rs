//! Query flags
//!
//! Flags pick which field groups the server includes in a result row.
//! Each entity type accepts its own subset; the tables here mirror the
//! server's and let a bad combination fail before it touches the wire.

use super::GetVerb;

/// Detail sections a query can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VndbFlag {
    Basic,
    Details,
    Anime,
    Relations,
    Tags,
    Stats,
    Screens,
    Staff,
    Vn,
    Producers,
    Meas,
    Traits,
    Vns,
    Voiced,
    Instances,
    Aliases,
}

impl VndbFlag {
    /// Token used on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Details => "details",
            Self::Anime => "anime",
            Self::Relations => "relations",
            Self::Tags => "tags",
            Self::Stats => "stats",
            Self::Screens => "screens",
            Self::Staff => "staff",
            Self::Vn => "vn",
            Self::Producers => "producers",
            Self::Meas => "meas",
            Self::Traits => "traits",
            Self::Vns => "vns",
            Self::Voiced => "voiced",
            Self::Instances => "instances",
            Self::Aliases => "aliases",
        }
    }

    /// Whether queries for `verb` accept this flag.
    pub fn valid_for(self, verb: GetVerb) -> bool {
        allowed_flags(verb).contains(&self)
    }
}

/// The flags each entity type accepts.
pub fn allowed_flags(verb: GetVerb) -> &'static [VndbFlag] {
    use VndbFlag::*;
    match verb {
        GetVerb::VisualNovel => &[Basic, Details, Anime, Relations, Tags, Stats, Screens, Staff],
        GetVerb::Release => &[Basic, Details, Vn, Producers],
        GetVerb::Producer => &[Basic, Details, Relations],
        GetVerb::Character => &[Basic, Details, Meas, Traits, Vns, Voiced, Instances],
        GetVerb::Staff => &[Basic, Details, Aliases, Vns, Voiced],
        GetVerb::User => &[Basic],
        GetVerb::VoteList => &[Basic],
        GetVerb::VnList => &[Basic],
        GetVerb::Wishlist => &[Basic],
    }
}

/// Render the comma-joined flag list for a command. No flags means `basic`.
pub fn join_flags(flags: &[VndbFlag]) -> String {
    if flags.is_empty() {
        return VndbFlag::Basic.wire_name().to_string();
    }
    flags
        .iter()
        .map(|flag| flag.wire_name())
        .collect::<Vec<_>>()
        .join(",")
}
