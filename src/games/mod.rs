//! Game type definitions.
//!
//! Maps the game names Wabbajack writes into modlists (`GameType`,
//! `State.GameName`) to display names and Nexus Mods site segments. Several
//! games share a Nexus site with another game, so the segment is not always the
//! lower-cased game name.

/// Games with a known Nexus domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    /// The Elder Scrolls V: Skyrim Special Edition
    SkyrimSE,
    SkyrimVR,
    /// The Elder Scrolls V: Skyrim (Legendary Edition)
    SkyrimLE,
    Enderal,
    EnderalSE,
    Fallout4,
    Fallout4VR,
    FalloutNewVegas,
    Fallout3,
    Oblivion,
    Morrowind,
    Starfield,
}

impl GameType {
    const ALL: [GameType; 12] = [
        GameType::SkyrimSE,
        GameType::SkyrimVR,
        GameType::SkyrimLE,
        GameType::Enderal,
        GameType::EnderalSE,
        GameType::Fallout4,
        GameType::Fallout4VR,
        GameType::FalloutNewVegas,
        GameType::Fallout3,
        GameType::Oblivion,
        GameType::Morrowind,
        GameType::Starfield,
    ];

    /// Returns the display name for this game.
    pub fn name(&self) -> &'static str {
        match self {
            GameType::SkyrimSE => "Skyrim Special Edition",
            GameType::SkyrimVR => "Skyrim VR",
            GameType::SkyrimLE => "Skyrim Legendary Edition",
            GameType::Enderal => "Enderal",
            GameType::EnderalSE => "Enderal Special Edition",
            GameType::Fallout4 => "Fallout 4",
            GameType::Fallout4VR => "Fallout 4 VR",
            GameType::FalloutNewVegas => "Fallout New Vegas",
            GameType::Fallout3 => "Fallout 3",
            GameType::Oblivion => "Oblivion",
            GameType::Morrowind => "Morrowind",
            GameType::Starfield => "Starfield",
        }
    }

    /// Returns the game name as Wabbajack spells it.
    pub fn wabbajack_name(&self) -> &'static str {
        match self {
            GameType::SkyrimSE => "SkyrimSpecialEdition",
            GameType::SkyrimVR => "SkyrimVR",
            GameType::SkyrimLE => "Skyrim",
            GameType::Enderal => "Enderal",
            GameType::EnderalSE => "EnderalSpecialEdition",
            GameType::Fallout4 => "Fallout4",
            GameType::Fallout4VR => "Fallout4VR",
            GameType::FalloutNewVegas => "FalloutNewVegas",
            GameType::Fallout3 => "Fallout3",
            GameType::Oblivion => "Oblivion",
            GameType::Morrowind => "Morrowind",
            GameType::Starfield => "Starfield",
        }
    }

    /// Returns the Nexus Mods domain name for this game.
    pub fn nexus_domain(&self) -> &'static str {
        match self {
            // VR mods are hosted on the flat-screen game's site
            GameType::SkyrimSE | GameType::SkyrimVR => "skyrimspecialedition",
            GameType::SkyrimLE => "skyrim",
            GameType::Enderal => "enderal",
            GameType::EnderalSE => "enderalspecialedition",
            GameType::Fallout4 | GameType::Fallout4VR => "fallout4",
            GameType::FalloutNewVegas => "newvegas",
            GameType::Fallout3 => "fallout3",
            GameType::Oblivion => "oblivion",
            GameType::Morrowind => "morrowind",
            GameType::Starfield => "starfield",
        }
    }

    /// Parses a game type from a Wabbajack game name (case-insensitive).
    pub fn from_wabbajack_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|game| game.wabbajack_name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Nexus site segment for a Wabbajack game name.
///
/// Known games use their table entry; anything else falls back to the
/// lower-cased game name.
pub fn nexus_segment(game_name: &str) -> String {
    GameType::from_wabbajack_name(game_name)
        .map(|game| game.nexus_domain().to_string())
        .unwrap_or_else(|| game_name.to_lowercase())
}
