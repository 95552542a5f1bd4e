//! Tile types and the tile reward function.
//!
//! Every cell of the exploration grid carries a [`TileKind`] tag. Gold tiles
//! pay a dice roll, event and character tiles pay a fixed amount, and the
//! player/claimed markers pay nothing.

use rand::Rng;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Reward constants
// ---------------------------------------------------------------------------

/// Flat bonus added to every gold tile roll.
pub const GOLD_TILE_BASE: i64 = 3;
/// Faces on the reward die (rolls are `1..=GOLD_DIE_SIDES`).
pub const GOLD_DIE_SIDES: i64 = 3;
/// Fixed gold paid by event tiles (E1-E3).
pub const EVENT_TILE_GOLD: i64 = 10;
/// Fixed gold paid by character tiles (C1-C3).
pub const CHARACTER_TILE_GOLD: i64 = 20;
/// Pull cards granted alongside the gold of a character tile.
pub const CHARACTER_TILE_CARDS: i32 = 1;

// ---------------------------------------------------------------------------
// TileKind
// ---------------------------------------------------------------------------

/// The type tag of a grid tile.
///
/// Serialized as the short codes stored in the persisted tilemap
/// (`"G1"`, `"E2"`, `"C3"`, `"P"`, `"X"`). Codes this version does not know
/// deserialize to [`TileKind::Unknown`] rather than failing the whole board,
/// and keep their original code so saving the board writes it back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TileKind {
    G1,
    G2,
    G3,
    E1,
    E2,
    E3,
    C1,
    C2,
    C3,
    /// The tile the player currently stands on.
    Player,
    /// A tile the player has already visited and collected.
    Claimed,
    Unknown(String),
}

impl TileKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::G1 => "G1",
            Self::G2 => "G2",
            Self::G3 => "G3",
            Self::E1 => "E1",
            Self::E2 => "E2",
            Self::E3 => "E3",
            Self::C1 => "C1",
            Self::C2 => "C2",
            Self::C3 => "C3",
            Self::Player => "P",
            Self::Claimed => "X",
            Self::Unknown(code) => code,
        }
    }

    pub fn parse(code: &str) -> Self {
        match code {
            "G1" => Self::G1,
            "G2" => Self::G2,
            "G3" => Self::G3,
            "E1" => Self::E1,
            "E2" => Self::E2,
            "E3" => Self::E3,
            "C1" => Self::C1,
            "C2" => Self::C2,
            "C3" => Self::C3,
            "P" => Self::Player,
            "X" => Self::Claimed,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Number of dice rolled for a gold tile, or `None` for other kinds.
    pub fn gold_dice(&self) -> Option<u32> {
        match self {
            Self::G1 => Some(1),
            Self::G2 => Some(2),
            Self::G3 => Some(3),
            _ => None,
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self, Self::E1 | Self::E2 | Self::E3)
    }

    pub fn is_character(&self) -> bool {
        matches!(self, Self::C1 | Self::C2 | Self::C3)
    }
}

impl From<String> for TileKind {
    fn from(code: String) -> Self {
        Self::parse(&code)
    }
}

impl From<TileKind> for String {
    fn from(kind: TileKind) -> Self {
        match kind {
            TileKind::Unknown(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// One cell of the exploration grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "type")]
    pub kind: TileKind,
    #[serde(default)]
    pub discovered: bool,
}

impl Tile {
    pub fn hidden(kind: TileKind) -> Self {
        Self {
            kind,
            discovered: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Rewards
// ---------------------------------------------------------------------------

/// What the ledger is credited with when a tile is uncovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileReward {
    pub gold: i64,
    pub cards: i32,
}

impl TileReward {
    pub const NONE: TileReward = TileReward { gold: 0, cards: 0 };

    pub fn is_empty(&self) -> bool {
        self.gold == 0 && self.cards == 0
    }
}

/// Roll the gold paid by a tile of the given kind.
///
/// `Gk` rolls `k` independent d3 and adds [`GOLD_TILE_BASE`], so G1 pays
/// 4-6, G2 pays 5-9 and G3 pays 6-12.
pub fn roll_gold<R: Rng + ?Sized>(kind: &TileKind, rng: &mut R) -> i64 {
    if let Some(dice) = kind.gold_dice() {
        let rolled: i64 = (0..dice)
            .map(|_| rng.random_range(1..=GOLD_DIE_SIDES))
            .sum();
        rolled + GOLD_TILE_BASE
    } else if kind.is_event() {
        EVENT_TILE_GOLD
    } else if kind.is_character() {
        CHARACTER_TILE_GOLD
    } else {
        0
    }
}

/// Full reward for uncovering a tile: gold plus any bonus cards.
pub fn tile_reward<R: Rng + ?Sized>(kind: &TileKind, rng: &mut R) -> TileReward {
    TileReward {
        gold: roll_gold(kind, rng),
        cards: if kind.is_character() {
            CHARACTER_TILE_CARDS
        } else {
            0
        },
    }
}
