// ═══════════════════════════════════════════════════════════════════════
// Core types — factions, territories and the board
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::map::NUM_TERRITORIES;

// ── Faction ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Faction {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
}

impl Faction {
    /// Draw order and summary order.
    pub const ALL: [Faction; 5] = [
        Faction::Blue,
        Faction::Red,
        Faction::Green,
        Faction::Yellow,
        Faction::Purple,
    ];

    /// The single human-controlled faction.
    pub const PLAYER: Faction = Faction::Blue;

    pub fn index(self) -> usize {
        match self {
            Faction::Blue => 0,
            Faction::Red => 1,
            Faction::Green => 2,
            Faction::Yellow => 3,
            Faction::Purple => 4,
        }
    }

    /// Upper-case label used on the map table.
    pub fn label(self) -> &'static str {
        match self {
            Faction::Blue => "BLUE",
            Faction::Red => "RED",
            Faction::Green => "GREEN",
            Faction::Yellow => "YELLOW",
            Faction::Purple => "PURPLE",
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Territory ID ───────────────────────────────────────────────────────
// Compact, copyable territory identifier. Index into the board.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct TerritoryId(pub u8);

impl TerritoryId {
    /// Converts raw user input into an id if it names a board cell.
    pub fn from_index(raw: i64) -> Option<TerritoryId> {
        if (0..NUM_TERRITORIES as i64).contains(&raw) {
            Some(TerritoryId(raw as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Territory ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    name: String,
    pub owner: Faction,
    pub troops: u32,
}

impl Territory {
    pub fn new(name: impl Into<String>, owner: Faction, troops: u32) -> Self {
        Territory {
            name: name.into(),
            owner,
            troops,
        }
    }

    /// The name is fixed when the board is built.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Player-owned with at least one troop to leave behind.
    pub fn can_attack_from(&self, player: Faction) -> bool {
        self.owner == player && self.troops > 1
    }
}

// ── Board ──────────────────────────────────────────────────────────────

/// The ten territories, indexed by `TerritoryId`. Never resized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    territories: Vec<Territory>,
}

/// Wire form of a board; deserialised boards are checked like any other.
#[derive(Deserialize)]
struct BoardData {
    territories: Vec<Territory>,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Board, GameError> {
        Board::from_territories(data.territories)
    }
}

impl Board {
    /// Wraps an already-validated territory list. Callers outside the crate
    /// go through `Board::initialize` or `Board::from_territories`.
    pub(crate) fn from_vec(territories: Vec<Territory>) -> Self {
        debug_assert_eq!(territories.len(), NUM_TERRITORIES);
        Board { territories }
    }

    /// Panics on an id outside the board. Callers validate first.
    pub fn territory(&self, id: TerritoryId) -> &Territory {
        &self.territories[id.index()]
    }

    pub(crate) fn territory_mut(&mut self, id: TerritoryId) -> &mut Territory {
        &mut self.territories[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (TerritoryId, &Territory)> {
        self.territories
            .iter()
            .enumerate()
            .map(|(i, t)| (TerritoryId(i as u8), t))
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Number of territories owned by each faction.
    pub fn summary(&self) -> FactionCounts {
        let mut counts = FactionCounts::default();
        for t in &self.territories {
            counts.0[t.owner.index()] += 1;
        }
        counts
    }

    pub fn count_owned_by(&self, faction: Faction) -> usize {
        self.territories.iter().filter(|t| t.owner == faction).count()
    }
}

// ── Faction counts ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionCounts([usize; 5]);

impl FactionCounts {
    pub fn get(&self, faction: Faction) -> usize {
        self.0[faction.index()]
    }

    /// Pairs in `Faction::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Faction, usize)> + '_ {
        Faction::ALL.iter().map(move |&f| (f, self.get(f)))
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}
