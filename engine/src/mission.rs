// ═══════════════════════════════════════════════════════════════════════
// Mission engine — the player's secret victory condition
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;
use crate::types::{Board, Faction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mission {
    /// No territory on the board may belong to this faction.
    Eliminate(Faction),
    /// The player must own at least this many territories.
    Conquer(usize),
}

impl Mission {
    /// The six missions in draw order.
    pub const ALL: [Mission; 6] = [
        Mission::Eliminate(Faction::Red),
        Mission::Eliminate(Faction::Green),
        Mission::Eliminate(Faction::Yellow),
        Mission::Eliminate(Faction::Purple),
        Mission::Conquer(5),
        Mission::Conquer(7),
    ];

    pub fn draw(rng: &mut impl RandomSource) -> Mission {
        Mission::ALL[rng.roll_range(0, Mission::ALL.len() as u32 - 1) as usize]
    }

    /// Whether the board currently satisfies the mission.
    ///
    /// An elimination counts however the target lost its last territory,
    /// including if it never had one.
    pub fn is_satisfied(&self, board: &Board, player: Faction) -> bool {
        match *self {
            Mission::Eliminate(target) => board.count_owned_by(target) == 0,
            Mission::Conquer(threshold) => board.count_owned_by(player) >= threshold,
        }
    }

    /// Headline shown in the mission box.
    pub fn title(&self) -> String {
        match self {
            Mission::Eliminate(f) => format!("DESTROY the {f} army"),
            Mission::Conquer(n) => format!("CONQUER {n} territories in total"),
        }
    }

    /// One-line explanation under the headline.
    pub fn detail(&self) -> String {
        match self {
            Mission::Eliminate(f) => {
                format!("(Conquer every {} territory)", f.label().to_lowercase())
            }
            Mission::Conquer(n) => format!("(Hold at least {n} territories under your rule)"),
        }
    }
}

impl std::fmt::Display for Mission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title())
    }
}
