// ═══════════════════════════════════════════════════════════════════════
// Static map data — the fixed set of ten territories
// ═══════════════════════════════════════════════════════════════════════

use crate::types::TerritoryId;

pub const NUM_TERRITORIES: usize = 10;

// ── Territory ID constants ─────────────────────────────────────────────
// Index 0 is the player's home territory.

pub const ALASKA: TerritoryId = TerritoryId(0);
pub const BRAZIL: TerritoryId = TerritoryId(1);
pub const CHINA: TerritoryId  = TerritoryId(2);
pub const EGYPT: TerritoryId  = TerritoryId(3);
pub const FRANCE: TerritoryId = TerritoryId(4);
pub const INDIA: TerritoryId  = TerritoryId(5);
pub const JAPAN: TerritoryId  = TerritoryId(6);
pub const MEXICO: TerritoryId = TerritoryId(7);
pub const RUSSIA: TerritoryId = TerritoryId(8);
pub const SUDAN: TerritoryId  = TerritoryId(9);

pub const HOME_TERRITORY: TerritoryId = ALASKA;

/// Troops placed on the home territory regardless of the random draw.
pub const HOME_TROOPS: u32 = 3;

/// Random starting garrison range, inclusive.
pub const MIN_START_TROOPS: u32 = 1;
pub const MAX_START_TROOPS: u32 = 5;

/// Territory names in board order.
pub const TERRITORY_NAMES: [&str; NUM_TERRITORIES] = [
    "Alaska", "Brazil", "China", "Egypt", "France",
    "India", "Japan", "Mexico", "Russia", "Sudan",
];
