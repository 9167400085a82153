// ═══════════════════════════════════════════════════════════════════════
// Combat resolver — dice pools, pairing, losses, conquest and transfer
//
// Validation is NOT done here. The turn controller checks that the origin
// is the attacker's with more than one troop and that the destination is
// someone else's before calling `resolve_attack`.
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::rng::RandomSource;
use crate::types::*;

pub const MAX_ATTACK_DICE: usize = 3;
pub const MAX_DEFENSE_DICE: usize = 2;
/// Most troops that follow a conquest into the new territory.
pub const MAX_TRANSFER: u32 = 3;

pub type AttackDice = SmallVec<[u8; MAX_ATTACK_DICE]>;
pub type DefenseDice = SmallVec<[u8; MAX_DEFENSE_DICE]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

/// One paired comparison of sorted dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub attacker_die: u8,
    pub defender_die: u8,
    pub loser: Side,
}

impl Exchange {
    /// Strictly higher wins; ties go to the defender.
    pub fn compare(attacker_die: u8, defender_die: u8) -> Exchange {
        let loser = if attacker_die > defender_die {
            Side::Defender
        } else {
            Side::Attacker
        };
        Exchange { attacker_die, defender_die, loser }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conquest {
    pub previous_owner: Faction,
    /// Troops moved from origin after the reset to 1. Can be 0.
    pub transferred: u32,
}

/// Everything the caller needs to narrate a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub origin: TerritoryId,
    pub destination: TerritoryId,
    pub attacker: Faction,
    pub defender: Faction,
    pub origin_troops_before: u32,
    pub destination_troops_before: u32,
    /// As rolled.
    pub attacker_rolls: AttackDice,
    pub defender_rolls: DefenseDice,
    /// Descending, as paired.
    pub attacker_sorted: AttackDice,
    pub defender_sorted: DefenseDice,
    pub exchanges: SmallVec<[Exchange; MAX_DEFENSE_DICE]>,
    pub attacker_losses: u32,
    pub defender_losses: u32,
    /// Troop counts straight after losses, before any conquest reset.
    pub origin_troops_after_losses: u32,
    pub destination_troops_after_losses: u32,
    /// Final troop counts.
    pub origin_troops: u32,
    pub destination_troops: u32,
    pub conquest: Option<Conquest>,
}

impl BattleReport {
    pub fn conquered(&self) -> bool {
        self.conquest.is_some()
    }
}

/// Dice the attacker may throw: one troop always stays home.
pub fn attacker_dice_count(origin_troops: u32) -> usize {
    (origin_troops.saturating_sub(1) as usize).min(MAX_ATTACK_DICE)
}

pub fn defender_dice_count(destination_troops: u32) -> usize {
    (destination_troops as usize).min(MAX_DEFENSE_DICE)
}

fn roll_die(rng: &mut impl RandomSource) -> u8 {
    rng.roll_range(1, 6) as u8
}

/// Resolve one attack from `origin` into `destination`, mutating the board.
///
/// Both ids must be on the board, the origin must hold more than one troop
/// and the destination must belong to a different faction.
pub fn resolve_attack(
    board: &mut Board,
    origin: TerritoryId,
    destination: TerritoryId,
    rng: &mut impl RandomSource,
) -> BattleReport {
    let (attacker, origin_before) = {
        let t = board.territory(origin);
        (t.owner, t.troops)
    };
    let (defender, destination_before) = {
        let t = board.territory(destination);
        (t.owner, t.troops)
    };

    let attack_count = attacker_dice_count(origin_before);
    let defense_count = defender_dice_count(destination_before);

    // Attacker rolls first.
    let attacker_rolls: AttackDice = (0..attack_count).map(|_| roll_die(rng)).collect();
    let defender_rolls: DefenseDice = (0..defense_count).map(|_| roll_die(rng)).collect();

    let mut attacker_sorted = attacker_rolls.clone();
    attacker_sorted.sort_unstable_by(|a, b| b.cmp(a));
    let mut defender_sorted = defender_rolls.clone();
    defender_sorted.sort_unstable_by(|a, b| b.cmp(a));

    // zip stops at the shorter pool; leftover dice do nothing
    let exchanges: SmallVec<[Exchange; MAX_DEFENSE_DICE]> = attacker_sorted
        .iter()
        .zip(defender_sorted.iter())
        .map(|(&a, &d)| Exchange::compare(a, d))
        .collect();

    let defender_losses = exchanges.iter().filter(|e| e.loser == Side::Defender).count() as u32;
    let attacker_losses = exchanges.len() as u32 - defender_losses;

    // losses <= dice <= available troops, so neither subtraction underflows
    let origin_after_losses = origin_before - attacker_losses;
    let destination_after_losses = destination_before - defender_losses;
    board.territory_mut(origin).troops = origin_after_losses;
    board.territory_mut(destination).troops = destination_after_losses;

    debug!(
        origin = %origin,
        destination = %destination,
        attacker_dice = ?attacker_sorted.as_slice(),
        defender_dice = ?defender_sorted.as_slice(),
        attacker_losses,
        defender_losses,
        "battle resolved"
    );

    let conquest = if destination_after_losses == 0 {
        let transferred = origin_after_losses.saturating_sub(1).min(MAX_TRANSFER);
        {
            let dest = board.territory_mut(destination);
            dest.owner = attacker;
            dest.troops = 1 + transferred;
        }
        board.territory_mut(origin).troops -= transferred;

        info!(
            territory = board.territory(destination).name(),
            from = %defender,
            to = %attacker,
            transferred,
            "territory conquered"
        );
        Some(Conquest { previous_owner: defender, transferred })
    } else {
        None
    };

    BattleReport {
        origin,
        destination,
        attacker,
        defender,
        origin_troops_before: origin_before,
        destination_troops_before: destination_before,
        attacker_rolls,
        defender_rolls,
        attacker_sorted,
        defender_sorted,
        exchanges,
        attacker_losses,
        defender_losses,
        origin_troops_after_losses: origin_after_losses,
        destination_troops_after_losses: destination_after_losses,
        origin_troops: board.territory(origin).troops,
        destination_troops: board.territory(destination).troops,
        conquest,
    }
}
