// ═══════════════════════════════════════════════════════════════════════
// Turn controller — the game's state machine
//
// Architecture:
//   The controller never does I/O. It records which input it is waiting
//   for in `TurnState`, and the console reads that, prompts, and feeds the
//   answer back through the matching method.
//
// Flow:
//   AwaitingCommand ──attack──▶ ChoosingOrigin ──▶ ChoosingDestination
//         ▲                          │ error             │ error / battle
//         └──────────────────────────┴───────────────────┘
//   AwaitingCommand ──check (satisfied)──▶ Ended(Victory)
//   AwaitingCommand ──quit──▶ Ended(Quit)
//
// A rejected input puts the game back in AwaitingCommand with the board
// and the random stream untouched.
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::combat::{self, BattleReport};
use crate::error::{GameError, GameResult};
use crate::mission::Mission;
use crate::rng::RandomSource;
use crate::types::*;

/// Main-menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Attack,
    CheckMission,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> GameResult<Command> {
        match input.trim().parse::<i64>() {
            Ok(1) => Ok(Command::Attack),
            Ok(2) => Ok(Command::CheckMission),
            Ok(0) => Ok(Command::Quit),
            _ => Err(GameError::InvalidMenuChoice(input.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    AwaitingCommand,
    ChoosingOrigin,
    ChoosingDestination { origin: TerritoryId },
    Ended(Outcome),
}

impl TurnState {
    fn describe(self) -> &'static str {
        match self {
            TurnState::AwaitingCommand => "waiting for a command",
            TurnState::ChoosingOrigin => "choosing an origin",
            TurnState::ChoosingDestination { .. } => "choosing a destination",
            TurnState::Ended(_) => "the game is over",
        }
    }
}

/// Serialisable view of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub seed: Option<u64>,
    pub player: Faction,
    pub mission: Mission,
    pub mission_complete: bool,
    pub state: TurnState,
    pub board: Board,
    pub summary: FactionCounts,
}

/// One game session: board, mission and the random stream it draws from.
#[derive(Debug)]
pub struct Game<R> {
    board: Board,
    mission: Mission,
    player: Faction,
    rng: R,
    state: TurnState,
}

impl<R: RandomSource> Game<R> {
    pub fn new(board: Board, mission: Mission, player: Faction, rng: R) -> Self {
        Game {
            board,
            mission,
            player,
            rng,
            state: TurnState::AwaitingCommand,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mission(&self) -> Mission {
        self.mission
    }

    pub fn player(&self) -> Faction {
        self.player
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, TurnState::Ended(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            TurnState::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.rng.seed()
    }

    // ── Attack sub-interface listings ──────────────────────────────────

    /// Player territories with troops to spare.
    pub fn eligible_origins(&self) -> Vec<TerritoryId> {
        self.board
            .iter()
            .filter(|(_, t)| t.can_attack_from(self.player))
            .map(|(id, _)| id)
            .collect()
    }

    /// Every territory the player does not own.
    pub fn eligible_targets(&self) -> Vec<TerritoryId> {
        self.board
            .iter()
            .filter(|(_, t)| t.owner != self.player)
            .map(|(id, _)| id)
            .collect()
    }

    // ── Transitions ────────────────────────────────────────────────────

    fn expect_state(&self, wanted: TurnState, attempted: &'static str) -> GameResult<()> {
        if self.state == wanted {
            Ok(())
        } else {
            Err(GameError::OutOfTurn {
                attempted,
                state: self.state.describe(),
            })
        }
    }

    /// Rejected input: log it and drop back to the menu.
    fn abort(&mut self, err: GameError) -> GameError {
        warn!(error = %err, "input rejected");
        self.state = TurnState::AwaitingCommand;
        err
    }

    pub fn begin_attack(&mut self) -> GameResult<()> {
        self.expect_state(TurnState::AwaitingCommand, "an attack")?;
        self.state = TurnState::ChoosingOrigin;
        Ok(())
    }

    pub fn choose_origin(&mut self, raw: i64) -> GameResult<TerritoryId> {
        self.expect_state(TurnState::ChoosingOrigin, "an origin")?;
        match self.validate_origin(raw) {
            Ok(origin) => {
                self.state = TurnState::ChoosingDestination { origin };
                Ok(origin)
            }
            Err(err) => Err(self.abort(err)),
        }
    }

    /// Validates the destination and fights the battle.
    pub fn choose_destination(&mut self, raw: i64) -> GameResult<BattleReport> {
        let origin = match self.state {
            TurnState::ChoosingDestination { origin } => origin,
            _ => {
                return Err(GameError::OutOfTurn {
                    attempted: "a destination",
                    state: self.state.describe(),
                })
            }
        };
        let destination = match self.validate_destination(raw) {
            Ok(id) => id,
            Err(err) => return Err(self.abort(err)),
        };

        self.state = TurnState::AwaitingCommand;
        Ok(combat::resolve_attack(&mut self.board, origin, destination, &mut self.rng))
    }

    /// Abandon a half-entered attack. No-op outside the attack flow.
    pub fn cancel_attack(&mut self) {
        if matches!(self.state, TurnState::ChoosingOrigin | TurnState::ChoosingDestination { .. }) {
            self.state = TurnState::AwaitingCommand;
        }
    }

    /// Validate both ends and fight in one call.
    pub fn attack(&mut self, origin: i64, destination: i64) -> GameResult<BattleReport> {
        self.begin_attack()?;
        self.choose_origin(origin)?;
        self.choose_destination(destination)
    }

    /// Ends the game with a win if the mission is met.
    pub fn check_mission(&mut self) -> GameResult<bool> {
        self.expect_state(TurnState::AwaitingCommand, "a mission check")?;
        let done = self.mission.is_satisfied(&self.board, self.player);
        if done {
            info!(mission = %self.mission, "mission complete");
            self.state = TurnState::Ended(Outcome::Victory);
        }
        Ok(done)
    }

    pub fn quit(&mut self) -> GameResult<()> {
        self.expect_state(TurnState::AwaitingCommand, "quitting")?;
        info!("player quit");
        self.state = TurnState::Ended(Outcome::Quit);
        Ok(())
    }

    // ── Validation ─────────────────────────────────────────────────────

    pub fn validate_origin(&self, raw: i64) -> GameResult<TerritoryId> {
        let id = TerritoryId::from_index(raw).ok_or(GameError::OutOfRangeIndex(raw))?;
        let t = self.board.territory(id);
        if t.owner != self.player {
            return Err(GameError::WrongOwnerForOrigin(id));
        }
        if t.troops <= 1 {
            return Err(GameError::InsufficientTroopsToAttack { id, troops: t.troops });
        }
        Ok(id)
    }

    pub fn validate_destination(&self, raw: i64) -> GameResult<TerritoryId> {
        let id = TerritoryId::from_index(raw).ok_or(GameError::OutOfRangeIndex(raw))?;
        if self.board.territory(id).owner == self.player {
            return Err(GameError::DestinationAlreadyOwned(id));
        }
        Ok(id)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            seed: self.seed(),
            player: self.player,
            mission: self.mission,
            mission_complete: self.mission.is_satisfied(&self.board, self.player),
            state: self.state,
            board: self.board.clone(),
            summary: self.board.summary(),
        }
    }
}
