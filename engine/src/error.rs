// ═══════════════════════════════════════════════════════════════════════
// Errors — every rejected input maps to one of these
// ═══════════════════════════════════════════════════════════════════════

use thiserror::Error;

use crate::map::NUM_TERRITORIES;
use crate::types::TerritoryId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("territory {0} does not exist (valid ids are 0-{max})", max = NUM_TERRITORIES - 1)]
    OutOfRangeIndex(i64),
    #[error("'{0}' is not a territory id")]
    NotANumber(String),
    #[error("territory {0} is not yours")]
    WrongOwnerForOrigin(TerritoryId),
    #[error("territory {id} has only {troops} troop(s); at least 2 are needed to attack")]
    InsufficientTroopsToAttack { id: TerritoryId, troops: u32 },
    #[error("territory {0} already belongs to you")]
    DestinationAlreadyOwned(TerritoryId),
    #[error("invalid option '{0}'")]
    InvalidMenuChoice(String),
    #[error("could not allocate the board: {0}")]
    AllocationFailure(String),
    #[error("the board needs exactly {expected} unique territory names, got {got}", expected = NUM_TERRITORIES)]
    InvalidTerritoryNames { got: usize },
    #[error("not expecting {attempted} while {state}")]
    OutOfTurn {
        attempted: &'static str,
        state: &'static str,
    },
}

pub type GameResult<T> = Result<T, GameError>;
