pub mod types;
pub mod map;
pub mod rng;
pub mod error;
pub mod setup;
pub mod combat;
pub mod mission;
pub mod engine;


pub use types::*;
pub use map::{NUM_TERRITORIES, TERRITORY_NAMES};
pub use error::{GameError, GameResult};
pub use combat::BattleReport;
pub use mission::Mission;
pub use engine::{Command, Game, GameSnapshot, Outcome, TurnState};
pub use rng::{RandomSource, ScriptedRng, SeededRng};
