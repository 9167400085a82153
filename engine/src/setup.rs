// ═══════════════════════════════════════════════════════════════════════
// Game setup — populates the board and draws the mission
// ═══════════════════════════════════════════════════════════════════════

use std::collections::HashSet;

use tracing::info;

use crate::engine::Game;
use crate::error::{GameError, GameResult};
use crate::map::*;
use crate::mission::Mission;
use crate::rng::RandomSource;
use crate::types::*;

impl Board {
    /// Build the board from ten unique names.
    ///
    /// Every territory gets a uniformly random owner and 1–5 troops, drawn
    /// owner-then-troops per territory in board order. The home territory
    /// is then overwritten to belong to the player with exactly
    /// `HOME_TROOPS`, so the player always starts with something to
    /// attack from.
    pub fn initialize(names: &[&str], rng: &mut impl RandomSource) -> GameResult<Board> {
        check_names(names.iter().copied())?;

        let mut territories = Vec::new();
        territories
            .try_reserve_exact(NUM_TERRITORIES)
            .map_err(|e| GameError::AllocationFailure(e.to_string()))?;

        for &name in names {
            let owner = Faction::ALL[rng.roll_range(0, Faction::ALL.len() as u32 - 1) as usize];
            let troops = rng.roll_range(MIN_START_TROOPS, MAX_START_TROOPS);
            territories.push(Territory::new(name, owner, troops));
        }

        let home = &mut territories[HOME_TERRITORY.index()];
        home.owner = Faction::PLAYER;
        home.troops = HOME_TROOPS;

        Ok(Board::from_vec(territories))
    }

    /// Build a board from explicit territories (fixed scenarios, tests).
    pub fn from_territories(territories: Vec<Territory>) -> GameResult<Board> {
        check_names(territories.iter().map(Territory::name))?;
        Ok(Board::from_vec(territories))
    }
}

fn check_names<'a>(names: impl Iterator<Item = &'a str>) -> GameResult<()> {
    let mut seen = HashSet::new();
    let mut count = 0;
    let mut unique = true;
    for name in names {
        count += 1;
        unique &= seen.insert(name);
    }
    if count != NUM_TERRITORIES || !unique {
        return Err(GameError::InvalidTerritoryNames { got: seen.len() });
    }
    Ok(())
}

/// Create a fresh game on the standard map: board first, then mission.
pub fn create_game<R: RandomSource>(mut rng: R) -> GameResult<Game<R>> {
    let board = Board::initialize(&TERRITORY_NAMES, &mut rng)?;
    let mission = Mission::draw(&mut rng);
    info!(
        seed = ?rng.seed(),
        mission = %mission,
        player_territories = board.count_owned_by(Faction::PLAYER),
        "new game"
    );
    Ok(Game::new(board, mission, Faction::PLAYER, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRng, SeededRng};

    #[test]
    fn test_home_territory_override() {
        for seed in 0..200 {
            let mut rng = SeededRng::new(seed);
            let board = Board::initialize(&TERRITORY_NAMES, &mut rng).unwrap();
            let home = board.territory(HOME_TERRITORY);
            assert_eq!(home.owner, Faction::PLAYER, "seed {seed}");
            assert_eq!(home.troops, HOME_TROOPS, "seed {seed}");
        }
    }

    #[test]
    fn test_random_troops_in_range() {
        for seed in 0..100 {
            let mut rng = SeededRng::new(seed);
            let board = Board::initialize(&TERRITORY_NAMES, &mut rng).unwrap();
            assert_eq!(board.len(), NUM_TERRITORIES);
            for (_, t) in board.iter() {
                assert!((MIN_START_TROOPS..=MAX_START_TROOPS).contains(&t.troops));
            }
            assert_eq!(board.summary().total(), NUM_TERRITORIES);
        }
    }

    #[test]
    fn test_draw_order_owner_then_troops() {
        // owner index, troops — per territory
        let mut script = Vec::new();
        for i in 0..NUM_TERRITORIES as u32 {
            script.push(i % 5);
            script.push(i % 5 + 1);
        }
        let mut rng = ScriptedRng::new(script);
        let board = Board::initialize(&TERRITORY_NAMES, &mut rng).unwrap();
        assert_eq!(rng.remaining(), 0);

        // Brazil drew owner 1 (Red) and 2 troops
        let brazil = board.territory(BRAZIL);
        assert_eq!(brazil.name(), "Brazil");
        assert_eq!(brazil.owner, Faction::Red);
        assert_eq!(brazil.troops, 2);
        // Sudan drew owner 4 (Purple) and 5 troops
        assert_eq!(board.territory(SUDAN).owner, Faction::Purple);
        assert_eq!(board.territory(SUDAN).troops, 5);
    }

    #[test]
    fn test_home_override_beats_draw() {
        // Alaska draws Purple with 5 troops; the override wins.
        let mut script = vec![4, 5];
        script.extend(std::iter::repeat(1).take(2 * (NUM_TERRITORIES - 1)));
        let mut rng = ScriptedRng::new(script);
        let board = Board::initialize(&TERRITORY_NAMES, &mut rng).unwrap();
        assert_eq!(board.territory(ALASKA).owner, Faction::Blue);
        assert_eq!(board.territory(ALASKA).troops, 3);
    }

    #[test]
    fn test_rejects_bad_names() {
        let mut rng = SeededRng::new(1);
        let short = ["A", "B", "C"];
        assert!(matches!(
            Board::initialize(&short, &mut rng),
            Err(GameError::InvalidTerritoryNames { got: 3 })
        ));

        let mut dup = TERRITORY_NAMES;
        dup[9] = dup[0];
        assert!(matches!(
            Board::initialize(&dup, &mut rng),
            Err(GameError::InvalidTerritoryNames { got: 9 })
        ));
    }

    #[test]
    fn test_deserialized_board_is_checked() {
        let short = r#"{"territories":[
            {"name":"A","owner":"Blue","troops":3},
            {"name":"A","owner":"Red","troops":1}
        ]}"#;
        let err = serde_json::from_str::<Board>(short).unwrap_err();
        assert!(err.to_string().contains("exactly 10 unique territory names"), "{err}");

        let board = Board::initialize(&TERRITORY_NAMES, &mut SeededRng::new(3)).unwrap();
        let mut json = serde_json::to_value(&board).unwrap();
        json["territories"][9]["name"] = "Alaska".into();
        assert!(serde_json::from_value::<Board>(json).is_err());

        let text = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&text).unwrap(), board);
    }

    #[test]
    fn test_create_game_deterministic_seed() {
        let g1 = create_game(SeededRng::new(123)).unwrap();
        let g2 = create_game(SeededRng::new(123)).unwrap();
        assert_eq!(g1.board(), g2.board());
        assert_eq!(g1.mission(), g2.mission());
    }
}
