// ═══════════════════════════════════════════════════════════════════════
// Session — the interactive loop
//
// Reads lines from any BufRead, writes to any Write, and drives the
// engine's turn controller. End of input at any prompt quits the game.
// ═══════════════════════════════════════════════════════════════════════

use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use tracing::{debug, warn};

use war_engine::{Command, Game, GameError, GameResult, Outcome, RandomSource};

use crate::render;

pub struct Session<R, I, O> {
    game: Game<R>,
    input: I,
    output: O,
    clear_screen: bool,
}

impl<R: RandomSource, I: BufRead, O: Write> Session<R, I, O> {
    pub fn new(game: Game<R>, input: I, output: O, clear_screen: bool) -> Self {
        Session {
            game,
            input,
            output,
            clear_screen,
        }
    }

    /// Hand back the game and the output stream.
    pub fn finish(self) -> (Game<R>, O) {
        (self.game, self.output)
    }

    /// Play until the mission is met, the player quits, or input ends.
    pub fn run(&mut self) -> io::Result<Outcome> {
        render::banner(&mut self.output)?;
        render::welcome(&mut self.output, self.game.player())?;

        while !self.game.is_over() {
            if self.clear_screen {
                execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
            }
            render::turn_screen(&mut self.output, &self.game)?;

            let Some(line) = self.prompt("Choose an action: ")? else {
                self.end_of_input()?;
                break;
            };

            match Command::parse(&line) {
                Ok(Command::Attack) => self.attack_phase()?,
                Ok(Command::CheckMission) => self.mission_check()?,
                Ok(Command::Quit) => {
                    self.quit()?;
                    writeln!(self.output, "\nEnding the game...")?;
                }
                Err(err) => {
                    warn!(error = %err, "menu input rejected");
                    writeln!(self.output, "\nInvalid option! Try again.")?;
                }
            }

            if !self.game.is_over() && self.prompt("\nPress Enter to continue...")?.is_none() {
                self.end_of_input()?;
            }
        }

        render::farewell(&mut self.output)?;
        self.output.flush()?;
        Ok(self.game.outcome().unwrap_or(Outcome::Quit))
    }

    /// Print `text` and read one line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_id(&mut self, text: &str) -> io::Result<Option<GameResult<i64>>> {
        Ok(self.prompt(text)?.map(|raw| {
            raw.parse::<i64>().map_err(|_| {
                let err = GameError::NotANumber(raw);
                warn!(error = %err, "id input rejected");
                err
            })
        }))
    }

    fn attack_phase(&mut self) -> io::Result<()> {
        if let Err(err) = self.game.begin_attack() {
            return self.report(&err);
        }
        render::attack_options(&mut self.output, &self.game)?;

        let Some(origin) = self.prompt_id("\nSelect the ORIGIN territory (ID): ")? else {
            self.game.cancel_attack();
            return self.end_of_input();
        };
        if let Err(err) = origin.and_then(|raw| self.game.choose_origin(raw)) {
            self.game.cancel_attack();
            writeln!(self.output, "Invalid origin territory!")?;
            return self.report(&err);
        }

        let Some(destination) = self.prompt_id("Select the DESTINATION territory (ID): ")? else {
            self.game.cancel_attack();
            return self.end_of_input();
        };
        match destination.and_then(|raw| self.game.choose_destination(raw)) {
            Ok(report) => render::battle_report(&mut self.output, self.game.board(), &report),
            Err(err) => {
                self.game.cancel_attack();
                writeln!(self.output, "Invalid destination territory!")?;
                self.report(&err)
            }
        }
    }

    fn mission_check(&mut self) -> io::Result<()> {
        match self.game.check_mission() {
            Ok(true) => render::victory(&mut self.output),
            Ok(false) => render::mission_pending(&mut self.output),
            Err(err) => self.report(&err),
        }
    }

    fn quit(&mut self) -> io::Result<()> {
        match self.game.quit() {
            Ok(()) => Ok(()),
            Err(err) => self.report(&err),
        }
    }

    fn end_of_input(&mut self) -> io::Result<()> {
        debug!("input closed");
        writeln!(self.output)?;
        self.quit()
    }

    fn report(&mut self, err: &GameError) -> io::Result<()> {
        writeln!(self.output, "{err}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};
    use war_engine::map::*;
    use war_engine::{Board, Faction, Mission, ScriptedRng, SeededRng, Territory};

    use Faction::*;

    fn scripted_game(mission: Mission, dice: &[u32]) -> Game<ScriptedRng> {
        let layout = [
            (Blue, 4), (Blue, 1), (Red, 1), (Red, 3), (Green, 2),
            (Green, 5), (Yellow, 1), (Yellow, 2), (Purple, 4), (Purple, 1),
        ];
        let territories = TERRITORY_NAMES
            .iter()
            .zip(layout)
            .map(|(name, (owner, troops))| Territory::new(*name, owner, troops))
            .collect();
        let board = Board::from_territories(territories).unwrap();
        Game::new(board, mission, Blue, ScriptedRng::new(dice.iter().copied()))
    }

    fn play<R: RandomSource>(game: Game<R>, input: &str) -> (Outcome, Game<R>, String) {
        let mut session = Session::new(game, Cursor::new(input.to_string()), Vec::new(), false);
        let outcome = session.run().unwrap();
        let (game, out) = session.finish();
        (outcome, game, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_quit_immediately() {
        let (outcome, game, out) = play(scripted_game(Mission::Conquer(7), &[]), "0\n");
        assert_eq!(outcome, Outcome::Quit);
        assert_eq!(game.outcome(), Some(Outcome::Quit));
        assert!(out.contains("You are the BLUE army!"));
        assert!(out.contains("CONQUER 7 territories in total"));
        assert!(out.contains("Ending the game..."));
        assert!(out.contains("Thanks for playing Structured War!"));
        assert!(!out.contains("Press Enter"));
    }

    #[test]
    fn test_attack_conquers_and_reports() {
        let (outcome, game, out) = play(scripted_game(Mission::Conquer(7), &[6, 5, 3, 2]), "1\n0\n6\n\n0\n");
        assert_eq!(outcome, Outcome::Quit);

        assert!(out.contains("ID 0: Alaska (4 troops)"));
        assert!(!out.contains("ID 1: Brazil (1 troops)"));
        assert!(out.contains("ID 6: Japan (YELLOW, 1 troops)"));
        assert!(out.contains("Alaska (BLUE, 4 troops) attacks Japan (YELLOW, 1 troops)"));
        assert!(out.contains("Attacker (3 dice): 6 5 3 "));
        assert!(out.contains("Defender (1 dice): 2 "));
        assert!(out.contains("Die 1: Attacker 6 vs Defender 2 - Defender loses 1 troop"));
        assert!(out.contains("Japan: 0 troops remaining"));
        assert!(out.contains("VICTORY! Japan has been conquered!"));
        assert!(out.contains("3 troops moved from Alaska to Japan"));

        assert_eq!(game.board().territory(JAPAN).owner, Blue);
        assert_eq!(game.board().territory(JAPAN).troops, 4);
    }

    #[test]
    fn test_invalid_inputs_leave_board_alone() {
        let game = scripted_game(Mission::Conquer(7), &[]);
        let before = game.board().clone();
        let input = "9\n\nabc\n\n1\n1\n\n1\n0\n1\n\n1\nxyz\n\n0\n";
        let (outcome, game, out) = play(game, input);

        assert_eq!(outcome, Outcome::Quit);
        assert_eq!(game.board(), &before);
        assert_eq!(out.matches("Invalid option! Try again.").count(), 2);
        assert!(out.contains("territory 1 has only 1 troop(s)"));
        assert!(out.contains("territory 1 already belongs to you"));
        assert!(out.contains("'xyz' is not a territory id"));
        assert_eq!(out.matches("Invalid origin territory!").count(), 2);
        assert_eq!(out.matches("Invalid destination territory!").count(), 1);
    }

    #[derive(Clone, Default)]
    struct LogBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_rejected_inputs_logged_as_warnings() {
        let logs = LogBuf::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        let input = "9\n\n1\nabc\n\n1\n0\nxyz\n\n0\n";
        let (outcome, _, _) = tracing::subscriber::with_default(subscriber, || {
            play(scripted_game(Mission::Conquer(7), &[]), input)
        });
        assert_eq!(outcome, Outcome::Quit);

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("WARN"), "{text}");
        assert!(text.contains("menu input rejected"), "{text}");
        assert_eq!(text.matches("id input rejected").count(), 2, "{text}");
        assert!(text.contains("'abc' is not a territory id"), "{text}");
        assert!(text.contains("'xyz' is not a territory id"), "{text}");
    }

    #[test]
    fn test_mission_check_not_done_then_quit() {
        let (outcome, _, out) = play(scripted_game(Mission::Eliminate(Red), &[]), "2\n\n0\n");
        assert_eq!(outcome, Outcome::Quit);
        assert!(out.contains("You have not completed your mission yet."));
        assert!(out.contains("Keep fighting!"));
    }

    #[test]
    fn test_mission_check_wins() {
        let (outcome, game, out) = play(scripted_game(Mission::Conquer(2), &[]), "2\n");
        assert_eq!(outcome, Outcome::Victory);
        assert!(game.is_over());
        assert!(out.contains("CONGRATULATIONS! MISSION COMPLETE!"));
        assert!(out.contains("Thanks for playing Structured War!"));
    }

    #[test]
    fn test_end_of_input_quits() {
        let (outcome, _, out) = play(scripted_game(Mission::Conquer(7), &[]), "");
        assert_eq!(outcome, Outcome::Quit);
        assert!(out.contains("Thanks for playing"));

        // mid-attack
        let (outcome, game, _) = play(scripted_game(Mission::Conquer(7), &[]), "1\n0\n");
        assert_eq!(outcome, Outcome::Quit);
        assert_eq!(game.board().territory(ALASKA).troops, 4);
    }

    #[test]
    fn test_seeded_session_runs() {
        let game = war_engine::setup::create_game(SeededRng::new(5)).unwrap();
        let (outcome, _, out) = play(game, "2\n\n2\n\n0\n");
        assert!(out.contains("YOUR MISSION"));
        assert!(matches!(outcome, Outcome::Quit | Outcome::Victory));
    }
}
