// ═══════════════════════════════════════════════════════════════════════
// Render — every line of game text the console prints
// ═══════════════════════════════════════════════════════════════════════

use std::io::{self, Write};

use war_engine::combat::{BattleReport, Side};
use war_engine::{Board, Faction, FactionCounts, Game, Mission, RandomSource};

const RULE: &str = "========================================";

fn boxed(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "{title:^40}")?;
    writeln!(out, "{RULE}")
}

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    boxed(out, "STRUCTURED WAR")?;
    writeln!(out)
}

pub fn welcome(out: &mut impl Write, player: Faction) -> io::Result<()> {
    writeln!(out, "You are the {player} army!")?;
    writeln!(out, "Secret mission drawn!")?;
    writeln!(out)
}

pub fn turn_header(out: &mut impl Write) -> io::Result<()> {
    boxed(out, "YOUR TURN")?;
    writeln!(out)
}

pub fn map(out: &mut impl Write, board: &Board, player: Faction) -> io::Result<()> {
    boxed(out, "CURRENT MAP")?;
    writeln!(out, "ID  | TERRITORY      | OWNER    | TROOPS")?;
    writeln!(out, "----|----------------|----------|-------")?;
    for (id, t) in board.iter() {
        let marker = if t.owner == player { "▶" } else { " " };
        writeln!(
            out,
            "{:<3} | {:<14} | {:<8} | {} {}",
            id.0,
            t.name(),
            t.owner.label(),
            t.troops,
            marker
        )?;
    }
    writeln!(out, "{RULE}")
}

pub fn summary(out: &mut impl Write, counts: &FactionCounts) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "DOMINATION SUMMARY:")?;
    for (faction, n) in counts.iter() {
        writeln!(out, "{:<8}: {} territories", faction.label(), n)?;
    }
    Ok(())
}

pub fn mission(out: &mut impl Write, mission: &Mission) -> io::Result<()> {
    boxed(out, "YOUR MISSION")?;
    writeln!(out, "{}", mission.title())?;
    writeln!(out, "{}", mission.detail())?;
    writeln!(out, "{RULE}")
}

pub fn menu(out: &mut impl Write) -> io::Result<()> {
    boxed(out, "MENU")?;
    writeln!(out, "1. Attack Phase")?;
    writeln!(out, "2. Check Mission")?;
    writeln!(out, "0. Quit Game")?;
    writeln!(out, "{RULE}")
}

/// Full status screen shown at the top of every turn.
pub fn turn_screen<R: RandomSource>(out: &mut impl Write, game: &Game<R>) -> io::Result<()> {
    turn_header(out)?;
    map(out, game.board(), game.player())?;
    summary(out, &game.board().summary())?;
    writeln!(out)?;
    mission(out, &game.mission())?;
    writeln!(out)?;
    menu(out)
}

pub fn attack_options<R: RandomSource>(out: &mut impl Write, game: &Game<R>) -> io::Result<()> {
    writeln!(out)?;
    boxed(out, "ATTACK PHASE")?;
    writeln!(out)?;

    let board = game.board();
    writeln!(out, "Your territories available to attack from:")?;
    for id in game.eligible_origins() {
        let t = board.territory(id);
        writeln!(out, "ID {}: {} ({} troops)", id, t.name(), t.troops)?;
    }

    writeln!(out)?;
    writeln!(out, "Enemy territories available:")?;
    for id in game.eligible_targets() {
        let t = board.territory(id);
        writeln!(out, "ID {}: {} ({}, {} troops)", id, t.name(), t.owner.label(), t.troops)?;
    }
    Ok(())
}

fn dice_line(out: &mut impl Write, who: &str, dice: &[u8]) -> io::Result<()> {
    write!(out, "{who} ({} dice): ", dice.len())?;
    for d in dice {
        write!(out, "{d} ")?;
    }
    writeln!(out)
}

/// Battle narration. `board` is the state after the battle.
pub fn battle_report(out: &mut impl Write, board: &Board, report: &BattleReport) -> io::Result<()> {
    let origin = board.territory(report.origin).name();
    let destination = board.territory(report.destination).name();

    writeln!(out)?;
    boxed(out, "ATTACK SIMULATION")?;
    writeln!(out)?;
    writeln!(
        out,
        "{} ({}, {} troops) attacks {} ({}, {} troops)",
        origin,
        report.attacker.label(),
        report.origin_troops_before,
        destination,
        report.defender.label(),
        report.destination_troops_before
    )?;

    writeln!(out)?;
    writeln!(out, "ROLLING DICE...")?;
    dice_line(out, "Attacker", &report.attacker_rolls)?;
    dice_line(out, "Defender", &report.defender_rolls)?;

    writeln!(out)?;
    writeln!(out, "COMPARISON:")?;
    for (i, ex) in report.exchanges.iter().enumerate() {
        let loser = match ex.loser {
            Side::Attacker => "Attacker",
            Side::Defender => "Defender",
        };
        writeln!(
            out,
            "Die {}: Attacker {} vs Defender {} - {} loses 1 troop",
            i + 1,
            ex.attacker_die,
            ex.defender_die,
            loser
        )?;
    }

    writeln!(out)?;
    writeln!(out, "RESULT:")?;
    writeln!(out, "{}: {} troops remaining", origin, report.origin_troops_after_losses)?;
    writeln!(out, "{}: {} troops remaining", destination, report.destination_troops_after_losses)?;

    writeln!(out)?;
    match report.conquest {
        Some(conquest) => {
            writeln!(out, "VICTORY! {destination} has been conquered!")?;
            if conquest.transferred > 0 {
                writeln!(
                    out,
                    "{} troops moved from {} to {}",
                    conquest.transferred, origin, destination
                )?;
            }
        }
        None => writeln!(out, "The attack failed to conquer the territory.")?,
    }
    Ok(())
}

pub fn victory(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    boxed(out, "CONGRATULATIONS! MISSION COMPLETE!")?;
    writeln!(out)
}

pub fn mission_pending(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "You have not completed your mission yet.")?;
    writeln!(out, "Keep fighting!")
}

pub fn farewell(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Thanks for playing Structured War!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use war_engine::map::TERRITORY_NAMES;
    use war_engine::Territory;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_map_marks_player_rows() {
        let territories = TERRITORY_NAMES
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let owner = if i % 2 == 0 { Faction::Blue } else { Faction::Red };
                Territory::new(*n, owner, i as u32 + 1)
            })
            .collect();
        let board = Board::from_territories(territories).unwrap();
        let text = rendered(|out| map(out, &board, Faction::Blue));

        assert!(text.contains("0   | Alaska         | BLUE     | 1 ▶"));
        assert!(text.contains("1   | Brazil         | RED      | 2  "));
        assert_eq!(text.matches('▶').count(), 5);

        let text = rendered(|out| summary(out, &board.summary()));
        assert!(text.contains("BLUE    : 5 territories"));
        assert!(text.contains("PURPLE  : 0 territories"));
    }

    #[test]
    fn test_mission_box() {
        let text = rendered(|out| mission(out, &Mission::Eliminate(Faction::Yellow)));
        assert!(text.contains("DESTROY the YELLOW army"));
        assert!(text.contains("(Conquer every yellow territory)"));
    }
}
