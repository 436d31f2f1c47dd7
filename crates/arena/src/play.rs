//! Interactive play loop
//!
//! Reads one command per line. The loop is generic over its input and output
//! so tests can drive it with in-memory buffers.

use battle_core::{ScoreSplit, Session};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// A parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Vote(ScoreSplit),
    Undo,
    Quit,
    Help,
    Invalid(String),
}

/// How a play loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Completed,
    /// The player quit or input ran out before the last match
    Abandoned,
}

pub const PLAY_HELP: &str = "\
Commands:
  0-100     slider position: 0 gives every point to A, 100 to B
  70/30     explicit split (A/B, must sum to 100)
  a | b     all points to A or B
  =         even 50/50 split
  u         undo the last vote
  q         quit without saving
";

/// Parse one line of input.
pub fn parse_command(line: &str) -> PlayCommand {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "a" => return PlayCommand::Vote(ScoreSplit::all_a()),
        "b" => return PlayCommand::Vote(ScoreSplit::all_b()),
        "=" => return PlayCommand::Vote(ScoreSplit::even()),
        "u" | "undo" => return PlayCommand::Undo,
        "q" | "quit" => return PlayCommand::Quit,
        "h" | "help" | "?" => return PlayCommand::Help,
        _ => {}
    }

    if let Some((a, b)) = line.split_once('/') {
        return match (a.trim().parse::<u8>(), b.trim().parse::<u8>()) {
            (Ok(a), Ok(b)) => match ScoreSplit::new(a, b) {
                Ok(split) => PlayCommand::Vote(split),
                Err(e) => PlayCommand::Invalid(e.to_string()),
            },
            _ => PlayCommand::Invalid(format!("could not read split {line:?}")),
        };
    }

    match line.parse::<f64>() {
        Ok(position) if (0.0..=100.0).contains(&position) => {
            PlayCommand::Vote(ScoreSplit::from_position(position))
        }
        Ok(_) => PlayCommand::Invalid("slider position must be between 0 and 100".to_string()),
        Err(_) => PlayCommand::Invalid(format!("unknown command {line:?}")),
    }
}

fn print_prompt<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let Some(m) = session.current_match() else {
        return Ok(());
    };
    writeln!(out)?;
    writeln!(
        out,
        "[{}] Match {} of {} ({}%)",
        session.stage(),
        session.match_number(),
        session.total_matches(),
        session.progress()
    )?;
    writeln!(out, "  A: {}", describe(&m.competitor_a))?;
    writeln!(out, "  B: {}", describe(&m.competitor_b))?;
    write!(out, "> ")?;
    out.flush()
}

fn describe(c: &battle_core::Competitor) -> String {
    if c.description.is_empty() {
        c.title.clone()
    } else {
        format!("{} - {}", c.title, c.description)
    }
}

fn print_save_prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "All matches done. Press enter to save, u to undo the last vote: ")?;
    out.flush()
}

/// Run `session` to completion, reading commands from `input`.
///
/// After the last vote only an empty line saves; `u` undoes it and any other
/// input repeats the save prompt. Input running out at that point counts as
/// confirmation.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
) -> io::Result<PlayOutcome> {
    writeln!(out, "Player: {}", session.player_name())?;
    writeln!(out, "Type h for help.")?;
    print_prompt(session, out)?;

    for line in input.lines() {
        let line = line?;

        if session.is_complete() {
            if line.trim().is_empty() {
                return Ok(PlayOutcome::Completed);
            }
            match parse_command(&line) {
                PlayCommand::Undo => {
                    session.undo();
                    writeln!(out, "Undid last vote.")?;
                    print_prompt(session, out)?;
                }
                PlayCommand::Quit => return Ok(PlayOutcome::Abandoned),
                _ => print_save_prompt(out)?,
            }
            continue;
        }

        match parse_command(&line) {
            PlayCommand::Vote(split) => match session.record(split) {
                Ok(result) => {
                    writeln!(
                        out,
                        "{} wins ({}-{})",
                        result.winner().title,
                        result.score_a.max(result.score_b),
                        result.score_a.min(result.score_b)
                    )?;
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            PlayCommand::Undo => {
                if session.undo().is_some() {
                    writeln!(out, "Undid last vote.")?;
                } else {
                    writeln!(out, "Nothing to undo.")?;
                }
            }
            PlayCommand::Quit => {
                debug!(player = session.player_name(), "player quit");
                return Ok(PlayOutcome::Abandoned);
            }
            PlayCommand::Help => write!(out, "{PLAY_HELP}")?,
            PlayCommand::Invalid(msg) => writeln!(out, "{msg}")?,
        }

        if session.is_complete() {
            print_save_prompt(out)?;
        } else {
            print_prompt(session, out)?;
        }
    }

    if session.is_complete() {
        Ok(PlayOutcome::Completed)
    } else {
        Ok(PlayOutcome::Abandoned)
    }
}

#[cfg(test)]
#[path = "play_tests.rs"]
mod play_tests;
