use super::*;
use battle_core::{Arena, BattleError, Competitor, CompetitorId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Cursor;

fn session() -> Session {
    let arena = Arena::new(
        "trio",
        "Trio",
        vec![
            Competitor::new("x", "Xylophone"),
            Competitor::new("y", "Yodel").with_description("high notes"),
            Competitor::new("z", "Zither"),
        ],
    );
    arena.start_session("tester", &mut StdRng::seed_from_u64(8)).unwrap()
}

fn drive(session: &mut Session, script: &str) -> (PlayOutcome, String) {
    let mut out = Vec::new();
    let outcome = run_session(session, Cursor::new(script), &mut out).unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn test_parse_shortcuts() {
    assert_eq!(parse_command("a"), PlayCommand::Vote(ScoreSplit::all_a()));
    assert_eq!(parse_command(" B "), PlayCommand::Vote(ScoreSplit::all_b()));
    assert_eq!(parse_command("="), PlayCommand::Vote(ScoreSplit::even()));
    assert_eq!(parse_command("u"), PlayCommand::Undo);
    assert_eq!(parse_command("quit"), PlayCommand::Quit);
    assert_eq!(parse_command("?"), PlayCommand::Help);
}

#[test]
fn test_parse_splits_and_positions() {
    assert_eq!(
        parse_command("70/30"),
        PlayCommand::Vote(ScoreSplit::new(70, 30).unwrap())
    );
    assert_eq!(
        parse_command("25"),
        PlayCommand::Vote(ScoreSplit::new(75, 25).unwrap())
    );
    assert_eq!(
        parse_command("60/60"),
        PlayCommand::Invalid(BattleError::InvalidSplit { score_a: 60, score_b: 60 }.to_string())
    );
    assert!(matches!(parse_command("101"), PlayCommand::Invalid(_)));
    assert!(matches!(parse_command("x/y"), PlayCommand::Invalid(_)));
    assert!(matches!(parse_command("hello"), PlayCommand::Invalid(_)));
    assert!(matches!(parse_command(""), PlayCommand::Invalid(_)));
}

#[test]
fn test_full_session_completes() {
    let mut s = session();
    let (outcome, out) = drive(&mut s, "a\n70/30\n=\n\n");
    assert_eq!(outcome, PlayOutcome::Completed);
    assert!(s.is_complete());
    assert!(out.contains("Match 1 of 3"));
    assert!(out.contains("high notes"));
    assert!(out.contains("All matches done"));

    let total: u32 = s.scores().values().sum();
    assert_eq!(total, 300);
}

#[test]
fn test_undo_after_last_vote() {
    let mut s = session();
    let (outcome, _) = drive(&mut s, "a\na\na\nu\nb\n\n");
    assert_eq!(outcome, PlayOutcome::Completed);

    let last = s.results().last().unwrap();
    assert_eq!((last.score_a, last.score_b), (0, 100));
}

#[test]
fn test_undo_mid_session() {
    let mut s = session();
    let (outcome, out) = drive(&mut s, "u\na\nu\nb\n");
    assert_eq!(outcome, PlayOutcome::Abandoned);
    assert!(out.contains("Nothing to undo."));
    assert!(out.contains("Undid last vote."));
    assert_eq!(s.completed_count(), 1);

    let first = &s.results()[0];
    let winner: &CompetitorId = &first.winner().id;
    assert_eq!(winner, &first.competitor_b.id);
}

#[test]
fn test_quit_abandons() {
    let mut s = session();
    let (outcome, _) = drive(&mut s, "a\nq\na\na\n");
    assert_eq!(outcome, PlayOutcome::Abandoned);
    assert_eq!(s.completed_count(), 1);
}

#[test]
fn test_invalid_input_does_not_advance() {
    let mut s = session();
    let (_, out) = drive(&mut s, "maybe\n150\n");
    assert_eq!(s.completed_count(), 0);
    assert!(out.contains("unknown command"));
    assert!(out.contains("between 0 and 100"));
}

#[test]
fn test_end_of_input_after_last_vote_completes() {
    let mut s = session();
    let (outcome, _) = drive(&mut s, "a\nb\n=");
    assert_eq!(outcome, PlayOutcome::Completed);
}

#[test]
fn test_only_empty_line_confirms_after_last_vote() {
    let mut s = session();
    let (outcome, out) = drive(&mut s, "a\na\na\nh\nb\nq\n");
    // stray input after the last vote does not confirm, so quit still applies
    assert_eq!(outcome, PlayOutcome::Abandoned);
    assert_eq!(out.matches("Press enter to save").count(), 3);
    assert_eq!(s.completed_count(), 3);
    assert!(s.results().iter().all(|r| r.score_a == 100));

    let mut s = session();
    let (outcome, _) = drive(&mut s, "a\na\na\nx\n\n");
    assert_eq!(outcome, PlayOutcome::Completed);
}
