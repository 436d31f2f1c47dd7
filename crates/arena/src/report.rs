//! Plain-text reports

use battle_core::{LeaderboardItem, Match, SessionArtifact, Standing};

/// Schedule table, one line per match.
pub fn schedule_report(title: &str, schedule: &[Match]) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== Schedule: {} ===\n\n", title));

    if schedule.is_empty() {
        report.push_str("Not enough competitors to start a session.\n");
        return report;
    }

    report.push_str(&format!(
        "{:<6} {:<10} {:<24} vs {:<24}\n",
        "Round", "Match", "Competitor A", "Competitor B"
    ));
    report.push_str(&"-".repeat(70));
    report.push('\n');

    for m in schedule {
        report.push_str(&format!(
            "{:<6} {:<10} {:<24} vs {:<24}\n",
            m.round, m.id, m.competitor_a.title, m.competitor_b.title
        ));
    }
    report.push_str(&format!("\n{} matches\n", schedule.len()));
    report
}

/// Standings for one finished session.
pub fn standings_report(player_name: &str, standings: &[Standing]) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== Results for {} ===\n\n", player_name));
    report.push_str(&format!("{:<6} {:<30} {:>8}\n", "Rank", "Competitor", "Score"));
    report.push_str(&"-".repeat(46));
    report.push('\n');

    for s in standings {
        report.push_str(&format!(
            "{:<6} {:<30} {:>8}\n",
            s.rank, s.competitor.title, s.score
        ));
    }
    report
}

/// Leaderboard aggregated across sessions.
pub fn leaderboard_report(title: &str, sessions: usize, items: &[LeaderboardItem]) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== Leaderboard: {} ===\n", title));
    report.push_str(&format!("Sessions: {}\n\n", sessions));

    if items.is_empty() {
        report.push_str("No results to display yet.\n");
        return report;
    }

    report.push_str(&format!(
        "{:<6} {:<30} {:>10} {:>6} {:>9}\n",
        "Rank", "Competitor", "Points", "Wins", "Sessions"
    ));
    report.push_str(&"-".repeat(65));
    report.push('\n');

    for item in items {
        report.push_str(&format!(
            "{:<6} {:<30} {:>10} {:>6} {:>9}\n",
            item.stats.rank,
            item.competitor.title,
            item.stats.total_score,
            item.stats.win_count,
            item.stats.session_count
        ));
    }
    report
}

/// Stored sessions, in the order given.
pub fn sessions_report(sessions: &[SessionArtifact]) -> String {
    let mut report = String::new();
    report.push_str(&format!("{:<20} {:<26} {:>8}\n", "Player", "Completed", "Matches"));
    report.push_str(&"-".repeat(56));
    report.push('\n');

    for s in sessions {
        report.push_str(&format!(
            "{:<20} {:<26} {:>8}\n",
            s.player_name,
            s.completed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            s.results.len()
        ));
    }
    report
}
