//! Cross-session leaderboard aggregation

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::types::{Competitor, CompetitorId, SessionArtifact};

/// Aggregated statistics for one competitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedScore {
    pub competitor_id: CompetitorId,
    /// Sum of the competitor's final score over all sessions
    pub total_score: u64,
    /// Sessions in which the competitor had the highest final score
    pub win_count: u32,
    /// Sessions whose score mapping mentions the competitor
    pub session_count: u32,
    /// 1-based position by total score
    pub rank: u32,
}

impl AggregatedScore {
    fn new(competitor_id: CompetitorId) -> Self {
        Self {
            competitor_id,
            total_score: 0,
            win_count: 0,
            session_count: 0,
            rank: 0,
        }
    }
}

/// A leaderboard row: display fields plus aggregated stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardItem {
    #[serde(flatten)]
    pub competitor: Competitor,
    pub stats: AggregatedScore,
}

/// Aggregate finished sessions into a ranked leaderboard.
pub fn aggregate(sessions: &[SessionArtifact], competitors: &[Competitor]) -> Vec<LeaderboardItem> {
    aggregate_scores(sessions.iter().map(|s| &s.final_scores), competitors)
}

/// Aggregate bare per-session score mappings.
///
/// Every roster competitor starts at zero; ids outside the roster are never
/// scored. Each session credits one win to its highest scorer, ties going to
/// the lowest competitor id. Rows are sorted by total score descending, equal
/// totals keeping roster order.
pub fn aggregate_scores<'a, I>(score_maps: I, competitors: &[Competitor]) -> Vec<LeaderboardItem>
where
    I: IntoIterator<Item = &'a BTreeMap<CompetitorId, u32>>,
{
    let mut stats: Vec<AggregatedScore> = Vec::with_capacity(competitors.len());
    let mut index: HashMap<&CompetitorId, usize> = HashMap::with_capacity(competitors.len());
    for competitor in competitors {
        if !index.contains_key(&competitor.id) {
            index.insert(&competitor.id, stats.len());
            stats.push(AggregatedScore::new(competitor.id.clone()));
        }
    }

    let mut sessions = 0usize;
    for scores in score_maps {
        sessions += 1;
        // (stats index, score) of the session leader
        let mut leader: Option<(usize, u32)> = None;

        // BTreeMap iterates in ascending id order, so a strict `>` keeps the
        // lowest id on ties.
        for (id, &score) in scores {
            let Some(&i) = index.get(id) else {
                warn!(id = %id, "session references a competitor outside the roster");
                continue;
            };
            stats[i].total_score += u64::from(score);
            stats[i].session_count += 1;
            if leader.map_or(true, |(_, best)| score > best) {
                leader = Some((i, score));
            }
        }

        if let Some((i, _)) = leader {
            stats[i].win_count += 1;
        }
    }

    stats.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    for (position, entry) in stats.iter_mut().enumerate() {
        entry.rank = position as u32 + 1;
    }

    debug!(sessions, competitors = stats.len(), "aggregated leaderboard");

    stats
        .into_iter()
        .map(|entry| LeaderboardItem {
            competitor: display_competitor(&entry.competitor_id, competitors),
            stats: entry,
        })
        .collect()
}

/// Display fields for `id`, or an "Unknown Item" stub when it has left the roster.
pub fn display_competitor(id: &CompetitorId, competitors: &[Competitor]) -> Competitor {
    competitors
        .iter()
        .find(|c| c.id == *id)
        .cloned()
        .unwrap_or_else(|| Competitor::unknown(id.clone()))
}

#[cfg(test)]
#[path = "leaderboard_tests.rs"]
mod leaderboard_tests;
