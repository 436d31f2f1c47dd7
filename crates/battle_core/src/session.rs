//! One participant's pass through a schedule
//!
//! Totals are always recomputed from the result list, never adjusted in
//! place, so undo cannot leave a stale accumulator behind.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::BattleError;
use crate::resolve::{resolve, ScoreSplit};
use crate::schedule::{progress_percent, stage_for, Stage};
use crate::types::{Competitor, CompetitorId, Match, MatchResult, SessionArtifact, StoredMatchResult};

/// Sum each competitor's scores across `results`.
///
/// Competitors that appear in no result are absent from the map; callers
/// treat a missing key as zero.
pub fn accumulate(results: &[MatchResult]) -> HashMap<CompetitorId, u32> {
    let mut scores = HashMap::new();
    for result in results {
        *scores.entry(result.competitor_a.id.clone()).or_insert(0) += u32::from(result.score_a);
        *scores.entry(result.competitor_b.id.clone()).or_insert(0) += u32::from(result.score_b);
    }
    scores
}

/// A competitor's placing within a single session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub competitor: Competitor,
    pub score: u32,
    /// 1-based
    pub rank: u32,
}

/// Rank the roster by session score, highest first.
///
/// Competitors missing from `scores` get 0. Equal scores keep roster order.
pub fn standings(scores: &HashMap<CompetitorId, u32>, competitors: &[Competitor]) -> Vec<Standing> {
    let mut rows: Vec<(Competitor, u32)> = competitors
        .iter()
        .map(|c| (c.clone(), scores.get(&c.id).copied().unwrap_or(0)))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));

    rows.into_iter()
        .enumerate()
        .map(|(i, (competitor, score))| Standing {
            competitor,
            score,
            rank: i as u32 + 1,
        })
        .collect()
}

/// An interactive session: a fixed schedule consumed one match at a time.
#[derive(Debug, Clone)]
pub struct Session {
    player_name: String,
    schedule: Vec<Match>,
    results: Vec<MatchResult>,
    scores: HashMap<CompetitorId, u32>,
}

impl Session {
    pub fn new(player_name: impl Into<String>, schedule: Vec<Match>) -> Self {
        Self {
            player_name: player_name.into(),
            schedule,
            results: Vec::new(),
            scores: HashMap::new(),
        }
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn schedule(&self) -> &[Match] {
        &self.schedule
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    /// Running totals for the matches resolved so far.
    pub fn scores(&self) -> &HashMap<CompetitorId, u32> {
        &self.scores
    }

    pub fn score_of(&self, id: &CompetitorId) -> u32 {
        self.scores.get(id).copied().unwrap_or(0)
    }

    pub fn total_matches(&self) -> usize {
        self.schedule.len()
    }

    pub fn completed_count(&self) -> usize {
        self.results.len()
    }

    pub fn is_complete(&self) -> bool {
        self.results.len() >= self.schedule.len()
    }

    /// The next match to resolve, or `None` once the session is complete.
    pub fn current_match(&self) -> Option<&Match> {
        self.schedule.get(self.results.len())
    }

    /// 1-based number of the current match.
    pub fn match_number(&self) -> usize {
        (self.results.len() + 1).min(self.schedule.len())
    }

    pub fn progress(&self) -> u32 {
        progress_percent(self.completed_count(), self.total_matches())
    }

    pub fn stage(&self) -> Stage {
        stage_for(self.match_number(), self.total_matches())
    }

    pub fn can_undo(&self) -> bool {
        !self.results.is_empty()
    }

    /// Resolve the current match with `split` and move on to the next.
    pub fn record(&mut self, split: ScoreSplit) -> Result<&MatchResult, BattleError> {
        let index = self.results.len();
        let current = self.schedule.get_mut(index).ok_or(BattleError::SessionComplete)?;

        let result = resolve(current, split);
        current.mark_completed();
        debug!(
            match_id = %current.id,
            winner = %result.winner().id,
            score_a = result.score_a,
            score_b = result.score_b,
            "match resolved"
        );

        self.results.push(result);
        self.scores = accumulate(&self.results);
        Ok(&self.results[index])
    }

    /// Remove the most recent result and recompute totals without it.
    pub fn undo(&mut self) -> Option<MatchResult> {
        let undone = self.results.pop()?;
        if let Some(m) = self.schedule.get_mut(self.results.len()) {
            m.completed = false;
        }
        self.scores = accumulate(&self.results);
        debug!(remaining = self.results.len(), "undid last match");
        Some(undone)
    }

    /// Per-session ranking of `competitors` by the current totals.
    pub fn standings(&self, competitors: &[Competitor]) -> Vec<Standing> {
        standings(&self.scores, competitors)
    }

    /// Produce the artifact handed to persistence.
    ///
    /// Fails while any scheduled match is unresolved.
    pub fn finish(&self, arena_id: &str) -> Result<SessionArtifact, BattleError> {
        if !self.is_complete() {
            return Err(BattleError::SessionIncomplete {
                remaining: self.schedule.len() - self.results.len(),
            });
        }

        info!(
            arena = arena_id,
            player = %self.player_name,
            matches = self.results.len(),
            "session complete"
        );

        Ok(SessionArtifact {
            id: Uuid::new_v4(),
            arena_id: arena_id.to_string(),
            player_name: self.player_name.clone(),
            results: self.results.iter().map(StoredMatchResult::from).collect(),
            final_scores: self.scores.iter().map(|(id, &s)| (id.clone(), s)).collect(),
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
