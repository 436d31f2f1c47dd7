//! Core battle types: competitors, matches and resolved results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Identity of a competitor, unique within an arena.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitorId(String);

impl CompetitorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompetitorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CompetitorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An item taking part in an arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub id: CompetitorId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "image_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, alias = "video_url", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl Competitor {
    pub fn new(id: impl Into<CompetitorId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            image_url: None,
            video_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_video(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    /// Copy of this competitor without its image, as written to session storage.
    pub fn without_image(&self) -> Self {
        Self {
            image_url: None,
            ..self.clone()
        }
    }

    /// Placeholder for an id that no longer exists in the roster.
    pub fn unknown(id: CompetitorId) -> Self {
        Self::new(id, "Unknown Item")
    }
}

/// A scheduled pairing of two distinct competitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Stable id, `match-<n>` in pair enumeration order
    pub id: String,
    /// Display grouping only; carries no scheduling meaning
    pub round: u32,
    pub competitor_a: Competitor,
    pub competitor_b: Competitor,
    pub completed: bool,
}

impl Match {
    pub fn involves(&self, id: &CompetitorId) -> bool {
        self.competitor_a.id == *id || self.competitor_b.id == *id
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}

/// A resolved match.
///
/// `score_a + score_b == 100` is guaranteed by [`crate::ScoreSplit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub competitor_a: Competitor,
    pub competitor_b: Competitor,
    pub score_a: u8,
    pub score_b: u8,
}

impl MatchResult {
    /// Competitor with the higher score. A 50/50 tie goes to competitor A.
    pub fn winner(&self) -> &Competitor {
        if self.score_a >= self.score_b {
            &self.competitor_a
        } else {
            &self.competitor_b
        }
    }

    pub fn loser(&self) -> &Competitor {
        if self.score_a >= self.score_b {
            &self.competitor_b
        } else {
            &self.competitor_a
        }
    }

    pub fn is_tie(&self) -> bool {
        self.score_a == self.score_b
    }
}

/// A match result as persisted: competitor images are stripped and the
/// derived winner and loser are written out explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMatchResult {
    pub competitor_a: Competitor,
    pub competitor_b: Competitor,
    pub score_a: u8,
    pub score_b: u8,
    pub winner: Competitor,
    pub loser: Competitor,
}

impl From<&MatchResult> for StoredMatchResult {
    fn from(result: &MatchResult) -> Self {
        Self {
            competitor_a: result.competitor_a.without_image(),
            competitor_b: result.competitor_b.without_image(),
            score_a: result.score_a,
            score_b: result.score_b,
            winner: result.winner().without_image(),
            loser: result.loser().without_image(),
        }
    }
}

/// Final artifact of one completed session, handed to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionArtifact {
    pub id: Uuid,
    pub arena_id: String,
    pub player_name: String,
    pub results: Vec<StoredMatchResult>,
    /// Accumulated score per competitor. Competitors that never played are absent.
    pub final_scores: BTreeMap<CompetitorId, u32>,
    pub completed_at: DateTime<Utc>,
}

impl SessionArtifact {
    /// Score for a competitor in this session; missing entries count as zero.
    pub fn score_of(&self, id: &CompetitorId) -> u32 {
        self.final_scores.get(id).copied().unwrap_or(0)
    }
}
