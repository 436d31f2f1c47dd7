//! Match resolution from a 0-100 score split

use crate::error::BattleError;
use crate::types::{Match, MatchResult};

/// Total points shared between the two sides of a match.
pub const SPLIT_TOTAL: u8 = 100;

/// How a participant divided 100 points between competitor A and B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSplit {
    score_a: u8,
    score_b: u8,
}

impl ScoreSplit {
    /// Build a split, rejecting scores that don't sum to 100.
    pub fn new(score_a: u8, score_b: u8) -> Result<Self, BattleError> {
        if u16::from(score_a) + u16::from(score_b) != u16::from(SPLIT_TOTAL) {
            return Err(BattleError::InvalidSplit { score_a, score_b });
        }
        Ok(Self { score_a, score_b })
    }

    /// Split from a position on a bipolar scale.
    ///
    /// `0.0` gives everything to A, `100.0` everything to B. Out of range and
    /// NaN positions are clamped (NaN maps to the midpoint). B's share is
    /// rounded and A takes the remainder, so the sum is always exactly 100.
    pub fn from_position(position: f64) -> Self {
        let position = if position.is_nan() {
            50.0
        } else {
            position.clamp(0.0, 100.0)
        };
        let score_b = position.round() as u8;
        Self {
            score_a: SPLIT_TOTAL - score_b,
            score_b,
        }
    }

    /// All points to competitor A.
    pub fn all_a() -> Self {
        Self { score_a: SPLIT_TOTAL, score_b: 0 }
    }

    /// All points to competitor B.
    pub fn all_b() -> Self {
        Self { score_a: 0, score_b: SPLIT_TOTAL }
    }

    pub fn even() -> Self {
        Self { score_a: 50, score_b: 50 }
    }

    pub fn score_a(&self) -> u8 {
        self.score_a
    }

    pub fn score_b(&self) -> u8 {
        self.score_b
    }
}

/// Resolve a match with the given split.
///
/// The winner is A when `score_a >= score_b`; an exact 50/50 favours A.
pub fn resolve(m: &Match, split: ScoreSplit) -> MatchResult {
    MatchResult {
        competitor_a: m.competitor_a.clone(),
        competitor_b: m.competitor_b.clone(),
        score_a: split.score_a,
        score_b: split.score_b,
    }
}
