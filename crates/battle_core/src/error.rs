use thiserror::Error;

use crate::types::CompetitorId;

/// Errors raised by session and arena operations.
///
/// Degenerate inputs the engine tolerates (an empty schedule, unknown
/// competitor ids in stored sessions, missing score entries) are not errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BattleError {
    #[error("an arena needs at least 2 competitors, found {found}")]
    NotEnoughCompetitors { found: usize },

    #[error("score split {score_a}/{score_b} does not sum to 100")]
    InvalidSplit { score_a: u8, score_b: u8 },

    #[error("all scheduled matches have already been resolved")]
    SessionComplete,

    #[error("session still has {remaining} unresolved matches")]
    SessionIncomplete { remaining: usize },

    #[error("arena {arena_id} is closed for new responses")]
    ArenaClosed { arena_id: String },

    #[error("duplicate competitor id: {id}")]
    DuplicateCompetitor { id: CompetitorId },
}
