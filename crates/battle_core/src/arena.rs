//! Arena definition and the gate for starting sessions

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

use crate::error::BattleError;
use crate::schedule::generate_schedule_with_rng;
use crate::session::Session;
use crate::types::Competitor;

fn default_open() -> bool {
    true
}

/// A moderator-defined set of competing items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arena {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Closed arenas accept no new sessions
    #[serde(default = "default_open", alias = "is_open")]
    pub is_open: bool,
    #[serde(default)]
    pub items: Vec<Competitor>,
}

impl Arena {
    pub fn new(id: impl Into<String>, title: impl Into<String>, items: Vec<Competitor>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            is_open: true,
            items,
        }
    }

    /// Check that competitor ids are unique.
    pub fn validate(&self) -> Result<(), BattleError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(&item.id) {
                return Err(BattleError::DuplicateCompetitor { id: item.id.clone() });
            }
        }
        Ok(())
    }

    /// Start a session for `player_name` with a freshly generated schedule.
    ///
    /// Fails when the arena is closed or has fewer than 2 competitors.
    pub fn start_session<R: Rng + ?Sized>(
        &self,
        player_name: &str,
        rng: &mut R,
    ) -> Result<Session, BattleError> {
        if !self.is_open {
            return Err(BattleError::ArenaClosed {
                arena_id: self.id.clone(),
            });
        }
        self.validate()?;

        let schedule = generate_schedule_with_rng(&self.items, rng);
        if schedule.is_empty() {
            return Err(BattleError::NotEnoughCompetitors {
                found: self.items.len(),
            });
        }

        info!(
            arena = %self.id,
            player = player_name,
            matches = schedule.len(),
            "session started"
        );
        Ok(Session::new(player_name, schedule))
    }
}
