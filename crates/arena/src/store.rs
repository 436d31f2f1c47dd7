//! Session artifact storage
//!
//! Each arena gets a directory under the data root holding a single
//! `sessions.json` array.

use battle_core::{BattleError, SessionArtifact};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const SESSIONS_FILE: &str = "sessions.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid arena id {0:?}")]
    InvalidArenaId(String),

    #[error(transparent)]
    Battle(#[from] BattleError),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// JSON file store for finished sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn sessions_path(&self, arena_id: &str) -> Result<PathBuf, StoreError> {
        let valid = !arena_id.is_empty()
            && arena_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidArenaId(arena_id.to_string()));
        }
        Ok(self.root.join(arena_id).join(SESSIONS_FILE))
    }

    /// All sessions stored for `arena_id`, in insertion order.
    ///
    /// An arena with no stored sessions yields an empty list.
    pub fn load(&self, arena_id: &str) -> Result<Vec<SessionArtifact>, StoreError> {
        let path = self.sessions_path(arena_id)?;
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        serde_json::from_str(&contents).map_err(|source| StoreError::Json { path, source })
    }

    fn save(&self, arena_id: &str, sessions: &[SessionArtifact]) -> Result<(), StoreError> {
        let path = self.sessions_path(arena_id)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(sessions).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, json).map_err(|e| StoreError::io(&path, e))?;
        debug!(path = %path.display(), sessions = sessions.len(), "saved sessions");
        Ok(())
    }

    /// Append a finished session to its arena's file.
    pub fn append(&self, artifact: &SessionArtifact) -> Result<(), StoreError> {
        let mut sessions = self.load(&artifact.arena_id)?;
        sessions.push(artifact.clone());
        self.save(&artifact.arena_id, &sessions)?;
        info!(
            arena = %artifact.arena_id,
            player = %artifact.player_name,
            total = sessions.len(),
            "stored session"
        );
        Ok(())
    }

    /// Sessions for `arena_id`, newest first.
    pub fn list_recent(&self, arena_id: &str) -> Result<Vec<SessionArtifact>, StoreError> {
        let mut sessions = self.load(arena_id)?;
        sessions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(sessions)
    }

    /// Delete every session recorded by `player_name`. Returns how many were removed.
    pub fn delete_player(&self, arena_id: &str, player_name: &str) -> Result<usize, StoreError> {
        let player_name = player_name.trim();
        let mut sessions = self.load(arena_id)?;
        let before = sessions.len();
        sessions.retain(|s| s.player_name != player_name);
        let removed = before - sessions.len();
        if removed > 0 {
            self.save(arena_id, &sessions)?;
        }
        info!(arena = arena_id, player = player_name, removed, "deleted player sessions");
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
