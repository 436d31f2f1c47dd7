//! Runner configuration and arena definition loading
//!
//! Config lives in `arena.toml` in the working directory unless `--config`
//! points elsewhere. All fields are optional; CLI flags override them.

use battle_core::Arena;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::store::StoreError;

pub const DEFAULT_CONFIG_FILE: &str = "arena.toml";
pub const DEFAULT_DATA_DIR: &str = "arena-data";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunnerConfig {
    /// Directory holding stored sessions
    pub data_dir: Option<PathBuf>,
    /// Fallback log filter when RUST_LOG is unset
    pub log_level: Option<String>,
    /// Fixed seed for reproducible schedules
    pub seed: Option<u64>,
}

impl RunnerConfig {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Load runner config. A missing file gives the defaults.
pub fn load_config(path: &Path) -> Result<RunnerConfig, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).map_err(|source| StoreError::Toml {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RunnerConfig::default()),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

/// Load and validate an arena definition from TOML.
///
/// ```toml
/// id = "snacks"
/// title = "Best snack"
/// is_open = true
///
/// [[items]]
/// id = "crisps"
/// title = "Crisps"
/// image_url = "https://example.com/crisps.png"
/// ```
pub fn load_arena(path: &Path) -> Result<Arena, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let arena: Arena = toml::from_str(&content).map_err(|source| StoreError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    arena.validate()?;
    Ok(arena)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::BattleError;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("arena.toml")).unwrap();
        assert_eq!(config.data_dir(), PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_config_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("arena.toml");
        std::fs::write(&path, "data_dir = \"/tmp/battles\"\nlog_level = \"debug\"\nseed = 7\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/battles"));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("arena.toml");
        std::fs::write(&path, "seed = \"seven\"").unwrap();
        assert!(matches!(load_config(&path), Err(StoreError::Toml { .. })));
    }

    #[test]
    fn test_load_arena() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snacks.toml");
        std::fs::write(
            &path,
            r#"
id = "snacks"
title = "Best snack"
description = "Pick your favourite"

[[items]]
id = "crisps"
title = "Crisps"
image_url = "crisps.png"

[[items]]
id = "nuts"
title = "Nuts"
videoUrl = "nuts.mp4"
"#,
        )
        .unwrap();

        let arena = load_arena(&path).unwrap();
        assert_eq!(arena.id, "snacks");
        assert!(arena.is_open);
        assert_eq!(arena.items.len(), 2);
        assert_eq!(arena.items[0].image_url.as_deref(), Some("crisps.png"));
        assert_eq!(arena.items[1].video_url.as_deref(), Some("nuts.mp4"));
    }

    #[test]
    fn test_load_closed_arena() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("closed.toml");
        std::fs::write(&path, "id = \"closed\"\ntitle = \"Closed\"\nis_open = false\n").unwrap();
        let arena = load_arena(&path).unwrap();
        assert!(!arena.is_open);
        assert!(arena.items.is_empty());
    }

    #[test]
    fn test_duplicate_items_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dup.toml");
        std::fs::write(
            &path,
            "id = \"dup\"\ntitle = \"Dup\"\n[[items]]\nid = \"x\"\ntitle = \"X\"\n[[items]]\nid = \"x\"\ntitle = \"Y\"\n",
        )
        .unwrap();
        assert!(matches!(
            load_arena(&path),
            Err(StoreError::Battle(BattleError::DuplicateCompetitor { .. }))
        ));
    }
}
