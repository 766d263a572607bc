//! Arcade configuration file.
//!
//! Values, not code: phase budgets, selection mode, start-screen gate, and
//! where assets live. Loaded from JSON when present; a missing or malformed
//! file is an environmental condition, not a bug, so it degrades to defaults
//! with a warning instead of failing startup.

use serde::Deserialize;
use std::path::Path;

use crate::select::SelectionMode;
use crate::session::{SessionConfig, DEFAULT_ACTIVE_MS, DEFAULT_TRANSITION_MS};

#[derive(Debug, Clone, Deserialize)]
pub struct ArcadeConfig {
    #[serde(default = "default_active_ms")]
    pub active_ms: u64,
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
    #[serde(default)]
    pub selection: SelectionMode,
    #[serde(default = "default_start_screen")]
    pub start_screen: bool,
    #[serde(default = "default_asset_dir")]
    pub asset_dir: String,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            active_ms: default_active_ms(),
            transition_ms: default_transition_ms(),
            selection: SelectionMode::default(),
            start_screen: default_start_screen(),
            asset_dir: default_asset_dir(),
        }
    }
}

impl ArcadeConfig {
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<ArcadeConfig>(&raw) {
                Ok(config) => {
                    log::info!("Loaded arcade config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "Malformed arcade config {}: {err}. Using defaults.",
                        path.display()
                    );
                    ArcadeConfig::default()
                }
            },
            Err(_) => {
                log::info!(
                    "No arcade config at {}. Using defaults.",
                    path.display()
                );
                ArcadeConfig::default()
            }
        }
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            active_ms: self.active_ms,
            transition_ms: self.transition_ms,
            selection: self.selection,
            start_screen: self.start_screen,
        }
    }
}

const fn default_active_ms() -> u64 {
    DEFAULT_ACTIVE_MS
}

const fn default_transition_ms() -> u64 {
    DEFAULT_TRANSITION_MS
}

const fn default_start_screen() -> bool {
    true
}

fn default_asset_dir() -> String {
    "assets".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "flux_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn defaults_match_session_budgets() {
        let config = ArcadeConfig::default();
        assert_eq!(config.active_ms, 6_000);
        assert_eq!(config.transition_ms, 2_000);
        assert!(config.start_screen);
        assert_eq!(config.selection, SelectionMode::Sequential);
        assert_eq!(config.asset_dir, "assets");
    }

    #[test]
    fn parses_full_config() {
        let path = temp_file_path("full");
        std::fs::write(
            &path,
            r#"{
              "active_ms": 4000,
              "transition_ms": 1500,
              "selection": "random",
              "start_screen": false,
              "asset_dir": "content"
            }"#,
        )
        .expect("write temp config");

        let config = ArcadeConfig::load_or_default(&path);
        assert_eq!(config.active_ms, 4_000);
        assert_eq!(config.transition_ms, 1_500);
        assert_eq!(config.selection, SelectionMode::Random);
        assert!(!config.start_screen);
        assert_eq!(config.asset_dir, "content");

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let path = temp_file_path("partial");
        std::fs::write(&path, r#"{ "selection": "random" }"#).expect("write temp config");

        let config = ArcadeConfig::load_or_default(&path);
        assert_eq!(config.selection, SelectionMode::Random);
        assert_eq!(config.active_ms, 6_000);
        assert!(config.start_screen);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let path = temp_file_path("missing");
        let _ = std::fs::remove_file(&path);
        let config = ArcadeConfig::load_or_default(&path);
        assert_eq!(config.active_ms, 6_000);
    }

    #[test]
    fn malformed_file_uses_defaults() {
        let path = temp_file_path("malformed");
        std::fs::write(&path, "{ not json at all").expect("write temp config");
        let config = ArcadeConfig::load_or_default(&path);
        assert_eq!(config.transition_ms, 2_000);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn session_config_mirrors_arcade_config() {
        let config = ArcadeConfig {
            active_ms: 3_000,
            transition_ms: 900,
            selection: SelectionMode::Random,
            start_screen: false,
            asset_dir: "assets".into(),
        };
        let session = config.session();
        assert_eq!(session.active_ms, 3_000);
        assert_eq!(session.transition_ms, 900);
        assert_eq!(session.selection, SelectionMode::Random);
        assert!(!session.start_screen);
    }
}
