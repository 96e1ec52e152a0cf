use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{QuizError, QuizResult};
use crate::quiz::{QuizType, DEFAULT_ANSWER_WINDOW_MS, DEFAULT_FUZZY_THRESHOLD};
use crate::utils::find_best_match;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Rules
    pub quiz_types: Vec<QuizType>,
    pub default_quiz_type: String,
    pub default_players: usize,

    // Matching
    pub answer_window_ms: u64,
    pub fuzzy_threshold: f64,

    // Data
    pub playlist_path: String,
    pub stats_path: String,
    pub history_dir: String,
    pub voice_corrections: HashMap<String, String>,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiz_types: QuizType::builtin(),
            default_quiz_type: "Classic".to_string(),
            default_players: 2,
            answer_window_ms: DEFAULT_ANSWER_WINDOW_MS,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            playlist_path: dirs::data_dir()
                .unwrap_or_default()
                .join("songquiz/playlist.json")
                .to_string_lossy()
                .to_string(),
            stats_path: dirs::data_dir()
                .unwrap_or_default()
                .join("songquiz/stats.json")
                .to_string_lossy()
                .to_string(),
            history_dir: dirs::data_dir()
                .unwrap_or_default()
                .join("songquiz")
                .to_string_lossy()
                .to_string(),
            voice_corrections: HashMap::from([
                ("beatle".to_string(), "beatles".to_string()),
                ("acdc".to_string(), "ac dc".to_string()),
            ]),
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from a file; a corrupt file is backed up and replaced by defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        match serde_json::from_str::<Self>(&content) {
            Ok(config) => {
                config.validate()?;
                Ok(config)
            }
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Every configured quiz type must be playable
    pub fn validate(&self) -> QuizResult<()> {
        if self.quiz_types.is_empty() {
            return Err(QuizError::Config("no quiz types configured".to_string()));
        }
        for quiz_type in &self.quiz_types {
            quiz_type.validate()?;
        }
        Ok(())
    }

    /// Look up a quiz type by name, forgiving case and small typos
    pub fn quiz_type(&self, name: &str) -> QuizResult<QuizType> {
        if let Some(found) = self
            .quiz_types
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
        {
            return Ok(found.clone());
        }

        let names: Vec<String> = self.quiz_types.iter().map(|t| t.name.clone()).collect();
        find_best_match(name, &names, 0.7)
            .and_then(|m| self.quiz_types.iter().find(|t| t.name == m.value))
            .cloned()
            .ok_or_else(|| QuizError::UnknownQuizType(name.to_string()))
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("songquiz")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_quiz_type, "Classic");
        assert_eq!(config.answer_window_ms, 30_000);
        assert_eq!(config.default_players, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).expect("Failed to serialize");
        let restored: Config = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(config.quiz_types, restored.quiz_types);
        assert_eq!(config.voice_corrections, restored.voice_corrections);
    }

    #[test]
    fn test_quiz_type_lookup() {
        let config = Config::default();
        assert_eq!(config.quiz_type("classic").unwrap().name, "Classic");
        assert_eq!(config.quiz_type("speed-round").unwrap().name, "Speed Round");
        assert!(matches!(
            config.quiz_type("karaoke"),
            Err(QuizError::UnknownQuizType(_))
        ));
    }

    #[test]
    fn test_config_corrupt_json_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not valid json").unwrap();

        let config = Config::load_from(&path).expect("load should degrade gracefully");
        assert_eq!(config.default_quiz_type, "Classic");
        assert!(path.with_extension("json.corrupt").exists());
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested/config.json");
        let mut config = Config::default();
        config.answer_window_ms = 12_000;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.answer_window_ms, 12_000);
    }

    #[test]
    fn test_config_with_zero_round_quiz_type_is_rejected() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.quiz_types[0].num_rounds = 0;
        config.save_to(&path).unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
