use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::profile::UserProfile;
use crate::utils::fuzzy::{FILE_MIN_SCORE, TEXT_MIN_SCORE};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Library
    pub music_dir: String,
    pub catalog_path: String,
    pub session_path: String,

    // Matching
    pub file_min_score: u8,
    pub text_min_score: u8,

    // Playback
    pub player_command: String,
    pub player_args: Vec<String>,

    // Meta
    pub log_level: String,

    // User
    pub profile: UserProfile,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir().unwrap_or_default().join("charlotte");

        Self {
            music_dir: dirs::audio_dir()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
            catalog_path: data_dir.join("music.csv").to_string_lossy().to_string(),
            session_path: data_dir.join("session.json").to_string_lossy().to_string(),
            file_min_score: FILE_MIN_SCORE,
            text_min_score: TEXT_MIN_SCORE,
            player_command: default_player_command().to_string(),
            player_args: Vec::new(),
            log_level: "INFO".to_string(),
            profile: UserProfile::default(),
        }
    }
}

fn default_player_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

impl Config {
    /// Load config from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save() {
                tracing::warn!("⚠️ Could not write default config to {:?}: {}", path, e);
            }
            return Ok(config);
        }
        Self::load_from(&path)
    }

    /// Load config from `path`
    ///
    /// A missing file gives defaults. A corrupt file is moved aside to
    /// `<name>.corrupt` and defaults are used.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
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

    pub fn music_dir(&self) -> PathBuf {
        PathBuf::from(&self.music_dir)
    }

    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.catalog_path)
    }

    pub fn session_path(&self) -> PathBuf {
        PathBuf::from(&self.session_path)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("charlotte")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.file_min_score, 65);
        assert_eq!(config.text_min_score, 70);
        assert_eq!(config.log_level, "INFO");
        assert!(config.catalog_path.ends_with("music.csv"));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).expect("Failed to serialize");
        let restored: Config = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(config.player_command, restored.player_command);
        assert_eq!(config.profile, restored.profile);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"music_dir":"/srv/music"}"#).unwrap();
        assert_eq!(config.music_dir, "/srv/music");
        assert_eq!(config.file_min_score, 65);
    }

    #[test]
    fn test_config_corrupt_json_handling() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not valid json").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.text_min_score, 70);
        assert!(!path.exists());
        assert!(dir.path().join("config.json.corrupt").exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested/config.json");

        let mut config = Config::default();
        config.profile.salutation = "captain".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.profile.salutation, "captain");
    }
}
