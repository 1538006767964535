//! Game settings and preferences
//!
//! Persisted as JSON next to the executable's working directory. A missing or
//! unreadable file is not an error: defaults are used and the problem logged.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default settings file name
pub const SETTINGS_FILE: &str = "dopaman_settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Menu order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Resource lost per tick
    pub fn depletion_rate(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.04,
            Difficulty::Medium => 0.05,
            Difficulty::Hard => 0.06,
        }
    }

    /// Starting hazard speed (px per tick)
    pub fn hazard_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty highlighted when the selection screen opens
    pub difficulty: Difficulty,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Files ===
    /// Directory holding images/, fonts/ and sounds/
    pub asset_dir: PathBuf,
    /// One-line high score file
    pub high_score_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            asset_dir: PathBuf::from("assets"),
            high_score_file: PathBuf::from("high_score.txt"),
        }
    }
}

impl Settings {
    /// Effective sound effect gain
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music gain
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Read settings from `path`
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dopaman_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        for (i, d) in Difficulty::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
            assert_eq!(Difficulty::from_str(d.as_str()), Some(*d));
        }
        assert!(Difficulty::Easy.depletion_rate() < Difficulty::Hard.depletion_rate());
        assert_eq!(Difficulty::Medium.hazard_speed(), 1.5);
    }

    #[test]
    fn test_gain_respects_mute() {
        let mut settings = Settings::default();
        assert!((settings.sfx_gain() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.sfx_gain(), 0.0);
        assert_eq!(settings.music_gain(), 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("settings_roundtrip.json");
        let settings = Settings {
            difficulty: Difficulty::Hard,
            muted: true,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_or_invalid_falls_back() {
        let missing = temp_path("does_not_exist.json");
        assert_eq!(Settings::load(&missing), Settings::default());

        let bad = temp_path("settings_bad.json");
        fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(Settings::read(&bad), Err(SettingsError::Json(_))));
        assert_eq!(Settings::load(&bad), Settings::default());
        let _ = fs::remove_file(&bad);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("settings_partial.json");
        fs::write(&path, r#"{ "difficulty": "Easy" }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.music_volume, 0.7);
        let _ = fs::remove_file(&path);
    }
}
