//! Game settings with persistence
//!
//! Settings are saved to `~/.config/townsfolk/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use townsfolk_game::SimulationConfig;
use townsfolk_integration::DialogueConfig;
use townsfolk_world::DayCycle;
use tracing::{info, warn};

/// All game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub video: VideoSettings,
    pub dialogue: DialogueConfig,
    pub simulation: SimulationConfig,
    pub day: DayCycle,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("townsfolk"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path. Missing or broken files fall back to
    /// defaults; missing keys take their default values.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::settings_path() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Window and canvas settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    /// Initial window width
    pub width: u32,
    /// Initial window height
    pub height: u32,
    /// Upper bound on canvas magnification
    pub max_zoom: f32,
    /// Share of the available area the canvas may fill
    pub fill_ratio: f32,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            max_zoom: 1.2,
            fill_ratio: 0.95,
        }
    }
}

impl VideoSettings {
    /// Get the window size as a tuple
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: GameSettings = toml::from_str(
            r#"
            [dialogue]
            endpoint = "http://town.local/api/chat"

            [simulation]
            engage_radius = 3.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.dialogue.endpoint, "http://town.local/api/chat");
        assert_eq!(settings.dialogue.timeout_secs, 30);
        assert_eq!(settings.simulation.engage_radius, 3.0);
        assert_eq!(settings.simulation.disengage_radius, 6.0);
        assert_eq!(settings.video.max_zoom, 1.2);
        assert_eq!(settings.day.lamp_threshold, 0.45);
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("townsfolk-settings-{}", std::process::id()));
        let path = dir.join("settings.toml");

        let mut settings = GameSettings::default();
        settings.video.width = 1024;
        settings.simulation.transcript_capacity = 30;
        settings.save_to(&path).unwrap();

        let loaded = GameSettings::load_from(&path);
        assert_eq!(loaded.video.resolution(), (1024, 900));
        assert_eq!(loaded.simulation.transcript_capacity, 30);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_or_broken_file_falls_back() {
        let dir = std::env::temp_dir().join(format!("townsfolk-broken-{}", std::process::id()));
        let path = dir.join("settings.toml");
        assert_eq!(GameSettings::load_from(&path).video.width, 1600);

        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "video = [not toml").unwrap();
        assert_eq!(GameSettings::load_from(&path).video.width, 1600);

        let _ = fs::remove_dir_all(&dir);
    }
}
