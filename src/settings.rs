//! Game settings and preferences
//!
//! Persisted as JSON next to the executable, separate from gameplay tuning.
//! A missing or unreadable file never stops the game; defaults are used.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show the controls legend while playing
    pub show_controls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            show_fps: true,
            show_controls: true,
        }
    }
}

impl Settings {
    /// Default file name
    pub const FILE_NAME: &'static str = "last_tank_settings.json";

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                log::warn!("Unreadable settings {}: {err}", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.clamped()
            }
            Err(err) => {
                log::warn!("Ignoring malformed settings {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to `path`. Failures are logged, not returned.
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Failed to serialize settings: {err}");
                return;
            }
        };
        match std::fs::write(path, json) {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Failed to save settings to {}: {err}", path.display()),
        }
    }

    /// Volumes forced into 0.0 - 1.0
    pub fn clamped(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("last-tank-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load("/nonexistent/last_tank_settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unreadable_path_uses_defaults() {
        // A directory exists but cannot be read as a file
        let dir = temp_path("settings-dir");
        std::fs::create_dir_all(&dir).unwrap();
        assert_eq!(Settings::load(&dir), Settings::default());
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("settings.json");
        let settings = Settings {
            master_volume: 0.3,
            muted: true,
            show_controls: false,
            ..Default::default()
        };
        settings.save(&path);
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let path = temp_path("bad.json");
        std::fs::write(&path, "{ volume").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_and_clamping() {
        let path = temp_path("partial.json");
        std::fs::write(&path, r#"{ "sfx_volume": 3.0 }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.sfx_volume, 1.0);
        assert_eq!(settings.master_volume, 0.8);
        assert!(settings.show_fps);
        let _ = std::fs::remove_file(&path);
    }
}
