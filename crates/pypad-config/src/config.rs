/// Application configuration: load, save, and sanitize.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application configuration, persisted as JSON next to the
/// executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// "System", "Dark" or "Light".
    pub theme_mode: String,
    pub font_size: f32,
    pub show_line_numbers: bool,
    /// Restore the tab set saved on the previous exit.
    pub restore_tabs: bool,
    /// Last folder used in an open/save dialog. Empty = home directory.
    pub last_used_folder: String,
    /// Height of the output panel in logical pixels.
    pub output_panel_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme_mode: "System".to_string(),
            font_size: 14.0,
            show_line_numbers: true,
            restore_tabs: true,
            last_used_folder: String::new(),
            output_panel_height: 180.0,
        }
    }
}

impl AppConfig {
    /// Returns the config file path: exe directory + `pypad.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("pypad.json")))
            .unwrap_or_else(|| PathBuf::from("pypad.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't
    /// exist. Returns defaults on any error without overwriting a broken
    /// file.
    pub fn load_or_create(path: &std::path::Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            let mut config = Self::default();
            config.sanitize();
            config
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.font_size = self.font_size.clamp(6.0, 72.0);
        self.output_panel_height = self.output_panel_height.clamp(60.0, 800.0);
        if !matches!(self.theme_mode.as_str(), "System" | "Dark" | "Light") {
            self.theme_mode = "System".to_string();
        }
    }
}
