//! Runtime settings, loaded from `~/.config/grusin/ui.json` when present.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ui::core::error::Result;

const CONFIG_DIR: &str = "grusin";
const CONFIG_FILE: &str = "ui.json";
const LOG_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pixels a held button must travel, on either axis, before a drag starts.
    pub drag_threshold: i32,
    /// Longest press, in milliseconds, that still counts as a click.
    pub click_ms: u64,
    /// Offset between cascaded controls.
    pub cascade_offset: i32,
    /// Multiplier applied to every wheel notch.
    pub wheel_step: i32,
    pub log_filter: String,
    /// Skin file to load instead of the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 4,
            click_ms: 200,
            cascade_offset: 32,
            wheel_step: 1,
            log_filter: "grusin=info".to_string(),
            skin: None,
            log_dir: None,
        }
    }
}

impl UiConfig {
    pub fn from_json_str(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Loads the user config, falling back to defaults when there is none.
    pub fn load_or_default() -> Self {
        let Some(path) = get_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Configured log directory, or the platform default.
    pub fn resolved_log_dir(&self) -> Option<PathBuf> {
        self.log_dir
            .clone()
            .or_else(|| get_config_dir().map(|dir| dir.join(LOG_DIR)))
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join(CONFIG_DIR));
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join(CONFIG_DIR))
}

pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE))
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
