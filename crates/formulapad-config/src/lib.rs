use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User-tunable editor settings.
///
/// Every field has a default, so a partial (or absent) config file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum joystick deflection radius, in pointer units.
    #[serde(default = "default_joystick_radius")]
    pub joystick_radius: f32,
    /// Long-press delay before a script level is created, in milliseconds.
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,
    /// Hold time at the stick center before a gesture becomes a selection
    /// gesture, in milliseconds.
    #[serde(default = "default_selection_hold_ms")]
    pub selection_hold_ms: u64,
    /// Symbols offered by the on-screen palette. Unlike keyboard input these
    /// are not restricted to `[A-Za-z0-9+\-=]`.
    #[serde(default = "default_palette")]
    pub palette: Vec<char>,
}

fn default_joystick_radius() -> f32 {
    100.0
}

fn default_long_press_ms() -> u64 {
    500
}

fn default_selection_hold_ms() -> u64 {
    650
}

fn default_palette() -> Vec<char> {
    vec!['∫', '∑', '√', 'π', 'α', 'β', '×', '÷', '≤', '≥']
}

impl Default for Config {
    fn default() -> Self {
        Self {
            joystick_radius: default_joystick_radius(),
            long_press_ms: default_long_press_ms(),
            selection_hold_ms: default_selection_hold_ms(),
            palette: default_palette(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/formulapad");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}
