//! Configuration file loading for the duel.
//!
//! Settings come from three places, highest priority first: command-line
//! flags, `duel.toml`, built-in defaults.

use chess_core::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("unknown log level: {0}")]
    LogLevel(String),
}

/// Which side the human plays.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HumanColor {
    #[default]
    White,
    Black,
}

impl From<HumanColor> for Color {
    fn from(side: HumanColor) -> Self {
        match side {
            HumanColor::White => Color::White,
            HumanColor::Black => Color::Black,
        }
    }
}

/// Contents of `duel.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DuelConfig {
    /// Search depth of the computer, in plies.
    pub depth: u32,
    pub human_color: HumanColor,
    /// Print a piece's legal destinations after an illegal attempt.
    pub show_hints: bool,
    pub log_level: String,
    /// Starting layout; the standard position when absent.
    pub layout: Option<String>,
}

impl Default for DuelConfig {
    fn default() -> Self {
        DuelConfig {
            depth: 2,
            human_color: HumanColor::White,
            show_hints: false,
            log_level: "warn".to_string(),
            layout: None,
        }
    }
}

impl DuelConfig {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, `duel.toml` in the current
    /// directory is used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn config_path() -> PathBuf {
        PathBuf::from("duel.toml")
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Command-line values that override the file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub depth: Option<u32>,
    pub black: bool,
    pub hints: bool,
    pub layout: Option<String>,
    pub seed: Option<u64>,
    pub verbosity: u8,
}

/// Fully resolved settings for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub depth: u32,
    pub human: Color,
    pub show_hints: bool,
    pub layout: Option<String>,
    pub seed: Option<u64>,
    pub log_level: Level,
}

impl Settings {
    pub fn resolve(config: DuelConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        let depth = overrides.depth.unwrap_or(config.depth);
        if depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }

        let human = if overrides.black {
            Color::Black
        } else {
            config.human_color.into()
        };

        let base: Level = config
            .log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(config.log_level.clone()))?;

        Ok(Settings {
            depth,
            human,
            show_hints: overrides.hints || config.show_hints,
            layout: overrides.layout.or(config.layout),
            seed: overrides.seed,
            log_level: raise(base, overrides.verbosity),
        })
    }
}

/// Raises `level` by `steps` toward `TRACE`.
fn raise(level: Level, steps: u8) -> Level {
    const ORDER: [Level; 5] = [
        Level::ERROR,
        Level::WARN,
        Level::INFO,
        Level::DEBUG,
        Level::TRACE,
    ];
    let start = ORDER.iter().position(|l| *l == level).unwrap_or(1);
    ORDER[(start + steps as usize).min(ORDER.len() - 1)]
}
