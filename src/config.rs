use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::mode::{Mode, SessionConfig, SoundTheme};

pub const MIN_DURATION_SECS: u32 = 1;
pub const MAX_DURATION_SECS: u32 = 600;
pub const MAX_WORD_COUNT: usize = 200;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("session duration must be at least one second")]
    InvalidDuration,
    #[error("unknown mode `{0}` (expected easy, hard, smart or quote)")]
    UnknownMode(String),
    #[error("unknown sound theme `{0}` (expected none, click, osu or typewriter)")]
    UnknownSound(String),
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u32,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub sound: SoundTheme,
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_duration_secs() -> u32 {
    30
}
fn default_word_count() -> usize {
    30
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keypace")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            mode: Mode::default(),
            sound: SoundTheme::default(),
            word_count: default_word_count(),
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })?;
        config.validate();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keypace")
            .join("config.toml")
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Clamp out-of-range values left behind by hand-edited files.
    pub fn validate(&mut self) {
        self.duration_secs = self.duration_secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS);
        self.word_count = self.word_count.clamp(1, MAX_WORD_COUNT);
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }

    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        Ok(SessionConfig::new(self.duration_secs, self.mode)?
            .with_sound(self.sound)
            .with_word_count(self.word_count))
    }
}
