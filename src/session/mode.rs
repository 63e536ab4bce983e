use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Preset durations offered by the front end.
pub const DURATION_PRESETS: &[u32] = &[15, 30, 60];
pub const DEFAULT_WORD_COUNT: usize = 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Easy,
    Hard,
    Smart,
    Quote,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Easy, Mode::Hard, Mode::Smart, Mode::Quote];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Easy => "easy",
            Mode::Hard => "hard",
            Mode::Smart => "smart",
            Mode::Quote => "quote",
        }
    }

    /// Label stored with a history entry.
    pub fn history_label(self, duration_secs: u32) -> String {
        match self {
            Mode::Quote => "Quote".to_string(),
            _ => format!("{duration_secs}s"),
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownMode(s.to_string()))
    }
}

/// Tag forwarded untouched to the cue sink on every forward keystroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundTheme {
    #[default]
    None,
    Click,
    Osu,
    Typewriter,
}

impl SoundTheme {
    pub const ALL: [SoundTheme; 4] = [
        SoundTheme::None,
        SoundTheme::Click,
        SoundTheme::Osu,
        SoundTheme::Typewriter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SoundTheme::None => "none",
            SoundTheme::Click => "click",
            SoundTheme::Osu => "osu",
            SoundTheme::Typewriter => "typewriter",
        }
    }

    pub fn is_silent(self) -> bool {
        self == SoundTheme::None
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SoundTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundTheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownSound(s.to_string()))
    }
}

/// Fixed for the lifetime of one session. Changing the duration, mode or
/// word count means a fresh session; the sound theme may change at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub duration_secs: u32,
    pub mode: Mode,
    pub sound: SoundTheme,
    pub word_count: usize,
}

impl SessionConfig {
    pub fn new(duration_secs: u32, mode: Mode) -> Result<Self, ConfigError> {
        if duration_secs == 0 {
            return Err(ConfigError::InvalidDuration);
        }
        Ok(Self {
            duration_secs,
            mode,
            sound: SoundTheme::None,
            word_count: DEFAULT_WORD_COUNT,
        })
    }

    pub fn with_sound(mut self, sound: SoundTheme) -> Self {
        self.sound = sound;
        self
    }

    pub fn with_word_count(mut self, word_count: usize) -> Self {
        self.word_count = word_count.max(1);
        self
    }

    /// Next preset after the current duration, wrapping around.
    pub fn next_duration_preset(&self) -> u32 {
        DURATION_PRESETS
            .iter()
            .copied()
            .find(|&d| d > self.duration_secs)
            .unwrap_or(DURATION_PRESETS[0])
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: 30,
            mode: Mode::Easy,
            sound: SoundTheme::None,
            word_count: DEFAULT_WORD_COUNT,
        }
    }
}
