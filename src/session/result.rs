use serde::{Deserialize, Serialize};

use crate::engine::key_stats::KeyAccuracyStore;
use crate::engine::metrics::LiveStats;
use crate::session::mode::Mode;

const CELEBRATION_MIN_WPM: u32 = 40;
const CELEBRATION_MIN_ACCURACY: u32 = 80;

/// One point of the per-second WPM series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WpmSample {
    pub elapsed_secs: u32,
    pub wpm: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Every character of the practice text was typed.
    Completed,
    /// The countdown reached zero first.
    TimeUp,
}

/// Everything frozen at the moment a session finishes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub stats: LiveStats,
    pub raw_speed: u32,
    pub reason: FinishReason,
    pub elapsed_secs: f64,
    pub mode: Mode,
    pub duration_secs: u32,
    pub max_streak: u32,
    pub wpm_series: Vec<WpmSample>,
    pub key_stats: KeyAccuracyStore,
}

impl SessionResult {
    pub fn celebrates(&self) -> bool {
        self.stats.wpm > CELEBRATION_MIN_WPM && self.stats.accuracy > CELEBRATION_MIN_ACCURACY
    }

    pub fn share_text(&self) -> String {
        format!(
            "I just hit {} WPM with {}% accuracy on keypace! Mode: {} | {}s",
            self.stats.wpm, self.stats.accuracy, self.mode, self.duration_secs
        )
    }
}
