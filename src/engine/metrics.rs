use serde::{Deserialize, Serialize};

pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStats {
    pub wpm: u32,
    pub accuracy: u32,
}

impl Default for LiveStats {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
        }
    }
}

impl LiveStats {
    /// Display-only estimate of speed without the accuracy penalty. Not a
    /// WPM in the strict sense.
    pub fn raw_speed(&self) -> u32 {
        let penalty = 100u32.saturating_sub(self.accuracy) as f64 / 2.0;
        self.wpm + penalty.round() as u32
    }
}

/// Positions where the typed character matches the practice text.
pub fn correct_chars(text: &[char], typed: &[char]) -> usize {
    text.iter().zip(typed).filter(|(t, i)| t == i).count()
}

/// WPM is only recomputed once time has elapsed; until then the previous
/// value is carried forward. Accuracy is always recomputed.
pub fn compute_stats(
    text: &[char],
    typed: &[char],
    elapsed_minutes: f64,
    previous: LiveStats,
) -> LiveStats {
    let correct = correct_chars(text, typed) as f64;

    let wpm = if elapsed_minutes > 0.0 {
        ((correct / CHARS_PER_WORD) / elapsed_minutes).round() as u32
    } else {
        previous.wpm
    };

    let accuracy = if typed.is_empty() {
        100
    } else {
        ((correct / typed.len() as f64) * 100.0).round() as u32
    };

    LiveStats { wpm, accuracy }
}
