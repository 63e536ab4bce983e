use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_ATTEMPTS: u32 = 3;
pub const DEFAULT_MISS_RATE_THRESHOLD: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub total: u32,
    pub miss: u32,
}

impl KeyRecord {
    pub fn miss_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.miss as f64 / self.total as f64
    }
}

/// Per-key attempt/miss counts, keyed by the lowercased expected character.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyAccuracyStore {
    pub stats: BTreeMap<char, KeyRecord>,
}

impl KeyAccuracyStore {
    /// Record one forward keystroke. `expected` is `None` when the typist ran
    /// past the end of the practice text; that is tolerated as a no-op.
    pub fn record(&mut self, expected: Option<char>, typed: char) {
        let Some(expected) = expected else {
            return;
        };
        let key = expected.to_lowercase().next().unwrap_or(expected);
        let record = self.stats.entry(key).or_default();
        record.total += 1;
        // Case-sensitive: typing 'a' for 'A' is a miss on key 'a'.
        if typed != expected {
            record.miss += 1;
        }
    }

    pub fn get(&self, key: char) -> Option<&KeyRecord> {
        self.stats.get(&key)
    }

    pub fn miss_rate(&self, key: char) -> f64 {
        self.stats.get(&key).map(KeyRecord::miss_rate).unwrap_or(0.0)
    }

    /// Keys with strictly more than `min_attempts` attempts and a miss rate
    /// strictly above `miss_rate_threshold`.
    pub fn weak_keys(&self, min_attempts: u32, miss_rate_threshold: f64) -> HashSet<char> {
        self.stats
            .iter()
            .filter(|(_, r)| r.total > min_attempts && r.miss_rate() > miss_rate_threshold)
            .map(|(&k, _)| k)
            .collect()
    }

    pub fn default_weak_keys(&self) -> HashSet<char> {
        self.weak_keys(DEFAULT_MIN_ATTEMPTS, DEFAULT_MISS_RATE_THRESHOLD)
    }

    /// Up to `n` keys with at least one miss, worst miss rate first.
    pub fn weakest(&self, n: usize) -> Vec<(char, KeyRecord)> {
        let mut keys: Vec<(char, KeyRecord)> = self
            .stats
            .iter()
            .filter(|(_, r)| r.miss > 0)
            .map(|(&k, &r)| (k, r))
            .collect();
        keys.sort_by(|a, b| {
            b.1.miss_rate()
                .total_cmp(&a.1.miss_rate())
                .then(b.1.total.cmp(&a.1.total))
                .then(a.0.cmp(&b.0))
        });
        keys.truncate(n);
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn clear(&mut self) {
        self.stats.clear();
    }
}
