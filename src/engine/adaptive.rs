use std::collections::HashSet;

use crate::engine::key_stats::KeyAccuracyStore;

/// Looser than the general-purpose default so drills adapt after a couple
/// of attempts.
pub const ADAPTIVE_MIN_ATTEMPTS: u32 = 2;
pub const ADAPTIVE_MISS_RATE_THRESHOLD: f64 = 0.1;

pub fn adaptive_weak_keys(store: &KeyAccuracyStore) -> HashSet<char> {
    store.weak_keys(ADAPTIVE_MIN_ATTEMPTS, ADAPTIVE_MISS_RATE_THRESHOLD)
}

fn contains_any(word: &str, keys: &HashSet<char>) -> bool {
    word.chars()
        .flat_map(char::to_lowercase)
        .any(|c| keys.contains(&c))
}

/// Words from the concatenated dictionaries that contain at least one weak
/// key. Empty when there are no weak keys yet or nothing matches.
pub fn candidate_pool<'a>(store: &KeyAccuracyStore, dictionaries: &[&[&'a str]]) -> Vec<&'a str> {
    let weak = adaptive_weak_keys(store);
    if weak.is_empty() {
        return Vec::new();
    }

    dictionaries
        .iter()
        .flat_map(|dict| dict.iter().copied())
        .filter(|word| contains_any(word, &weak))
        .collect()
}
