use rand::Rng;
use rand::seq::SliceRandom;

pub const EASY_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me",
];

pub const HARD_WORDS: &[&str] = &[
    "conscience",
    "independent",
    "phenomenon",
    "embarrassment",
    "rhythm",
    "noticeable",
    "occurred",
    "privilege",
    "queue",
    "questionnaire",
    "restaurant",
    "separate",
    "specifically",
    "suspicious",
    "tyranny",
    "unanimous",
    "vacuum",
    "weird",
    "wonderful",
    "xylophone",
    "zeal",
];

/// Every dictionary the adaptive drill searches, in search order.
pub const ALL_DICTIONARIES: &[&[&str]] = &[EASY_WORDS, HARD_WORDS];

/// `count` words drawn uniformly with replacement, joined by single spaces.
/// Returns an empty string only when `pool` is empty.
pub fn sample_words<R: Rng + ?Sized>(pool: &[&str], count: usize, rng: &mut R) -> String {
    let mut words: Vec<&str> = Vec::with_capacity(count);
    for _ in 0..count {
        match pool.choose(rng) {
            Some(word) => words.push(*word),
            None => break,
        }
    }
    words.join(" ")
}
