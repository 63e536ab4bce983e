pub mod dictionary;
pub mod quotes;

use rand::Rng;
use tracing::debug;

use crate::engine::adaptive;
use crate::engine::key_stats::KeyAccuracyStore;
use crate::session::mode::Mode;

use self::dictionary::{ALL_DICTIONARIES, EASY_WORDS, HARD_WORDS, sample_words};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSource {
    Quote,
    Easy,
    Hard,
    /// Sampled from words containing at least one weak key.
    Adaptive,
    /// Smart mode with no usable weak keys; easy words instead.
    AdaptiveFallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedText {
    pub text: String,
    pub source: TextSource,
}

/// Practice text for `mode`. `length` is the word count for word modes and
/// is ignored for quotes. Never returns an empty string.
pub fn generate<R: Rng + ?Sized>(
    mode: Mode,
    key_stats: &KeyAccuracyStore,
    length: usize,
    rng: &mut R,
) -> GeneratedText {
    let length = length.max(1);

    match mode {
        Mode::Quote => GeneratedText {
            text: quotes::random_quote(rng).to_string(),
            source: TextSource::Quote,
        },
        Mode::Easy => GeneratedText {
            text: sample_words(EASY_WORDS, length, rng),
            source: TextSource::Easy,
        },
        Mode::Hard => GeneratedText {
            text: sample_words(HARD_WORDS, length, rng),
            source: TextSource::Hard,
        },
        Mode::Smart => {
            let pool = adaptive::candidate_pool(key_stats, ALL_DICTIONARIES);
            if pool.is_empty() {
                debug!("no weak-key words available, falling back to easy words");
                GeneratedText {
                    text: sample_words(EASY_WORDS, length, rng),
                    source: TextSource::AdaptiveFallback,
                }
            } else {
                debug!(pool_size = pool.len(), "generating adaptive drill");
                GeneratedText {
                    text: sample_words(&pool, length, rng),
                    source: TextSource::Adaptive,
                }
            }
        }
    }
}
