use rand::Rng;
use rand::seq::SliceRandom;

pub const QUOTES: &[&str] = &[
    "The only way to do great work is to love what you do.",
    "Success is not final, failure is not fatal: it is the courage to continue that counts.",
    "In the middle of every difficulty lies opportunity.",
    "Happiness can be found, even in the darkest of times, if one only remembers to turn on the light.",
    "Code is like humor. When you have to explain it, it is bad.",
    "Simplicity is the soul of efficiency.",
    "To be or not to be, that is the question.",
    "It does not matter how slowly you go as long as you do not stop.",
];

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}
