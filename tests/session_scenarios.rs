use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use keypace::engine::key_stats::KeyRecord;
use keypace::engine::metrics::{LiveStats, compute_stats};
use keypace::generator::TextSource;
use keypace::generator::dictionary::{EASY_WORDS, HARD_WORDS};
use keypace::session::game::{SessionEvent, SessionState, TypingSession};
use keypace::session::mode::{Mode, SessionConfig};
use keypace::session::result::FinishReason;
use keypace::store::history::{HISTORY_LIMIT, HistoryEntry, HistoryStore};
use keypace::store::kv::{FileKvStore, KvStore, MemoryKvStore};

fn session_with<S: KvStore>(mode: Mode, duration: u32, store: S, seed: u64) -> TypingSession<S> {
    let config = SessionConfig::new(duration, mode).unwrap();
    TypingSession::with_rng(config, HistoryStore::new(store), SmallRng::seed_from_u64(seed))
}

fn session(mode: Mode, duration: u32) -> TypingSession<MemoryKvStore> {
    session_with(mode, duration, MemoryKvStore::new(), 7)
}

fn prefix<S: KvStore>(session: &TypingSession<S>, n: usize) -> String {
    session.text()[..n].iter().collect()
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn correct_prefix_keeps_full_accuracy() {
    let mut s = session(Mode::Easy, 30);
    let t0 = Instant::now();

    for n in 1..=5 {
        s.set_input_at(&prefix(&s, n), t0 + Duration::from_millis(100 * n as u64));
    }

    assert_eq!(s.stats().accuracy, 100);
    assert_eq!(s.streak(), 5);
    assert!(s.is_active());
    assert!(s.wpm_series().is_empty());
}

#[test]
fn wrong_first_keystroke_still_starts_session() {
    let mut s = session(Mode::Easy, 30);
    let wrong = if s.text()[0] == '#' { '%' } else { '#' };

    let events = s.set_input_at(&wrong.to_string(), Instant::now());

    assert_eq!(events[0], SessionEvent::Started);
    assert_eq!(s.stats().accuracy, 0);
    assert_eq!(s.stats().wpm, 0);
    assert_eq!(s.streak(), 0);
    assert!(s.is_active());
}

#[test]
fn completing_text_finishes_in_same_update() {
    let mut s = session(Mode::Easy, 60);
    let t0 = Instant::now();
    let full: String = s.text().iter().collect();

    s.set_input_at(&prefix(&s, 1), t0);
    let events = s.set_input_at(&full, t0 + secs(10));

    assert_eq!(s.state(), SessionState::Finished);
    assert!(!s.is_active());
    assert_eq!(s.history().len(), 1);
    assert!(events.contains(&SessionEvent::Finished {
        reason: FinishReason::Completed
    }));
    assert!(!s.metronome().is_armed());

    let result = s.last_result().unwrap();
    assert_eq!(result.stats.accuracy, 100);
    assert_eq!(s.history()[0].wpm, result.stats.wpm);
    assert_eq!(s.history()[0].mode, "60s");
}

#[test]
fn time_up_freezes_last_computed_stats() {
    let mut s = session(Mode::Easy, 15);
    let t0 = Instant::now();

    s.set_input_at(&prefix(&s, 1), t0);
    s.set_input_at(&prefix(&s, 4), t0 + secs(3));
    let before = s.stats();
    assert!(before.wpm > 0);

    let events = s.advance(t0 + secs(15));

    assert_eq!(s.state(), SessionState::Finished);
    assert_eq!(
        events.last(),
        Some(&SessionEvent::Finished {
            reason: FinishReason::TimeUp
        })
    );
    let result = s.last_result().unwrap();
    assert_eq!(result.stats, before);
    assert_eq!(result.elapsed_secs, 15.0);
    assert_eq!(s.remaining_secs(), 0);
    assert_eq!(s.history().len(), 1);
    assert!(s.snapshot().key_stats.is_some());
}

#[test]
fn smart_mode_drills_weak_key() {
    let mut s = session(Mode::Smart, 30);
    s.key_stats_mut()
        .stats
        .insert('e', KeyRecord { total: 5, miss: 3 });

    s.reset();

    assert_eq!(s.text_source(), TextSource::Adaptive);
    let text: String = s.text().iter().collect();
    for word in text.split(' ') {
        assert!(word.to_lowercase().contains('e'), "{word} has no 'e'");
        assert!(EASY_WORDS.contains(&word) || HARD_WORDS.contains(&word));
    }
}

#[test]
fn smart_mode_without_matching_words_falls_back() {
    let mut s = session(Mode::Smart, 30);
    s.key_stats_mut()
        .stats
        .insert('\u{e9}', KeyRecord { total: 5, miss: 3 });

    s.reset();

    assert_eq!(s.text_source(), TextSource::AdaptiveFallback);
    let text: String = s.text().iter().collect();
    assert!(text.split(' ').all(|word| EASY_WORDS.contains(&word)));
}

#[test]
fn accuracy_stays_in_bounds() {
    let mut rng = SmallRng::seed_from_u64(42);
    let alphabet: Vec<char> = "abcdefghij ".chars().collect();

    for _ in 0..200 {
        let len = rng.gen_range(1..40);
        let text: Vec<char> = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();
        let typed_len = rng.gen_range(0..=len);
        let typed: Vec<char> = (0..typed_len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();

        let stats = compute_stats(&text, &typed, rng.gen_range(0.0..2.0), LiveStats::default());
        assert!(stats.accuracy <= 100);
        assert_eq!(compute_stats(&text, &[], 0.5, stats).accuracy, 100);
    }
}

#[test]
fn reset_twice_is_idle_and_empty() {
    let mut s = session(Mode::Hard, 30);
    let t0 = Instant::now();
    s.set_input_at(&prefix(&s, 3), t0);
    s.advance(t0 + secs(2));

    for _ in 0..2 {
        s.reset();
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.typed().is_empty());
        assert_eq!(s.stats(), LiveStats::default());
        assert_eq!(s.streak(), 0);
        assert_eq!(s.max_streak(), 0);
        assert!(s.wpm_series().is_empty());
        assert_eq!(s.remaining_secs(), 30);
        assert!(!s.metronome().is_armed());

        let text: String = s.text().iter().collect();
        assert_eq!(text.split(' ').count(), 30);
        assert!(text.split(' ').all(|word| HARD_WORDS.contains(&word)));
    }
}

#[test]
fn streak_grows_while_correct_and_drops_on_miss() {
    let mut s = session(Mode::Easy, 30);
    let t0 = Instant::now();

    let mut last = 0;
    for n in 1..=8 {
        s.set_input_at(&prefix(&s, n), t0 + Duration::from_millis(50 * n as u64));
        assert!(s.streak() >= last);
        last = s.streak();
    }
    assert_eq!(last, 8);

    let mut wrong = prefix(&s, 8);
    wrong.push(if s.text()[8] == '#' { '%' } else { '#' });
    s.set_input_at(&wrong, t0 + secs(1));
    assert_eq!(s.streak(), 0);
    assert_eq!(s.max_streak(), 8);

    let mut next = wrong.clone();
    next.push(s.text()[9]);
    s.set_input_at(&next, t0 + secs(2));
    assert_eq!(s.streak(), 1);
}

#[test]
fn series_has_one_sample_per_tick() {
    let mut s = session(Mode::Easy, 5);
    let t0 = Instant::now();
    s.set_input_at(&prefix(&s, 1), t0);

    s.advance(t0 + Duration::from_millis(2500));
    let elapsed: Vec<u32> = s.wpm_series().iter().map(|p| p.elapsed_secs).collect();
    assert_eq!(elapsed, vec![1, 2]);

    s.advance(t0 + secs(60));
    let elapsed: Vec<u32> = s.wpm_series().iter().map(|p| p.elapsed_secs).collect();
    assert_eq!(elapsed, vec![1, 2, 3, 4]);
    assert!(s.wpm_series().len() <= 5);
    assert!(s.is_finished());

    // The metronome is stopped; later polls change nothing.
    assert!(s.advance(t0 + secs(120)).is_empty());
    assert_eq!(s.wpm_series().len(), 4);
}

#[test]
fn history_is_capped_newest_first() {
    let mut s = session(Mode::Quote, 30);

    for round in 0..(HISTORY_LIMIT as u64 + 3) {
        s.reset();
        let full: String = s.text().iter().collect();
        let t0 = Instant::now();
        s.set_input_at(&prefix(&s, 1), t0);
        s.set_input_at(&full, t0 + secs(5 + round));
        assert!(s.is_finished());
        assert_eq!(s.history()[0].wpm, s.last_result().unwrap().stats.wpm);
    }

    let history = s.history();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert!(history.windows(2).all(|pair| pair[0].id > pair[1].id));
    assert!(history.iter().all(|entry| entry.mode == "Quote"));
}

#[test]
fn history_survives_new_store_instance() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = FileKvStore::new(dir.path()).unwrap();
        let mut s = session_with(Mode::Easy, 30, store, 3);
        let full: String = s.text().iter().collect();
        let t0 = Instant::now();
        s.set_input_at(&prefix(&s, 1), t0);
        s.set_input_at(&full, t0 + secs(20));
        assert_eq!(s.history().len(), 1);
    }

    let reopened = HistoryStore::new(FileKvStore::new(dir.path()).unwrap());
    let entries: &[HistoryEntry] = reopened.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].accuracy, 100);
    assert_eq!(entries[0].mode, "30s");
}

#[test]
fn malformed_history_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileKvStore::new(dir.path()).unwrap();
    store.set("type-history", b"{not json").unwrap();

    let history = HistoryStore::new(store);
    assert!(history.entries().is_empty());
    assert!(history.load().is_empty());
}

#[test]
fn keystroke_after_deadline_is_time_up() {
    let mut s = session(Mode::Quote, 3);
    let t0 = Instant::now();
    let full: String = s.text().iter().collect();
    s.set_input_at(&prefix(&s, 1), t0);

    let events = s.set_input_at(&full, t0 + secs(10));

    assert!(s.is_finished());
    assert!(!events.contains(&SessionEvent::Celebration));
    let result = s.last_result().unwrap();
    assert_eq!(result.reason, FinishReason::TimeUp);
    assert_eq!(s.typed().len(), 1);
    assert_eq!(s.history().len(), 1);
}
