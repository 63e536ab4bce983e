use std::time::Instant;

use chrono::Local;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::engine::key_stats::KeyAccuracyStore;
use crate::engine::metrics::{self, LiveStats};
use crate::generator::{self, TextSource};
use crate::session::input::{self, InputChange};
use crate::session::mode::{SessionConfig, SoundTheme};
use crate::session::result::{FinishReason, SessionResult, WpmSample};
use crate::session::timer::Metronome;
use crate::store::history::{HistoryEntry, HistoryStore};
use crate::store::kv::KvStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Text generated, countdown not started, nothing typed.
    Idle,
    Running,
    /// Terminal until the next reset.
    Finished,
}

/// Signals for presentation collaborators, returned by every operation in
/// the order they happened.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Started,
    Keystroke { correct: bool, sound: SoundTheme },
    Tick { remaining_secs: u32 },
    Finished { reason: FinishReason },
    Celebration,
}

/// Read-only copy of the observable session state.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub config: SessionConfig,
    pub state: SessionState,
    pub text: String,
    pub typed: String,
    pub remaining_secs: u32,
    pub stats: LiveStats,
    pub wpm_series: Vec<WpmSample>,
    pub streak: u32,
    pub max_streak: u32,
    /// Only populated once the session has finished.
    pub key_stats: Option<KeyAccuracyStore>,
    pub history: Vec<HistoryEntry>,
}

impl SessionSnapshot {
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }
}

/// The typing-session state machine. Sole owner of the live stats, streaks,
/// WPM series and typed input; all mutation happens through `&mut self`.
pub struct TypingSession<S> {
    config: SessionConfig,
    state: SessionState,
    text: Vec<char>,
    text_source: TextSource,
    typed: Vec<char>,
    started_at: Option<Instant>,
    remaining_secs: u32,
    stats: LiveStats,
    wpm_series: Vec<WpmSample>,
    streak: u32,
    max_streak: u32,
    key_stats: KeyAccuracyStore,
    final_key_stats: Option<KeyAccuracyStore>,
    last_result: Option<SessionResult>,
    history: HistoryStore<S>,
    metronome: Metronome,
    rng: SmallRng,
}

impl<S: KvStore> TypingSession<S> {
    pub fn new(config: SessionConfig, history: HistoryStore<S>) -> Self {
        Self::with_rng(config, history, SmallRng::from_entropy())
    }

    pub fn with_rng(config: SessionConfig, history: HistoryStore<S>, rng: SmallRng) -> Self {
        let mut session = Self {
            config,
            state: SessionState::Idle,
            text: Vec::new(),
            text_source: TextSource::Easy,
            typed: Vec::new(),
            started_at: None,
            remaining_secs: config.duration_secs,
            stats: LiveStats::default(),
            wpm_series: Vec::new(),
            streak: 0,
            max_streak: 0,
            key_stats: KeyAccuracyStore::default(),
            final_key_stats: None,
            last_result: None,
            history,
            metronome: Metronome::default(),
            rng,
        };
        session.reset();
        session
    }

    /// Back to `Idle` with fresh text, keeping the configuration and the
    /// accumulated key accuracy record.
    pub fn reset(&mut self) {
        let generated = generator::generate(
            self.config.mode,
            &self.key_stats,
            self.config.word_count,
            &mut self.rng,
        );
        debug!(mode = %self.config.mode, source = ?generated.source, "new practice text");

        self.metronome.disarm();
        self.state = SessionState::Idle;
        self.text = generated.text.chars().collect();
        self.text_source = generated.source;
        self.typed.clear();
        self.started_at = None;
        self.remaining_secs = self.config.duration_secs;
        self.stats = LiveStats::default();
        self.wpm_series.clear();
        self.streak = 0;
        self.max_streak = 0;
        self.final_key_stats = None;
        self.last_result = None;
    }

    /// A new configuration always starts a fresh session.
    pub fn reconfigure(&mut self, config: SessionConfig) {
        info!(duration = config.duration_secs, mode = %config.mode, "session reconfigured");
        self.config = config;
        self.reset();
    }

    /// Sound only tags keystroke events, so it can change mid-session.
    pub fn set_sound(&mut self, sound: SoundTheme) {
        debug!(sound = %sound, "sound theme changed");
        self.config = self.config.with_sound(sound);
    }

    pub fn set_input(&mut self, value: &str) -> Vec<SessionEvent> {
        self.set_input_at(value, Instant::now())
    }

    /// Replace the typed value with `value` (the whole field, not a delta).
    /// Characters past the end of the practice text are dropped.
    pub fn set_input_at(&mut self, value: &str, now: Instant) -> Vec<SessionEvent> {
        // Ticks that came due before `now` happened first; one of them may
        // already have ended the session.
        let mut events = self.advance(now);
        if self.state == SessionState::Finished {
            return events;
        }

        let next = input::clamp_to_text(value, self.text.len());
        let previous_len = self.typed.len();

        match input::classify(previous_len, next.len()) {
            InputChange::Forward { .. } => {}
            // Deletions only change the stored value; stats wait for the next
            // forward keystroke.
            InputChange::Deletion | InputChange::Unchanged => {
                self.typed = next;
                return events;
            }
        }

        if self.state == SessionState::Idle {
            self.state = SessionState::Running;
            self.started_at = Some(now);
            self.metronome.arm(now);
            info!(mode = %self.config.mode, duration = self.config.duration_secs, "session started");
            events.push(SessionEvent::Started);
        }

        for keystroke in input::forward_keystrokes(&self.text, &next, previous_len) {
            self.key_stats.record(keystroke.expected, keystroke.actual);
            if keystroke.correct {
                self.streak += 1;
                self.max_streak = self.max_streak.max(self.streak);
            } else {
                self.streak = 0;
            }
            events.push(SessionEvent::Keystroke {
                correct: keystroke.correct,
                sound: self.config.sound,
            });
        }

        self.typed = next;

        let elapsed_minutes = self
            .started_at
            .map(|start| now.saturating_duration_since(start).as_secs_f64() / 60.0)
            .unwrap_or(0.0);
        self.stats = metrics::compute_stats(&self.text, &self.typed, elapsed_minutes, self.stats);

        if self.typed.len() >= self.text.len() {
            let elapsed_secs = elapsed_minutes * 60.0;
            events.extend(self.finish(FinishReason::Completed, elapsed_secs));
        }

        events
    }

    /// One countdown step. Does nothing unless the session is running.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        if self.state != SessionState::Running {
            return Vec::new();
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return self.finish(FinishReason::TimeUp, self.config.duration_secs as f64);
        }

        self.wpm_series.push(WpmSample {
            elapsed_secs: self.config.duration_secs - self.remaining_secs,
            wpm: self.stats.wpm,
        });
        vec![SessionEvent::Tick {
            remaining_secs: self.remaining_secs,
        }]
    }

    /// Fire every one-second tick that has come due by `now`.
    pub fn advance(&mut self, now: Instant) -> Vec<SessionEvent> {
        let due = self.metronome.due_ticks(now);
        let mut events = Vec::new();
        for _ in 0..due {
            if self.state != SessionState::Running {
                break;
            }
            events.extend(self.tick());
        }
        events
    }

    fn finish(&mut self, reason: FinishReason, elapsed_secs: f64) -> Vec<SessionEvent> {
        self.metronome.disarm();
        self.state = SessionState::Finished;

        let final_stats = self.stats;
        self.final_key_stats = Some(self.key_stats.clone());

        let result = SessionResult {
            stats: final_stats,
            raw_speed: final_stats.raw_speed(),
            reason,
            elapsed_secs,
            mode: self.config.mode,
            duration_secs: self.config.duration_secs,
            max_streak: self.max_streak,
            wpm_series: self.wpm_series.clone(),
            key_stats: self.key_stats.clone(),
        };

        info!(
            reason = ?reason,
            wpm = final_stats.wpm,
            accuracy = final_stats.accuracy,
            "session finished"
        );

        let entry = self.history.entry_at(
            final_stats.wpm,
            final_stats.accuracy,
            self.config.mode.history_label(self.config.duration_secs),
            &Local::now(),
        );
        if let Err(err) = self.history.append(entry) {
            warn!(error = %err, "failed to persist history");
        }

        let mut events = vec![SessionEvent::Finished { reason }];
        if result.celebrates() {
            events.push(SessionEvent::Celebration);
        }
        self.last_result = Some(result);
        events
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config: self.config,
            state: self.state,
            text: self.text.iter().collect(),
            typed: self.typed.iter().collect(),
            remaining_secs: self.remaining_secs,
            stats: self.stats,
            wpm_series: self.wpm_series.clone(),
            streak: self.streak,
            max_streak: self.max_streak,
            key_stats: self.final_key_stats.clone(),
            history: self.history.entries().to_vec(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn text_source(&self) -> TextSource {
        self.text_source
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn stats(&self) -> LiveStats {
        self.stats
    }

    pub fn wpm_series(&self) -> &[WpmSample] {
        &self.wpm_series
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    pub fn final_key_stats(&self) -> Option<&KeyAccuracyStore> {
        self.final_key_stats.as_ref()
    }

    pub fn last_result(&self) -> Option<&SessionResult> {
        self.last_result.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    /// Cumulative record feeding smart mode; survives resets.
    pub fn key_stats(&self) -> &KeyAccuracyStore {
        &self.key_stats
    }

    pub fn key_stats_mut(&mut self) -> &mut KeyAccuracyStore {
        &mut self.key_stats
    }

    pub fn metronome(&self) -> &Metronome {
        &self.metronome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mode::Mode;
    use crate::store::kv::MemoryKvStore;
    use std::time::Duration;

    fn session(mode: Mode, duration: u32) -> TypingSession<MemoryKvStore> {
        let config = SessionConfig::new(duration, mode).unwrap();
        TypingSession::with_rng(
            config,
            HistoryStore::new(MemoryKvStore::new()),
            SmallRng::seed_from_u64(11),
        )
    }

    fn prefix(session: &TypingSession<MemoryKvStore>, n: usize) -> String {
        session.text()[..n].iter().collect()
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session(Mode::Easy, 30);
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.typed().is_empty());
        assert_eq!(s.remaining_secs(), 30);
        assert_eq!(s.stats(), LiveStats::default());
        assert!(!s.metronome().is_armed());
    }

    #[test]
    fn test_first_keystroke_starts_session() {
        let mut s = session(Mode::Easy, 30);
        let t0 = Instant::now();
        let first = prefix(&s, 1);
        let events = s.set_input_at(&first, t0);
        assert_eq!(events[0], SessionEvent::Started);
        assert!(s.is_active());
        assert!(s.metronome().is_armed());
    }

    #[test]
    fn test_wrong_first_keystroke_still_starts() {
        let mut s = session(Mode::Easy, 30);
        let events = s.set_input_at("#", Instant::now());
        assert!(s.is_active());
        assert_eq!(s.stats().accuracy, 0);
        assert_eq!(s.streak(), 0);
        assert!(events.contains(&SessionEvent::Keystroke {
            correct: false,
            sound: SoundTheme::None
        }));
    }

    #[test]
    fn test_streak_resets_on_miss() {
        let mut s = session(Mode::Easy, 30);
        let t0 = Instant::now();
        let text: String = s.text().iter().collect();
        let mut typed = String::new();
        for (i, ch) in text.chars().take(3).enumerate() {
            typed.push(ch);
            s.set_input_at(&typed, t0 + Duration::from_millis(100 * i as u64));
        }
        assert_eq!(s.streak(), 3);
        typed.push('#');
        s.set_input_at(&typed, t0 + Duration::from_millis(400));
        assert_eq!(s.streak(), 0);
        assert_eq!(s.max_streak(), 3);
    }

    #[test]
    fn test_backspace_has_no_side_effects() {
        let mut s = session(Mode::Easy, 30);
        let t0 = Instant::now();
        let two = prefix(&s, 2);
        s.set_input_at(&two, t0 + Duration::from_secs(1));
        let stats = s.stats();
        let streak = s.streak();
        let key_stats = s.key_stats().clone();

        let one = prefix(&s, 1);
        let events = s.set_input_at(&one, t0 + Duration::from_millis(1800));
        assert!(events.is_empty());
        assert_eq!(s.typed().len(), 1);
        assert_eq!(s.stats(), stats);
        assert_eq!(s.streak(), streak);
        assert_eq!(s.key_stats(), &key_stats);
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let mut s = session(Mode::Easy, 30);
        assert!(s.tick().is_empty());
        assert_eq!(s.remaining_secs(), 30);
        assert!(s.wpm_series().is_empty());
    }

    #[test]
    fn test_ticks_build_series() {
        let mut s = session(Mode::Easy, 30);
        let t0 = Instant::now();
        let first = prefix(&s, 1);
        s.set_input_at(&first, t0);
        s.advance(t0 + Duration::from_millis(3500));
        let elapsed: Vec<u32> = s.wpm_series().iter().map(|p| p.elapsed_secs).collect();
        assert_eq!(elapsed, vec![1, 2, 3]);
        assert_eq!(s.remaining_secs(), 27);
    }

    #[test]
    fn test_time_up_finishes() {
        let mut s = session(Mode::Easy, 3);
        let t0 = Instant::now();
        let first = prefix(&s, 1);
        s.set_input_at(&first, t0);
        let events = s.advance(t0 + Duration::from_secs(10));
        assert!(events.contains(&SessionEvent::Finished {
            reason: FinishReason::TimeUp
        }));
        assert!(s.is_finished());
        assert_eq!(s.remaining_secs(), 0);
        assert_eq!(s.wpm_series().len(), 2);
        assert!(!s.metronome().is_armed());
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_input_after_deadline_does_not_count() {
        let mut s = session(Mode::Quote, 3);
        let text: String = s.text().iter().collect();
        let t0 = Instant::now();
        s.set_input_at(&text[..1], t0);
        let before = s.stats();
        let key_stats = s.key_stats().clone();

        let events = s.set_input_at(&text, t0 + Duration::from_secs(10));

        assert!(s.is_finished());
        assert_eq!(s.remaining_secs(), 0);
        assert_eq!(
            events.last(),
            Some(&SessionEvent::Finished {
                reason: FinishReason::TimeUp
            })
        );
        assert!(!events.contains(&SessionEvent::Celebration));
        assert_eq!(s.typed().len(), 1);
        assert_eq!(s.streak(), 1);
        assert_eq!(s.key_stats(), &key_stats);
        let result = s.last_result().unwrap();
        assert_eq!(result.reason, FinishReason::TimeUp);
        assert_eq!(result.stats, before);
    }

    #[test]
    fn test_input_runs_due_ticks_first() {
        let mut s = session(Mode::Easy, 30);
        let t0 = Instant::now();
        s.set_input_at(&prefix(&s, 1), t0);
        let events = s.set_input_at(&prefix(&s, 2), t0 + Duration::from_millis(2500));
        assert_eq!(
            &events[..2],
            &[
                SessionEvent::Tick { remaining_secs: 29 },
                SessionEvent::Tick { remaining_secs: 28 },
            ]
        );
        assert!(matches!(events[2], SessionEvent::Keystroke { correct: true, .. }));
        assert_eq!(s.remaining_secs(), 28);
    }

    #[test]
    fn test_sound_change_keeps_running_session() {
        let mut s = session(Mode::Easy, 30);
        let t0 = Instant::now();
        s.set_input_at(&prefix(&s, 2), t0);
        let text: Vec<char> = s.text().to_vec();

        s.set_sound(SoundTheme::Click);

        assert!(s.is_active());
        assert_eq!(s.text(), &text[..]);
        assert_eq!(s.typed().len(), 2);
        assert_eq!(s.config().sound, SoundTheme::Click);
        let events = s.set_input_at(&prefix(&s, 3), t0 + Duration::from_millis(300));
        assert!(events.contains(&SessionEvent::Keystroke {
            correct: true,
            sound: SoundTheme::Click
        }));
    }

    #[test]
    fn test_overflow_is_dropped() {
        let mut s = session(Mode::Quote, 30);
        let text: String = s.text().iter().collect();
        let overlong = format!("{text}extra");
        s.set_input_at(&overlong, Instant::now() + Duration::from_secs(5));
        assert_eq!(s.typed().len(), s.text().len());
        assert!(s.is_finished());
    }

    #[test]
    fn test_input_after_finish_ignored() {
        let mut s = session(Mode::Quote, 30);
        let text: String = s.text().iter().collect();
        let t0 = Instant::now();
        s.set_input_at(&text[..1], t0);
        s.set_input_at(&text, t0 + Duration::from_secs(5));
        assert!(s.is_finished());
        let events = s.set_input_at(&text[..1], t0 + Duration::from_secs(6));
        assert!(events.is_empty());
        assert_eq!(s.typed().len(), s.text().len());
    }

    #[test]
    fn test_final_key_stats_only_after_finish() {
        let mut s = session(Mode::Quote, 30);
        let text: String = s.text().iter().collect();
        let t0 = Instant::now();
        s.set_input_at(&text[..1], t0);
        assert!(s.snapshot().key_stats.is_none());
        s.set_input_at(&text, t0 + Duration::from_secs(5));
        assert!(s.snapshot().key_stats.is_some());
    }

    #[test]
    fn test_reset_keeps_key_stats() {
        let mut s = session(Mode::Easy, 30);
        s.set_input_at("#", Instant::now());
        assert!(!s.key_stats().is_empty());
        s.reset();
        assert_eq!(s.state(), SessionState::Idle);
        assert!(!s.key_stats().is_empty());
        assert_eq!(s.max_streak(), 0);
        assert!(!s.metronome().is_armed());
    }

    #[test]
    fn test_reconfigure_starts_fresh() {
        let mut s = session(Mode::Easy, 30);
        let t0 = Instant::now();
        let first = prefix(&s, 1);
        s.set_input_at(&first, t0);
        s.reconfigure(SessionConfig::new(60, Mode::Hard).unwrap());
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.remaining_secs(), 60);
        assert_eq!(s.text_source(), TextSource::Hard);
        // a timer from the old session must not touch the new one
        assert!(s.advance(t0 + Duration::from_secs(5)).is_empty());
        assert_eq!(s.remaining_secs(), 60);
    }
}
