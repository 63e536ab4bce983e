use std::time::{Duration, Instant};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Fixed-period tick schedule, independent of how often the caller polls.
/// Ticks fall on whole periods after arming; a disarmed metronome never fires.
#[derive(Clone, Debug)]
pub struct Metronome {
    period: Duration,
    armed_at: Option<Instant>,
    fired: u32,
}

impl Default for Metronome {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Metronome {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed_at: None,
            fired: 0,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.armed_at = Some(now);
        self.fired = 0;
    }

    pub fn disarm(&mut self) {
        self.armed_at = None;
        self.fired = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    pub fn fired(&self) -> u32 {
        self.fired
    }

    /// Number of ticks that became due since the last call, marking them fired.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(armed_at) = self.armed_at else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(armed_at);
        let total = (elapsed.as_nanos() / self.period.as_nanos().max(1)) as u32;
        let due = total.saturating_sub(self.fired);
        self.fired = self.fired.max(total);
        due
    }

    /// Time left until the next tick, if armed.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        let armed_at = self.armed_at?;
        let next = armed_at + self.period * (self.fired + 1);
        Some(next.saturating_duration_since(now))
    }
}
