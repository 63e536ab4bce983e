use std::io::{self, Write};

use crate::session::game::SessionEvent;
use crate::session::mode::SoundTheme;

/// Receives the engine's side-effect signals. Owned by the caller and passed
/// in explicitly; the engine itself never produces sound.
pub trait CueSink {
    fn keystroke(&mut self, sound: SoundTheme, correct: bool);

    fn celebrate(&mut self) {}
}

/// Forward every cue-worthy event in `events` to `sink`, in order.
pub fn dispatch<C: CueSink + ?Sized>(events: &[SessionEvent], sink: &mut C) {
    for event in events {
        match event {
            SessionEvent::Keystroke { correct, sound } => sink.keystroke(*sound, *correct),
            SessionEvent::Celebration => sink.celebrate(),
            _ => {}
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SilentCues;

impl CueSink for SilentCues {
    fn keystroke(&mut self, _sound: SoundTheme, _correct: bool) {}
}

/// Rings the terminal bell for every keystroke unless the theme is silent.
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
}

impl TerminalBell {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn ring(&mut self) {
        let _ = self.out.write_all(b"\x07");
        let _ = self.out.flush();
    }
}

impl<W: Write> CueSink for TerminalBell<W> {
    fn keystroke(&mut self, sound: SoundTheme, _correct: bool) {
        if !sound.is_silent() {
            self.ring();
        }
    }
}
