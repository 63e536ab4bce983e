use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

use keypace::config::Config;
use keypace::cue::{self, CueSink, TerminalBell};
use keypace::session::game::{SessionEvent, TypingSession};
use keypace::store::history::HistoryStore;
use keypace::store::kv::{FileKvStore, KvStore, MemoryKvStore};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Typing,
    History,
}

pub struct App {
    pub screen: AppScreen,
    pub session: TypingSession<Box<dyn KvStore>>,
    pub config: Config,
    pub theme: Theme,
    pub celebrating: bool,
    pub should_quit: bool,
    /// Mirror of the hidden text field the session reads from.
    field: String,
    cues: Box<dyn CueSink>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let store: Box<dyn KvStore> = match FileKvStore::new(config.data_dir()) {
            Ok(store) => Box::new(store),
            Err(err) => {
                warn!(error = %err, "history will not be saved this run");
                Box::new(MemoryKvStore::new())
            }
        };
        Self::with_parts(config, store, Box::new(TerminalBell::stdout()))
    }

    pub fn with_parts(
        config: Config,
        store: Box<dyn KvStore>,
        cues: Box<dyn CueSink>,
    ) -> Result<Self> {
        let session = TypingSession::new(config.session_config()?, HistoryStore::new(store));

        Ok(Self {
            screen: AppScreen::Typing,
            session,
            config,
            theme: Theme::default(),
            celebrating: false,
            should_quit: false,
            field: String::new(),
            cues,
        })
    }

    pub fn type_char(&mut self, ch: char, now: Instant) {
        self.field.push(ch);
        self.sync_field(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        self.field.pop();
        self.sync_field(now);
    }

    fn sync_field(&mut self, now: Instant) {
        let events = self.session.set_input_at(&self.field, now);
        // The session may have clamped or refused the value.
        self.field = self.session.typed().iter().collect();
        self.handle_events(&events);
    }

    pub fn on_tick(&mut self, now: Instant) {
        let events = self.session.advance(now);
        self.handle_events(&events);
    }

    fn handle_events(&mut self, events: &[SessionEvent]) {
        cue::dispatch(events, self.cues.as_mut());
        if events.contains(&SessionEvent::Celebration) {
            self.celebrating = true;
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.field.clear();
        self.celebrating = false;
        self.screen = AppScreen::Typing;
    }

    pub fn cycle_mode(&mut self) {
        self.config.mode = self.config.mode.next();
        self.apply_config();
    }

    pub fn cycle_duration(&mut self) {
        self.config.duration_secs = self.session.config().next_duration_preset();
        self.apply_config();
    }

    /// Unlike mode and duration, the sound theme applies to the session in
    /// progress.
    pub fn cycle_sound(&mut self) {
        self.config.sound = self.config.sound.next();
        self.session.set_sound(self.config.sound);
        self.save_config();
    }

    pub fn toggle_history(&mut self) {
        self.screen = match self.screen {
            AppScreen::Typing => AppScreen::History,
            AppScreen::History => AppScreen::Typing,
        };
    }

    fn apply_config(&mut self) {
        match self.config.session_config() {
            Ok(session_config) => {
                self.session.reconfigure(session_config);
                self.field.clear();
                self.celebrating = false;
            }
            Err(err) => warn!(error = %err, "ignoring invalid session config"),
        }
        self.save_config();
    }

    fn save_config(&self) {
        if let Err(err) = self.config.save() {
            warn!(error = %err, "failed to save config");
        } else {
            info!(mode = %self.config.mode, duration = self.config.duration_secs, "config saved");
        }
    }
}
