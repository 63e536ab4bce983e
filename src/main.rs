mod app;
mod event;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;
use tracing_subscriber::EnvFilter;

use keypace::config::Config;
use keypace::session::mode::{Mode, SoundTheme};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};

const LOG_ENV: &str = "KEYPACE_LOG";
const LOG_FILE: &str = "keypace.log";

#[derive(Parser)]
#[command(name = "keypace", version, about = "Timed typing tests in the terminal")]
struct Cli {
    #[arg(short, long, help = "Test length in seconds")]
    duration: Option<u32>,

    #[arg(short, long, help = "Text mode (easy, hard, smart, quote)")]
    mode: Option<Mode>,

    #[arg(short, long, help = "Keystroke sound (none, click, osu, typewriter)")]
    sound: Option<SoundTheme>,

    #[arg(short, long, help = "Number of words per test")]
    words: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(duration) = cli.duration {
        config.duration_secs = duration;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(sound) = cli.sound {
        config.sound = sound;
    }
    if let Some(words) = cli.words {
        config.word_count = words;
    }
    config.validate();

    init_logging(&config.data_dir())?;
    info!(mode = %config.mode, duration = config.duration_secs, "starting keypace");

    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Route tracing output to a file so it never tears the alternate screen.
fn init_logging(data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))
        .context("failed to open log file")?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let event = events.next()?;
        let now = Instant::now();
        // Due ticks land before the key that follows them.
        app.on_tick(now);
        if let AppEvent::Key(key) = event {
            handle_key(app, key, now);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.reset(),
        KeyCode::F(1) => app.cycle_mode(),
        KeyCode::F(2) => app.cycle_duration(),
        KeyCode::F(3) => app.cycle_sound(),
        KeyCode::F(4) => app.toggle_history(),
        _ if app.screen == AppScreen::History => {}
        KeyCode::Backspace => app.backspace(now),
        KeyCode::Char(ch) => app.type_char(ch, now),
        _ => {}
    }
}
