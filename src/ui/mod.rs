pub mod components;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use keypace::generator::TextSource;

use crate::app::{App, AppScreen};
use crate::ui::components::history_list::HistoryList;
use crate::ui::components::hud::Hud;
use crate::ui::components::result_summary::ResultSummary;
use crate::ui::components::typing_area::TypingArea;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;
    let session = &app.session;

    frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    let config = session.config();
    let mut header = vec![
        Span::styled(
            " keypace ",
            Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  mode: {}  time: {}s  sound: {}",
                config.mode, config.duration_secs, config.sound
            ),
            Style::default().fg(theme.muted),
        ),
    ];
    if session.text_source() == TextSource::Adaptive {
        header.push(Span::styled(
            "  drilling weak keys",
            Style::default().fg(theme.hot),
        ));
    }
    if app.celebrating {
        header.push(Span::styled(
            "  \u{1f389} great run!",
            Style::default().fg(theme.good).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(header)), rows[0]);

    match app.screen {
        AppScreen::History => {
            frame.render_widget(
                HistoryList::new(session.history(), &app.theme),
                rows[1].union(rows[2]),
            );
        }
        AppScreen::Typing => match session.last_result() {
            Some(result) if session.is_finished() => {
                frame.render_widget(
                    ResultSummary::new(result, &app.theme),
                    rows[1].union(rows[2]),
                );
            }
            _ => {
                frame.render_widget(
                    Hud::new(
                        session.remaining_secs(),
                        session.stats(),
                        session.streak(),
                        &app.theme,
                    ),
                    rows[1],
                );
                frame.render_widget(
                    TypingArea::new(session.text(), session.typed(), &app.theme),
                    rows[2],
                );
            }
        },
    }

    let footer = if session.is_active() {
        "tab: restart   esc: quit"
    } else {
        "type to start   tab: new text   f1: mode   f2: time   f3: sound   f4: history   esc: quit"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(footer, Style::default().fg(theme.muted))),
        rows[3],
    );
}
