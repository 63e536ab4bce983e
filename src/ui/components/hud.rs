use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use keypace::engine::metrics::LiveStats;

use crate::ui::theme::Theme;

/// Live counters shown above the practice text while a session is open.
pub struct Hud<'a> {
    remaining_secs: u32,
    stats: LiveStats,
    streak: u32,
    theme: &'a Theme,
}

impl<'a> Hud<'a> {
    pub fn new(remaining_secs: u32, stats: LiveStats, streak: u32, theme: &'a Theme) -> Self {
        Self {
            remaining_secs,
            stats,
            streak,
            theme,
        }
    }
}

impl Widget for Hud<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 4),
                Constraint::Ratio(1, 4),
                Constraint::Ratio(1, 4),
                Constraint::Ratio(1, 4),
            ])
            .split(area);

        let items = [
            ("Time", self.remaining_secs.to_string(), theme.highlight),
            ("WPM", self.stats.wpm.to_string(), theme.text),
            ("Accuracy", format!("{}%", self.stats.accuracy), theme.accuracy(self.stats.accuracy)),
            ("Streak", self.streak.to_string(), theme.streak(self.streak)),
        ];

        for ((label, value, color), cell) in items.into_iter().zip(cells.iter()) {
            let block = Block::bordered()
                .title(format!(" {label} "))
                .border_style(Style::default().fg(theme.frame));
            Paragraph::new(Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .centered()
            .block(block)
            .render(*cell, buf);
        }
    }
}
