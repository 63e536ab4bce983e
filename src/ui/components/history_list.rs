use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use keypace::store::history::HistoryEntry;

use crate::ui::theme::Theme;

pub struct HistoryList<'a> {
    entries: &'a [HistoryEntry],
    theme: &'a Theme,
}

impl<'a> HistoryList<'a> {
    pub fn new(entries: &'a [HistoryEntry], theme: &'a Theme) -> Self {
        Self { entries, theme }
    }
}

impl Widget for HistoryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let block = Block::bordered()
            .title(" Recent Tests ")
            .border_style(Style::default().fg(theme.frame));

        if self.entries.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No tests yet",
                Style::default().fg(theme.muted),
            )))
            .block(block)
            .render(area, buf);
            return;
        }

        let lines: Vec<Line> = self
            .entries
            .iter()
            .map(|entry| {
                let mut accuracy_style = Style::default().fg(theme.accuracy(entry.accuracy));
                if entry.is_perfect() {
                    accuracy_style = accuracy_style.add_modifier(Modifier::BOLD);
                }
                let mut spans = vec![
                    Span::styled(
                        format!("{:>4} WPM", entry.wpm),
                        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {:>4}%", entry.accuracy), accuracy_style),
                    Span::styled(
                        format!("  {} \u{2022} {}", entry.date, entry.mode),
                        Style::default().fg(theme.muted),
                    ),
                ];
                if entry.is_fast() {
                    spans.push(Span::styled(" \u{26a1}", Style::default().fg(theme.hot)));
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
