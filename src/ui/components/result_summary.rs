use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use keypace::session::result::{FinishReason, SessionResult};

use crate::ui::components::chart::WpmChart;
use crate::ui::theme::Theme;

const WEAKEST_SHOWN: usize = 5;

pub struct ResultSummary<'a> {
    result: &'a SessionResult,
    theme: &'a Theme,
}

impl<'a> ResultSummary<'a> {
    pub fn new(result: &'a SessionResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }
}

impl Widget for ResultSummary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let result = self.result;

        let title = match result.reason {
            FinishReason::Completed => " Test Result ",
            FinishReason::TimeUp => " Time's Up ",
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(theme.highlight));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(4),
            ])
            .split(inner);

        let label = Style::default().fg(theme.muted);
        let value = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
        let headline = Line::from(vec![
            Span::styled("WPM ", label),
            Span::styled(format!("{}", result.stats.wpm), value.fg(theme.highlight)),
            Span::styled("   Accuracy ", label),
            Span::styled(format!("{}%", result.stats.accuracy), value),
            Span::styled("   Time ", label),
            Span::styled(format!("{}s", result.duration_secs), value),
            Span::styled("   Raw ", label),
            Span::styled(format!("{}", result.raw_speed), value),
            Span::styled("   Best streak ", label),
            Span::styled(format!("{}", result.max_streak), value),
        ]);
        Paragraph::new(vec![headline, Line::from("")])
            .centered()
            .render(rows[0], buf);

        WpmChart::new(&result.wpm_series, result.duration_secs, theme).render(rows[1], buf);

        let weakest = result.key_stats.weakest(WEAKEST_SHOWN);
        let weak_line = if weakest.is_empty() {
            Line::from(Span::styled("No missed keys", Style::default().fg(theme.good)))
        } else {
            let mut spans = vec![Span::styled("Weakest keys: ", label)];
            for (key, record) in weakest {
                let shown = if key == ' ' { '\u{2423}' } else { key };
                spans.push(Span::styled(
                    format!("{shown} {:.0}%  ", record.miss_rate() * 100.0),
                    Style::default().fg(theme.miss),
                ));
            }
            Line::from(spans)
        };

        Paragraph::new(vec![
            weak_line,
            Line::from(Span::styled(result.share_text(), label)),
            Line::from(Span::styled(
                "tab: new test   f1: mode   f2: time   f3: sound   f4: history   esc: quit",
                label,
            )),
        ])
        .wrap(Wrap { trim: true })
        .render(rows[2], buf);
    }
}
