use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CharState {
    Correct,
    Incorrect(char),
    Cursor,
    Pending,
}

pub struct TypingArea<'a> {
    target: &'a [char],
    typed: &'a [char],
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(target: &'a [char], typed: &'a [char], theme: &'a Theme) -> Self {
        Self {
            target,
            typed,
            theme,
        }
    }
}

fn char_states(target: &[char], typed: &[char]) -> Vec<CharState> {
    target
        .iter()
        .enumerate()
        .map(|(i, &expected)| match typed.get(i) {
            Some(&actual) if actual == expected => CharState::Correct,
            Some(&actual) => CharState::Incorrect(actual),
            None if i == typed.len() => CharState::Cursor,
            None => CharState::Pending,
        })
        .collect()
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;

        let spans: Vec<Span> = self
            .target
            .iter()
            .zip(char_states(self.target, self.typed))
            .map(|(&expected, state)| match state {
                CharState::Correct => {
                    Span::styled(expected.to_string(), Style::default().fg(theme.hit))
                }
                // Show what was typed; a mistyped space would be invisible.
                CharState::Incorrect(actual) => {
                    let shown = if actual == ' ' { '\u{00b7}' } else { actual };
                    Span::styled(
                        shown.to_string(),
                        Style::default()
                            .fg(theme.miss)
                            .bg(theme.miss_bg)
                            .add_modifier(Modifier::UNDERLINED),
                    )
                }
                CharState::Cursor => Span::styled(
                    expected.to_string(),
                    Style::default()
                        .fg(theme.caret_fg)
                        .bg(theme.caret_bg),
                ),
                CharState::Pending => {
                    Span::styled(expected.to_string(), Style::default().fg(theme.muted))
                }
            })
            .collect();

        let block = Block::bordered()
            .border_style(Style::default().fg(theme.frame))
            .style(Style::default().bg(theme.background));

        Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
