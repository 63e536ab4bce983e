use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph, Widget};

use keypace::session::result::WpmSample;

use crate::ui::theme::Theme;

/// Per-second WPM over the whole test window, with the run's mean as a
/// flat reference line.
pub struct WpmChart<'a> {
    samples: &'a [WpmSample],
    duration_secs: u32,
    theme: &'a Theme,
}

impl<'a> WpmChart<'a> {
    pub fn new(samples: &'a [WpmSample], duration_secs: u32, theme: &'a Theme) -> Self {
        Self {
            samples,
            duration_secs,
            theme,
        }
    }
}

/// Next multiple of ten strictly above `peak`.
fn wpm_ceiling(peak: u32) -> u32 {
    (peak / 10 + 1) * 10
}

fn mean_wpm(samples: &[WpmSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| f64::from(s.wpm)).sum::<f64>() / samples.len() as f64
}

impl Widget for WpmChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let block = Block::bordered()
            .title(" WPM per second ")
            .border_style(Style::default().fg(theme.frame));

        // One point draws no line.
        if self.samples.len() < 2 {
            Paragraph::new("Finished before two ticks; nothing to chart")
                .style(Style::default().fg(theme.muted))
                .centered()
                .block(block)
                .render(area, buf);
            return;
        }

        let window = f64::from(self.duration_secs.max(1));
        let points: Vec<(f64, f64)> = self
            .samples
            .iter()
            .map(|s| (f64::from(s.elapsed_secs), f64::from(s.wpm)))
            .collect();
        let mean = mean_wpm(self.samples);
        let mean_line = [(0.0, mean), (window, mean)];
        let ceiling = wpm_ceiling(self.samples.iter().map(|s| s.wpm).max().unwrap_or(0));

        let datasets = vec![
            Dataset::default()
                .name("wpm")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.highlight))
                .data(&points),
            Dataset::default()
                .name(format!("avg {mean:.0}"))
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.muted))
                .data(&mean_line),
        ];

        let axis_style = Style::default().fg(theme.muted);
        Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([0.0, window])
                    .labels([
                        "0s".to_string(),
                        format!("{}s", self.duration_secs / 2),
                        format!("{}s", self.duration_secs),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([0.0, f64::from(ceiling)])
                    .labels(["0".to_string(), (ceiling / 2).to_string(), ceiling.to_string()]),
            )
            .render(area, buf);
    }
}
