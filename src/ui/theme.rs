use ratatui::style::Color;

/// Streak length at which the HUD counter lights up.
pub const HOT_STREAK: u32 = 10;

/// The single palette every screen draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub hit: Color,
    pub miss: Color,
    pub miss_bg: Color,
    pub caret_fg: Color,
    pub caret_bg: Color,
    pub frame: Color,
    pub highlight: Color,
    pub good: Color,
    pub hot: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0x28, 0x28, 0x28),
            text: Color::Rgb(0xeb, 0xdb, 0xb2),
            muted: Color::Rgb(0x7c, 0x6f, 0x64),
            hit: Color::Rgb(0xb8, 0xbb, 0x26),
            miss: Color::Rgb(0xfb, 0x49, 0x34),
            miss_bg: Color::Rgb(0x4a, 0x2a, 0x28),
            caret_fg: Color::Rgb(0x28, 0x28, 0x28),
            caret_bg: Color::Rgb(0xfa, 0xbd, 0x2f),
            frame: Color::Rgb(0x50, 0x49, 0x45),
            highlight: Color::Rgb(0x83, 0xa5, 0x98),
            good: Color::Rgb(0x8e, 0xc0, 0x7c),
            hot: Color::Rgb(0xfe, 0x80, 0x19),
        }
    }
}

impl Theme {
    pub fn streak(&self, streak: u32) -> Color {
        if streak >= HOT_STREAK { self.hot } else { self.text }
    }

    /// Perfect runs in green, runs at or under 80% in red.
    pub fn accuracy(&self, accuracy: u32) -> Color {
        match accuracy {
            100.. => self.good,
            81..=99 => self.text,
            _ => self.miss,
        }
    }
}
