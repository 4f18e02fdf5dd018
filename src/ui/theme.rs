use tui::style::{Color, Modifier, Style};

use crate::family::Severity;

// Accent and header colors of the app palette.
const ACCENT: Color = Color::Rgb(0xb8, 0x7c, 0xf5);
const HEADER: Color = Color::Rgb(0xfa, 0x62, 0x55);

#[derive(Debug, Clone)]
pub struct Theme {
    pub header_style: Style,
    pub weekday_style: Style,
    pub focus_style: Style,
    pub today_style: Style,
    pub today_symbol: Option<char>,
    pub owner_style: Style,
    pub dim_style: Style,
    pub placeholder_style: Style,
    pub chip_style: Style,
    pub chip_active_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_style: Style::default().fg(HEADER).add_modifier(Modifier::BOLD),
            weekday_style: Style::default().fg(Color::Yellow),
            focus_style: Style::default().bg(ACCENT),
            today_style: Style::default().add_modifier(Modifier::ITALIC),
            today_symbol: Some('*'),
            owner_style: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            dim_style: Style::default().fg(Color::DarkGray),
            placeholder_style: Style::default().fg(Color::Gray),
            chip_style: Style::default(),
            chip_active_style: Style::default().bg(ACCENT).add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// The one color token the grid shows per day.
    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity.rgb() {
            Some((r, g, b)) => Color::Rgb(r, g, b),
            None => Color::DarkGray,
        }
    }

    pub fn severity_style(&self, severity: Severity) -> Style {
        Style::default().fg(self.severity_color(severity))
    }
}
