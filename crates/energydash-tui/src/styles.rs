//! TUI styles and color themes.

use ratatui::style::{Color, Modifier, Style};

/// Colors assigned to algorithms in legend order; wraps around.
pub const SERIES_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::LightBlue,
    Color::LightRed,
    Color::LightGreen,
    Color::LightMagenta,
];

/// Color for the `index`th algorithm in the legend.
#[must_use]
pub fn series_color(index: usize) -> Color {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Color theme for the TUI.
pub struct ColorTheme {
    pub primary: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub muted: Color,
    pub border: Color,
    pub focus: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::Gray,
            focus: Color::Yellow,
        }
    }
}

impl ColorTheme {
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Border style of a panel, highlighted when it has focus.
    #[must_use]
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focus).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Style for an ANOVA conclusion line.
    #[must_use]
    pub fn conclusion_style(&self, conclusion: &str) -> Style {
        if conclusion.contains("Reject the null") && !conclusion.contains("Fail to") {
            Style::default().fg(self.success).add_modifier(Modifier::BOLD)
        } else if conclusion.starts_with("Please") || conclusion.contains("could not") {
            Style::default().fg(self.error)
        } else {
            Style::default()
        }
    }

    /// Style for a log line, by tracing level.
    #[must_use]
    pub fn log_style(&self, line: &str) -> Style {
        if line.contains("ERROR") {
            Style::default().fg(self.error)
        } else if line.contains("WARN") {
            Style::default().fg(self.warning)
        } else {
            Style::default()
        }
    }
}
