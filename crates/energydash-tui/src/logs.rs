//! Scrollable log panel fed by the tracing bridge.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Oldest lines are dropped beyond this many.
pub const MAX_LOG_LINES: usize = 500;

/// Log lines plus scroll position.
///
/// `offset` is the first visible line. While `auto_scroll` is set, new lines
/// move the offset to the newest line.
#[derive(Debug, Clone)]
pub struct LogPanel {
    lines: Vec<String>,
    pub offset: usize,
    pub auto_scroll: bool,
    pub visible: bool,
}

impl LogPanel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            offset: 0,
            auto_scroll: true,
            visible: true,
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn last_index(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Append a line, evicting the oldest past [`MAX_LOG_LINES`].
    pub fn push(&mut self, line: String) {
        self.lines.push(line);
        if self.lines.len() > MAX_LOG_LINES {
            self.lines.remove(0);
            self.offset = self.offset.saturating_sub(1);
        }
        if self.auto_scroll {
            self.offset = self.last_index();
        }
    }

    pub fn scroll_up(&mut self) {
        self.auto_scroll = false;
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.offset = (self.offset + 1).min(self.last_index());
        if self.offset >= self.last_index() {
            self.auto_scroll = true;
        }
    }

    pub fn home(&mut self) {
        self.auto_scroll = false;
        self.offset = 0;
    }

    pub fn end(&mut self) {
        self.auto_scroll = true;
        self.offset = self.last_index();
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the log panel.
///
/// The view is anchored so the line at `offset` is the last visible one,
/// which keeps the newest lines on screen while auto-scrolling.
pub fn render_logs(frame: &mut Frame, area: Rect, panel: &LogPanel) {
    let theme = ColorTheme::default();
    let visible_height = area.height.saturating_sub(2) as usize; // borders
    let total = panel.lines.len();
    let first = (panel.offset + 1).saturating_sub(visible_height);

    let items: Vec<ListItem> = panel
        .lines
        .iter()
        .skip(first)
        .take(visible_height)
        .map(|line| ListItem::new(Line::raw(line.as_str())).style(theme.log_style(line)))
        .collect();

    let title = if total > visible_height {
        let pct = (panel.offset * 100) / total.saturating_sub(1).max(1);
        format!(" Logs ({pct}%) ")
    } else {
        " Logs ".to_string()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(theme.muted)),
    );

    frame.render_widget(list, area);
}
