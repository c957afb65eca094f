//! TUI header panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Render the header panel with the dataset overview.
pub fn render_header(frame: &mut Frame, area: Rect, records: usize, sizes: &[String]) {
    let theme = ColorTheme::default();
    let text = vec![Line::from(vec![
        Span::styled("Sorting Algorithm Energy Consumption", theme.header_style()),
        Span::raw(format!(
            " | {records} measurements | Input sizes: {}",
            sizes.join(", ")
        )),
    ])];

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .title(" EnergyDash ");

    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}
