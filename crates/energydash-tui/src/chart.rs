//! Energy bar chart and ANOVA summary panel.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use energydash_core::handlers::GraphUpdate;

use crate::styles::{series_color, ColorTheme};

/// Bar values are integers; energies keep two decimals of precision.
const VALUE_SCALE: f64 = 100.0;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled(energy: f64) -> u64 {
    (energy.max(0.0) * VALUE_SCALE).round() as u64
}

/// Render one horizontal bar per algorithm (its summed energy) above the
/// ANOVA summary text.
pub fn render_chart(frame: &mut Frame, area: Rect, update: &GraphUpdate, focused: bool) {
    let theme = ColorTheme::default();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(6)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" ◀ {} ▶ ", update.chart.title))
        .border_style(theme.border_style(focused));

    if update.chart.is_empty() {
        let empty = Paragraph::new("No data for this input size.")
            .style(theme.muted_style())
            .block(block);
        frame.render_widget(empty, chunks[0]);
    } else {
        let bars: Vec<Bar> = update
            .chart
            .totals()
            .into_iter()
            .enumerate()
            .map(|(index, (algorithm, total))| {
                let style = Style::default().fg(series_color(index));
                Bar::default()
                    .value(scaled(total))
                    .text_value(format!("{total:.2}"))
                    .label(Line::from(algorithm.to_string()))
                    .style(style)
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .max(scaled(update.chart.max_total()).max(1))
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, chunks[0]);
    }

    let summary = Paragraph::new(update.summary.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Summary "));
    frame.render_widget(summary, chunks[1]);
}
