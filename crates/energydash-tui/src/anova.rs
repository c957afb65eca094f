//! ANOVA calculator panels: dataset-driven and freeform.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use energydash_core::anova::AnovaRow;
use energydash_core::handlers::AnovaUpdate;

use crate::styles::ColorTheme;

const HEADERS: [&str; 5] = ["Source", "SS", "df", "MS", "F"];

fn stat(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.4}"))
}

fn anova_table(rows: &[AnovaRow]) -> Table<'static> {
    let theme = ColorTheme::default();
    let header = Row::new(HEADERS.map(Cell::from)).style(theme.header_style());
    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.source.label()),
                Cell::from(stat(Some(row.ss))),
                Cell::from(row.df.to_string()),
                Cell::from(stat(row.ms)),
                Cell::from(stat(row.f)),
            ])
        })
        .collect();
    Table::new(
        body,
        [
            Constraint::Length(15),
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ],
    )
    .header(header)
}

/// Render a conclusion line above its ANOVA table.
fn render_result(frame: &mut Frame, area: Rect, update: &AnovaUpdate) {
    let theme = ColorTheme::default();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let conclusion = Paragraph::new(update.conclusion.as_str())
        .style(theme.conclusion_style(&update.conclusion))
        .wrap(Wrap { trim: true });
    frame.render_widget(conclusion, chunks[0]);
    if !update.table.is_empty() {
        frame.render_widget(anova_table(&update.table), chunks[1]);
    }
}

/// Render the dataset ANOVA calculator for the selected input size.
pub fn render_anova_panel(
    frame: &mut Frame,
    area: Rect,
    input_size: &str,
    update: &AnovaUpdate,
    focused: bool,
) {
    let theme = ColorTheme::default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" ANOVA Calculator: ◀ {input_size} ▶ "))
        .border_style(theme.border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_result(frame, inner, update);
}

/// Render the freeform ANOVA calculator.
///
/// `editing` is the index of the focused field, if any.
pub fn render_freeform_panel(
    frame: &mut Frame,
    area: Rect,
    fields: &[String],
    editing: Option<usize>,
    update: &AnovaUpdate,
) {
    let theme = ColorTheme::default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Generalized ANOVA Calculator ")
        .border_style(theme.border_style(editing.is_some()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field_rows = u16::try_from(fields.len()).unwrap_or(u16::MAX);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(field_rows), Constraint::Min(0)])
        .split(inner);

    let lines: Vec<Line> = fields
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let focused = editing == Some(i);
            let label_style = if focused {
                Style::default().fg(theme.focus).add_modifier(Modifier::BOLD)
            } else {
                theme.muted_style()
            };
            let cursor = if focused { "_" } else { "" };
            let placeholder = if value.is_empty() && !focused {
                "comma-separated values"
            } else {
                ""
            };
            Line::from(vec![
                Span::styled(format!("Group {}: ", i + 1), label_style),
                Span::raw(format!("{value}{cursor}")),
                Span::styled(placeholder, theme.muted_style()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[0]);
    render_result(frame, chunks[1], update);
}

#[cfg(test)]
mod tests {
    use super::*;
    use energydash_core::handlers::calculate_generalized_anova;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(f: impl FnOnce(&mut Frame)) -> String {
        let backend = TestBackend::new(90, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        let buf = terminal.draw(f).unwrap();
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf.buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn stat_formatting() {
        assert_eq!(stat(Some(1.0)), "1.0000");
        assert_eq!(stat(None), "");
    }

    #[test]
    fn anova_panel_shows_table() {
        let update = calculate_generalized_anova(
            1,
            &[Some("5,6,7,8,9"), Some("3,4,5,2,6"), Some("8,7,9,6,10")],
        );
        let text = draw(|frame| {
            let area = frame.area();
            render_anova_panel(frame, area, "Small", &update, true);
        });
        assert!(text.contains("ANOVA Calculator: ◀ Small ▶"));
        assert!(text.contains("Reject the null hypothesis."));
        assert!(text.contains("Between Groups"));
        assert!(text.contains("8.6667"));
        assert!(text.contains("Total"));
    }

    #[test]
    fn freeform_panel_shows_fields() {
        let fields = vec!["1,2,3".to_string(), String::new(), "4,5".to_string()];
        let text = draw(|frame| {
            let area = frame.area();
            render_freeform_panel(frame, area, &fields, Some(2), &AnovaUpdate::default());
        });
        assert!(text.contains("Group 1: 1,2,3"));
        assert!(text.contains("Group 2: comma-separated values"));
        assert!(text.contains("Group 3: 4,5_"));
        assert!(!text.contains("Source"));
    }

    #[test]
    fn freeform_panel_shows_message() {
        let update = calculate_generalized_anova(1, &[Some("x")]);
        let text = draw(|frame| {
            let area = frame.area();
            render_freeform_panel(frame, area, &[String::new()], None, &update);
        });
        assert!(text.contains("Please enter valid numeric values."));
    }
}
