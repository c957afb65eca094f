//! Paged data table panel.

use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use energydash_core::dataset::TablePage;

use crate::styles::ColorTheme;

/// Render one page of the dataset.
pub fn render_data_table(frame: &mut Frame, area: Rect, page: &TablePage, focused: bool) {
    let theme = ColorTheme::default();

    let header = Row::new(page.columns.iter().map(|c| Cell::from(c.as_str())))
        .style(theme.header_style());
    let rows = page
        .rows
        .iter()
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.as_str()))));
    let widths = vec![Constraint::Fill(1); page.columns.len().max(1)];

    let title = format!(
        " Data: page {}/{} ({} rows) ",
        page.page + 1,
        page.page_count,
        page.total_rows
    );
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.border_style(focused)),
    );
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use energydash_core::dataset::{Dataset, EnergyRecord};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_page(page: &TablePage) -> String {
        let backend = TestBackend::new(60, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        let buf = terminal
            .draw(|frame| {
                let area = frame.area();
                render_data_table(frame, area, page, false);
            })
            .unwrap();
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
    fn renders_header_and_rows() {
        let records = (0..25)
            .map(|i| EnergyRecord::new(format!("Algo{i}"), "Small", f64::from(i)))
            .collect();
        let dataset = Dataset::from_records(records);
        let text = render_page(&dataset.page(1, 10));
        assert!(text.contains("Data: page 2/3 (25 rows)"));
        assert!(text.contains("Algorithm"));
        assert!(text.contains("Algo10"));
        assert!(!text.contains("Algo9 "));
    }

    #[test]
    fn renders_empty_page() {
        let text = render_page(&Dataset::default().page(0, 10));
        assert!(text.contains("page 1/1 (0 rows)"));
    }
}
