//! Plain-text table formatting.

use std::fmt::Write as _;

use energydash_core::anova::AnovaRow;

/// Column headers of an ANOVA table.
pub const ANOVA_HEADERS: [&str; 5] = [
    "Source of Variation",
    "Sum of Squares",
    "Degree of Freedom",
    "Mean Square",
    "F",
];

/// Format an optional statistic with four decimals; absent values are blank.
#[must_use]
pub fn format_stat(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.4}"))
}

/// Format an ANOVA table as aligned text, numbers right-aligned.
#[must_use]
pub fn format_anova_table(rows: &[AnovaRow]) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.source.label().to_string(),
                format_stat(Some(row.ss)),
                row.df.to_string(),
                format_stat(row.ms),
                format_stat(row.f),
            ]
        })
        .collect();

    let mut widths = ANOVA_HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = ANOVA_HEADERS
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (h, w))| if i == 0 { format!("{h:<w$}") } else { format!("{h:>w$}") })
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end());
    let _ = writeln!(out, "{}", "-".repeat(widths.iter().sum::<usize>() + 2 * 4));
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (c, w))| if i == 0 { format!("{c:<w$}") } else { format!("{c:>w$}") })
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

/// Format dataset rows as aligned text, left-aligned.
#[must_use]
pub fn format_data_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", format_line(columns));
    let _ = writeln!(
        out,
        "{}",
        "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1))
    );
    for row in rows {
        let _ = writeln!(out, "{}", format_line(row));
    }
    out
}
