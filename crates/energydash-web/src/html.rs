//! Server-side HTML rendering of the dashboard page.

use std::fmt::Write as _;

use energydash_core::anova::AnovaRow;
use energydash_core::dataset::TablePage;
use energydash_core::handlers::{AnovaUpdate, GraphUpdate};

use crate::svg::render_bar_chart;

/// Placeholders of the freeform group fields.
pub const GROUP_PLACEHOLDERS: [&str; 3] = ["e.g., 5,6,7,8,9", "e.g., 3,4,5,2,6", "e.g., 8,7,9,6,10"];

const ANOVA_HEADERS: [&str; 5] = [
    "Source of Variation",
    "Sum of Squares",
    "Degree of Freedom",
    "Mean Square",
    "F",
];

const STYLE: &str = r"
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;margin:0 auto;max-width:1100px;padding:16px;color:#222}
h1{text-align:center}
h2{margin-top:32px;border-bottom:1px solid #ddd;padding-bottom:4px}
table{border-collapse:collapse;margin:8px 0}
th,td{border:1px solid #ccc;padding:4px 10px;text-align:left}
th{background:#f3f3f3}
td.num{text-align:right;font-variant-numeric:tabular-nums}
.pager{display:flex;gap:8px;align-items:center}
.chart{max-width:720px;overflow-x:auto}
.muted{fill:#888;color:#888}
pre.summary{background:#f8f8f8;padding:8px;white-space:pre-wrap}
.conclusion{font-weight:600}
.field{display:block;margin:6px 0}
.field input{width:260px}
";

/// Escape text for HTML content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub table: TablePage,
    pub input_sizes: Vec<String>,
    pub input_size: String,
    pub anova_input_size: String,
    pub graph: GraphUpdate,
    pub anova: AnovaUpdate,
    pub general: AnovaUpdate,
    pub fields: [String; 3],
    pub n_clicks: u64,
}

fn stat(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.4}"))
}

fn render_select(out: &mut String, name: &str, options: &[String], selected: &str) {
    let _ = write!(out, r#"<select name="{name}" onchange="this.form.submit()">"#);
    for option in options {
        let marker = if option == selected { " selected" } else { "" };
        let value = escape(option);
        let _ = write!(out, r#"<option value="{value}"{marker}>{value}</option>"#);
    }
    out.push_str("</select>");
}

fn render_data_table(out: &mut String, page: &TablePage) {
    out.push_str("<table><thead><tr>");
    for column in &page.columns {
        let _ = write!(out, "<th>{}</th>", escape(column));
    }
    out.push_str("</tr></thead><tbody>");
    for row in &page.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape(cell));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");

    let _ = write!(
        out,
        r#"<div class="pager"><input type="hidden" name="page" value="{}">"#,
        page.page
    );
    let prev_disabled = if page.page == 0 { " disabled" } else { "" };
    let next_disabled = if page.page + 1 >= page.page_count { " disabled" } else { "" };
    let _ = write!(
        out,
        r#"<button type="submit" name="goto" value="{}"{prev_disabled}>Previous</button><span>Page {} of {} ({} rows)</span><button type="submit" name="goto" value="{}"{next_disabled}>Next</button></div>"#,
        page.page.saturating_sub(1),
        page.page + 1,
        page.page_count,
        page.total_rows,
        page.page + 1
    );
}

/// ANOVA table rows; nothing when the table is empty.
fn render_anova_table(out: &mut String, rows: &[AnovaRow]) {
    if rows.is_empty() {
        return;
    }
    out.push_str("<table><thead><tr>");
    for header in ANOVA_HEADERS {
        let _ = write!(out, "<th>{header}</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        let _ = write!(
            out,
            r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
            row.source.label(),
            stat(Some(row.ss)),
            row.df,
            stat(row.ms),
            stat(row.f)
        );
    }
    out.push_str("</tbody></table>");
}

fn render_conclusion(out: &mut String, update: &AnovaUpdate) {
    let _ = write!(
        out,
        r#"<p class="conclusion">{}</p>"#,
        escape(&update.conclusion)
    );
}

/// Render the complete dashboard page.
///
/// The page is a single GET form: dropdown changes resubmit it, the
/// pager buttons send `goto`, and the calculate button sends `calculate`.
#[must_use]
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::with_capacity(16 * 1024);
    let _ = write!(
        out,
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1"><title>Sorting Algorithm Energy Consumption Dashboard</title><style>{STYLE}</style></head><body>"#
    );
    out.push_str("<h1>Sorting Algorithm Energy Consumption Dashboard</h1>");
    out.push_str(r#"<form method="get" action="/">"#);

    out.push_str(r#"<section id="data"><h2>Data</h2>"#);
    render_data_table(&mut out, &view.table);
    out.push_str("</section>");

    out.push_str(r#"<section id="graph"><h2>Energy by Algorithm</h2><label>Select Input Size: "#);
    render_select(&mut out, "input_size", &view.input_sizes, &view.input_size);
    out.push_str("</label>");
    match render_bar_chart(&view.graph.chart) {
        Ok(svg) => {
            let _ = write!(out, r#"<div class="chart">{svg}</div>"#);
        }
        Err(e) => {
            tracing::warn!(error = %e, "bar chart rendering failed");
            out.push_str(r#"<p class="muted">Chart unavailable.</p>"#);
        }
    }
    let _ = write!(
        out,
        r#"<pre class="summary">{}</pre></section>"#,
        escape(&view.graph.summary)
    );

    out.push_str(r#"<section id="anova"><h2>ANOVA Calculator</h2><label>Input Size: "#);
    render_select(&mut out, "anova_input_size", &view.input_sizes, &view.anova_input_size);
    out.push_str("</label>");
    render_conclusion(&mut out, &view.anova);
    render_anova_table(&mut out, &view.anova.table);
    out.push_str("</section>");

    out.push_str(r#"<section id="general"><h2>Generalized ANOVA Calculator</h2>"#);
    for (i, (value, placeholder)) in view.fields.iter().zip(GROUP_PLACEHOLDERS).enumerate() {
        let _ = write!(
            out,
            r#"<label class="field">Group {n}: <input type="text" name="group{n}" value="{}" placeholder="{placeholder}"></label>"#,
            escape(value),
            n = i + 1
        );
    }
    let _ = write!(
        out,
        r#"<input type="hidden" name="n_clicks" value="{}"><button type="submit" name="calculate" value="1">Calculate ANOVA</button>"#,
        view.n_clicks
    );
    render_anova_table(&mut out, &view.general.table);
    render_conclusion(&mut out, &view.general);
    out.push_str("</section>");

    out.push_str("</form></body></html>");
    out
}
