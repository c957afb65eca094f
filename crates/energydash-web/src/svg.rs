//! Inline SVG rendering of the stacked energy bar chart.

use plotters::coord::ranged1d::SegmentValue;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use energydash_core::handlers::BarChart;

use crate::error::WebError;

/// Colors assigned to algorithms in legend order; wraps around.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(0x63, 0x6e, 0xfa),
    RGBColor(0xef, 0x55, 0x3b),
    RGBColor(0x00, 0xcc, 0x96),
    RGBColor(0xab, 0x63, 0xfa),
    RGBColor(0xff, 0xa1, 0x5a),
    RGBColor(0x19, 0xd3, 0xf3),
    RGBColor(0xff, 0x66, 0x92),
    RGBColor(0xb6, 0xe8, 0x80),
    RGBColor(0xff, 0x97, 0xff),
    RGBColor(0xfe, 0xcb, 0x52),
];

const SIZE: (u32, u32) = (720, 420);
const FONT: &str = "sans-serif";

/// Color for the `index`th algorithm.
#[must_use]
pub fn color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Render the chart: one bar per algorithm, one stacked segment per
/// measurement, with a legend in the upper right.
pub fn render_bar_chart(chart: &BarChart) -> Result<String, WebError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        draw_chart(&root, chart)?;
        root.present()?;
    }
    Ok(svg)
}

fn draw_chart(root: &DrawingArea<SVGBackend<'_>, Shift>, chart: &BarChart) -> Result<(), WebError> {
    root.fill(&WHITE)?;
    let area = root.titled(&chart.title, (FONT, 20))?;

    if chart.is_empty() {
        let (width, height) = area.dim_in_pixel();
        let center = (
            i32::try_from(width / 2).unwrap_or(0),
            i32::try_from(height / 2).unwrap_or(0),
        );
        let style = (FONT, 16)
            .into_font()
            .color(&BLACK.mix(0.6))
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw_text("No data", &style, center)?;
        return Ok(());
    }

    let legend = chart.legend();
    // A single-value integer range collapses to a point, so keep at least two segments.
    let last = u32::try_from(legend.len().saturating_sub(1))
        .unwrap_or(u32::MAX)
        .max(1);
    let max = chart.max_total();
    let y_max = if max > 0.0 { max * 1.05 } else { 1.0 };

    let mut ctx = ChartBuilder::on(&area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..last).into_segmented(), 0f64..y_max)?;

    let label = |value: &SegmentValue<u32>| match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => legend
            .get(*i as usize)
            .map_or_else(String::new, |name| (*name).to_string()),
        SegmentValue::Last => String::new(),
    };
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(legend.len())
        .x_label_formatter(&label)
        .x_desc("Algorithm")
        .y_desc("Energy Consumption")
        .label_style((FONT, 12))
        .draw()?;

    for (index, algorithm) in legend.iter().enumerate() {
        let slot = u32::try_from(index).unwrap_or(u32::MAX);
        let fill = color(index);
        let mut bottom = 0.0;
        let segments: Vec<Rectangle<(SegmentValue<u32>, f64)>> = chart
            .bars
            .iter()
            .filter(|bar| bar.algorithm == *algorithm)
            .map(|bar| {
                let top = bottom + bar.energy.max(0.0);
                let mut rect = Rectangle::new(
                    [
                        (SegmentValue::Exact(slot), bottom),
                        (SegmentValue::Exact(slot + 1), top),
                    ],
                    fill.filled(),
                );
                rect.set_margin(0, 0, 8, 8);
                bottom = top;
                rect
            })
            .collect();

        ctx.draw_series(segments)?
            .label(*algorithm)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], fill.filled()));
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.4))
        .label_font((FONT, 12))
        .draw()?;
    Ok(())
}
