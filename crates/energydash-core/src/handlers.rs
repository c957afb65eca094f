//! Dashboard update handlers.
//!
//! Each handler is a pure function from the current input values to the new
//! output values. The web, TUI and CLI front ends all render these results.

use serde::Serialize;

use crate::anova::{one_way, AnovaRow, AnovaSummary, Significance};
use crate::constants::SIGNIFICANCE_LEVEL;
use crate::dataset::Dataset;
use crate::freeform::parse_groups;

/// Shown when a freeform field contains something that is not a number.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter valid numeric values.";

/// Shown when fewer than two freeform fields have values.
pub const TOO_FEW_GROUPS_MESSAGE: &str = "Please enter values for at least two groups.";

const SIGNIFICANT_SENTENCE: &str =
    "There is a significant difference in energy consumption among the algorithms.";
const NOT_SIGNIFICANT_SENTENCE: &str =
    "No significant difference in energy consumption among the algorithms.";
const UNDETERMINED_SENTENCE: &str =
    "Not enough data to test for a difference in energy consumption.";

/// One bar segment: a single measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub algorithm: String,
    pub energy: f64,
    /// Index of the algorithm in legend order, used to pick a color.
    pub color_index: usize,
}

/// Bar chart of energy per algorithm for one input size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Algorithms in legend order.
    #[must_use]
    pub fn legend(&self) -> Vec<&str> {
        let mut legend: Vec<&str> = Vec::new();
        for bar in &self.bars {
            if !legend.contains(&bar.algorithm.as_str()) {
                legend.push(&bar.algorithm);
            }
        }
        legend
    }

    /// Stacked height of each algorithm's bar, in legend order.
    #[must_use]
    pub fn totals(&self) -> Vec<(&str, f64)> {
        self.legend()
            .into_iter()
            .map(|algorithm| {
                let total = self
                    .bars
                    .iter()
                    .filter(|b| b.algorithm == algorithm)
                    .map(|b| b.energy)
                    .sum();
                (algorithm, total)
            })
            .collect()
    }

    /// Tallest stacked bar, or 0 for an empty chart.
    #[must_use]
    pub fn max_total(&self) -> f64 {
        self.totals()
            .into_iter()
            .map(|(_, total)| total)
            .fold(0.0, f64::max)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Output of the table/graph refresh handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphUpdate {
    pub chart: BarChart,
    pub summary: String,
}

/// Output of both ANOVA calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct AnovaUpdate {
    pub conclusion: String,
    pub table: Vec<AnovaRow>,
}

impl AnovaUpdate {
    fn message(text: &str) -> Self {
        Self {
            conclusion: text.to_string(),
            table: Vec::new(),
        }
    }

    fn from_summary(summary: &AnovaSummary) -> Self {
        let critical = summary
            .critical_value
            .map_or_else(|| "undefined".to_string(), |cv| format!("{cv:.2}"));
        Self {
            conclusion: format!(
                "F-Statistic: {:.2}, Critical Value: {critical}. Decision: {}",
                summary.f_statistic(),
                summary.decision()
            ),
            table: summary.table.rows().to_vec(),
        }
    }
}

fn no_measurements(input_size: &str) -> String {
    format!("No measurements for input size '{input_size}'.")
}

/// Title of the bar chart for an input size.
#[must_use]
pub fn chart_title(input_size: &str) -> String {
    format!("Energy Consumption for Input Size: {input_size}")
}

/// Run the ANOVA over the algorithms measured at one input size.
fn summarize_size(dataset: &Dataset, input_size: &str) -> Option<Result<AnovaSummary, String>> {
    let groups = dataset.groups_for(input_size);
    if groups.is_empty() {
        return None;
    }
    Some(
        one_way(&groups)
            .and_then(|table| table.summarize(SIGNIFICANCE_LEVEL))
            .map_err(|e| e.to_string()),
    )
}

/// Rebuild the bar chart and the ANOVA summary for the selected input size.
#[must_use]
pub fn update_graph(dataset: &Dataset, input_size: &str) -> GraphUpdate {
    let mut legend: Vec<&str> = Vec::new();
    let bars = dataset
        .filter_by_size(input_size)
        .map(|record| {
            let color_index = match legend.iter().position(|a| *a == record.algorithm) {
                Some(index) => index,
                None => {
                    legend.push(&record.algorithm);
                    legend.len() - 1
                }
            };
            Bar {
                algorithm: record.algorithm.clone(),
                energy: record.energy,
                color_index,
            }
        })
        .collect();
    let chart = BarChart {
        title: chart_title(input_size),
        bars,
    };

    let summary = match summarize_size(dataset, input_size) {
        None => no_measurements(input_size),
        Some(Err(e)) => {
            tracing::warn!(input_size, error = %e, "ANOVA failed");
            format!("ANOVA could not be computed: {e}")
        }
        Some(Ok(summary)) => {
            let p_value = summary
                .p_value
                .map_or_else(|| "undefined".to_string(), |p| format!("{p:.4}"));
            let sentence = match summary.significance() {
                Significance::Significant => SIGNIFICANT_SENTENCE,
                Significance::NotSignificant => NOT_SIGNIFICANT_SENTENCE,
                Significance::Undetermined => UNDETERMINED_SENTENCE,
            };
            format!(
                "ANOVA Results:\nF-Statistic: {:.2}\nP-Value: {p_value}\n{sentence}",
                summary.f_statistic()
            )
        }
    };

    tracing::debug!(input_size, bars = chart.bars.len(), "graph updated");
    GraphUpdate { chart, summary }
}

/// ANOVA calculator over the dataset, for the selected input size.
#[must_use]
pub fn calculate_anova(dataset: &Dataset, input_size: &str) -> AnovaUpdate {
    match summarize_size(dataset, input_size) {
        None => AnovaUpdate::message(&no_measurements(input_size)),
        Some(Err(e)) => {
            tracing::warn!(input_size, error = %e, "ANOVA failed");
            AnovaUpdate::message(&format!("ANOVA could not be computed: {e}"))
        }
        Some(Ok(summary)) => AnovaUpdate::from_summary(&summary),
    }
}

/// ANOVA calculator over freeform comma-separated fields.
///
/// Nothing is computed until the button has been clicked at least once.
/// Blank fields are skipped; at least two groups must have values.
#[must_use]
pub fn calculate_generalized_anova(n_clicks: u64, fields: &[Option<&str>]) -> AnovaUpdate {
    if n_clicks == 0 {
        return AnovaUpdate::default();
    }

    let groups = match parse_groups(fields) {
        Ok(groups) => groups,
        Err(e) => {
            tracing::debug!(error = %e, "rejected freeform input");
            return AnovaUpdate::message(INVALID_INPUT_MESSAGE);
        }
    };
    let groups: Vec<Vec<f64>> = groups.into_iter().filter(|g| !g.is_empty()).collect();
    if groups.len() < 2 {
        return AnovaUpdate::message(TOO_FEW_GROUPS_MESSAGE);
    }

    match one_way(&groups).and_then(|table| table.summarize(SIGNIFICANCE_LEVEL)) {
        Ok(summary) => AnovaUpdate::from_summary(&summary),
        Err(e) => AnovaUpdate::message(&format!("ANOVA could not be computed: {e}")),
    }
}
