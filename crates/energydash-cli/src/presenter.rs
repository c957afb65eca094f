//! Report presenters: styled text or JSON lines.

use std::io::{self, Write};

use serde::Serialize;

use energydash_core::constants::TABLE_PAGE_SIZE;
use energydash_core::dataset::Dataset;
use energydash_core::handlers::{AnovaUpdate, GraphUpdate};

use crate::output::{format_anova_table, format_data_table};
use crate::ui;

/// Trait for presenting dashboard results outside the interactive views.
pub trait ReportPresenter {
    /// Present a summary of the loaded dataset.
    fn present_dataset(&self, out: &mut dyn Write, dataset: &Dataset) -> io::Result<()>;

    /// Present the chart summary for one input size.
    fn present_graph(
        &self,
        out: &mut dyn Write,
        input_size: &str,
        update: &GraphUpdate,
    ) -> io::Result<()>;

    /// Present an ANOVA calculator result under a title.
    fn present_anova(&self, out: &mut dyn Write, title: &str, update: &AnovaUpdate)
        -> io::Result<()>;
}

/// Human-readable presenter.
pub struct CLIReportPresenter {
    quiet: bool,
}

impl CLIReportPresenter {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ReportPresenter for CLIReportPresenter {
    fn present_dataset(&self, out: &mut dyn Write, dataset: &Dataset) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(out, "{}", ui::header("Sorting Algorithm Energy Consumption"))?;
        writeln!(out, "Records: {}", dataset.len())?;
        writeln!(out, "Algorithms: {}", dataset.algorithms().join(", "))?;
        writeln!(out, "Input sizes: {}", dataset.input_sizes().join(", "))?;
        writeln!(out)?;
        write!(
            out,
            "{}",
            format_data_table(dataset.columns(), dataset.head(TABLE_PAGE_SIZE))
        )?;
        if dataset.len() > TABLE_PAGE_SIZE {
            writeln!(out, "... {} more rows", dataset.len() - TABLE_PAGE_SIZE)?;
        }
        writeln!(out)
    }

    fn present_graph(
        &self,
        out: &mut dyn Write,
        input_size: &str,
        update: &GraphUpdate,
    ) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(out, "{}", ui::header(&update.chart.title))?;
        for (algorithm, total) in update.chart.totals() {
            writeln!(out, "  {algorithm:<24} {total:>12.4}")?;
        }
        tracing::debug!(input_size, "presented graph summary");
        writeln!(out, "{}", update.summary)?;
        writeln!(out)
    }

    fn present_anova(
        &self,
        out: &mut dyn Write,
        title: &str,
        update: &AnovaUpdate,
    ) -> io::Result<()> {
        if self.quiet {
            return writeln!(out, "{}", update.conclusion);
        }
        writeln!(out, "{}", ui::header(title))?;
        if !update.table.is_empty() {
            write!(out, "{}", format_anova_table(&update.table))?;
        }
        if update.conclusion.contains("Reject the null") {
            writeln!(out, "{}", ui::highlight(&update.conclusion))?;
        } else {
            writeln!(out, "{}", update.conclusion)?;
        }
        writeln!(out)
    }
}

/// Presenter that writes one JSON object per line.
pub struct JsonReportPresenter;

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum JsonRecord<'a> {
    Dataset {
        records: usize,
        columns: &'a [String],
        algorithms: Vec<&'a str>,
        input_sizes: Vec<&'a str>,
    },
    Graph {
        input_size: &'a str,
        #[serde(flatten)]
        update: &'a GraphUpdate,
    },
    Anova {
        title: &'a str,
        #[serde(flatten)]
        update: &'a AnovaUpdate,
    },
}

fn write_json_line(out: &mut dyn Write, record: &JsonRecord<'_>) -> io::Result<()> {
    let line = serde_json::to_string(record).map_err(io::Error::other)?;
    writeln!(out, "{line}")
}

impl ReportPresenter for JsonReportPresenter {
    fn present_dataset(&self, out: &mut dyn Write, dataset: &Dataset) -> io::Result<()> {
        write_json_line(
            out,
            &JsonRecord::Dataset {
                records: dataset.len(),
                columns: dataset.columns(),
                algorithms: dataset.algorithms(),
                input_sizes: dataset.input_sizes(),
            },
        )
    }

    fn present_graph(
        &self,
        out: &mut dyn Write,
        input_size: &str,
        update: &GraphUpdate,
    ) -> io::Result<()> {
        write_json_line(out, &JsonRecord::Graph { input_size, update })
    }

    fn present_anova(
        &self,
        out: &mut dyn Write,
        title: &str,
        update: &AnovaUpdate,
    ) -> io::Result<()> {
        write_json_line(out, &JsonRecord::Anova { title, update })
    }
}
