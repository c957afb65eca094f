//! # energydash-core
//!
//! Core library for the sorting-algorithm energy dashboard: the measurement
//! dataset, one-way ANOVA with F-distribution critical values and p-values,
//! freeform input parsing, and the three dashboard update handlers.

pub mod anova;
pub mod constants;
pub mod dataset;
pub mod fdist;
pub mod freeform;
pub mod handlers;

// Re-exports
pub use anova::{one_way, AnovaError, AnovaRow, AnovaSummary, AnovaTable, Decision, Significance, Source};
pub use constants::{exit_codes, DEFAULT_INPUT_SIZE, SIGNIFICANCE_LEVEL, TABLE_PAGE_SIZE};
pub use dataset::{Dataset, DatasetError, EnergyRecord, Group, TablePage};
pub use fdist::{DistributionError, FDistribution};
pub use freeform::ParseError;
pub use handlers::{
    calculate_anova, calculate_generalized_anova, update_graph, AnovaUpdate, Bar, BarChart,
    GraphUpdate,
};
