//! Constants for datasets, the dashboard, and hypothesis tests.

/// Significance level of every ANOVA test (critical value at the 0.95 quantile).
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Rows per page of the data table.
pub const TABLE_PAGE_SIZE: usize = 10;

/// Input size selected when the dashboard opens.
pub const DEFAULT_INPUT_SIZE: &str = "Small";

/// Dataset file read when no path is configured.
pub const DEFAULT_DATA_FILE: &str = "energy_consumption.csv";

/// Column holding the sorting algorithm label.
pub const ALGORITHM_COLUMN: &str = "Algorithm";

/// Column holding the input size category.
pub const INPUT_SIZE_COLUMN: &str = "Input_Size";

/// Column holding the measured energy.
pub const ENERGY_COLUMN: &str = "Energy_Consumption";

/// Number of text fields in the freeform calculator.
pub const MAX_FREEFORM_GROUPS: usize = 3;

/// Rows sampled when inferring the CSV schema.
pub const SCHEMA_INFERENCE_ROWS: usize = 1000;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration or unreadable dataset.
    pub const ERROR_CONFIG: i32 = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn significance_level_in_range() {
        assert!(SIGNIFICANCE_LEVEL > 0.0 && SIGNIFICANCE_LEVEL < 1.0);
    }

    #[test]
    fn exit_codes_distinct() {
        assert_ne!(exit_codes::SUCCESS, exit_codes::ERROR_GENERIC);
        assert_ne!(exit_codes::ERROR_GENERIC, exit_codes::ERROR_CONFIG);
    }
}
