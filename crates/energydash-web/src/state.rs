//! Shared server state.

use std::sync::Arc;

use energydash_core::dataset::Dataset;

/// State shared by all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    /// Input size used when a request names none.
    pub default_input_size: String,
}

impl AppState {
    /// Build the state, resolving `preferred` against the sizes in the data.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, preferred: &str) -> Self {
        let default_input_size = dataset
            .default_input_size(preferred)
            .unwrap_or(preferred)
            .to_string();
        Self {
            dataset,
            default_input_size,
        }
    }

    /// `requested` if given and non-empty, else the default size.
    #[must_use]
    pub fn input_size<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.default_input_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use energydash_core::dataset::EnergyRecord;

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::from_records(vec![
            EnergyRecord::new("A", "Medium", 1.0),
            EnergyRecord::new("A", "Large", 2.0),
        ]))
    }

    #[test]
    fn default_falls_back_to_first_size() {
        let state = AppState::new(dataset(), "Small");
        assert_eq!(state.default_input_size, "Medium");
    }

    #[test]
    fn preferred_size_kept_when_present() {
        let state = AppState::new(dataset(), "Large");
        assert_eq!(state.default_input_size, "Large");
    }

    #[test]
    fn requested_size_overrides_default() {
        let state = AppState::new(dataset(), "Large");
        assert_eq!(state.input_size(Some("Medium")), "Medium");
        assert_eq!(state.input_size(Some("")), "Large");
        assert_eq!(state.input_size(None), "Large");
    }
}
