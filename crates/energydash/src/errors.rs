//! Error handling and exit codes.

use energydash_core::constants::exit_codes;
use energydash_core::dataset::DatasetError;

/// Configuration errors detected by the application itself.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Host and port do not form a socket address.
    #[error("invalid listen address: {0}")]
    InvalidAddress(String),

    /// The requested input size has no measurements.
    #[error("input size '{0}' not found in dataset")]
    UnknownInputSize(String),

    /// More `--group` arguments than the calculator has fields.
    #[error("at most {max} groups are supported, got {given}")]
    TooManyGroups { max: usize, given: usize },
}

/// Map an error to the process exit code.
///
/// Dataset and configuration problems anywhere in the chain exit with
/// `ERROR_CONFIG`; everything else is `ERROR_GENERIC`.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    let is_config = err
        .chain()
        .any(|cause| cause.is::<DatasetError>() || cause.is::<AppError>());
    if is_config {
        exit_codes::ERROR_CONFIG
    } else {
        exit_codes::ERROR_GENERIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn dataset_errors_are_config_errors() {
        let err = Err::<(), _>(DatasetError::MissingColumn("Algorithm".into()))
            .context("failed to load dataset")
            .unwrap_err();
        assert_eq!(exit_code(&err), 4);
    }

    #[test]
    fn app_errors_are_config_errors() {
        let err = anyhow::Error::new(AppError::UnknownInputSize("Huge".into()));
        assert_eq!(exit_code(&err), 4);
    }

    #[test]
    fn other_errors_are_generic() {
        let err = anyhow::anyhow!("Please enter valid numeric values.");
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn messages() {
        let err = AppError::TooManyGroups { max: 3, given: 4 };
        assert_eq!(err.to_string(), "at most 3 groups are supported, got 4");
    }
}
