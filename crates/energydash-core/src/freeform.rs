//! Parsing of comma-separated freeform group input.

/// Error type for freeform input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// An item is not a finite number.
    #[error("invalid numeric value: {0:?}")]
    InvalidNumber(String),
}

/// Parse one comma-separated field into values.
///
/// Items are trimmed and blank items skipped, so `"1, 2,,3 "` yields three
/// values. A missing field is an empty group.
pub fn parse_group(text: Option<&str>) -> Result<Vec<f64>, ParseError> {
    let Some(text) = text else {
        return Ok(Vec::new());
    };

    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match item.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ParseError::InvalidNumber(item.to_string())),
        })
        .collect()
}

/// Parse every field, failing on the first invalid item.
pub fn parse_groups(fields: &[Option<&str>]) -> Result<Vec<Vec<f64>>, ParseError> {
    fields.iter().map(|field| parse_group(*field)).collect()
}
