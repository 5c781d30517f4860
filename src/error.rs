//! Error types for bandstack operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while aggregating, scaling, or laying out a chart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No rows survived filtering; aggregation cannot proceed.
    #[error("empty dataset: no rows{}", .filter_year.as_ref().map_or_else(String::new, |y| format!(" for year {y}")))]
    EmptyDataset {
        /// Year filter in effect when the dataset came up empty, if any.
        filter_year: Option<String>,
    },

    /// The dataset holds no years to select a default from.
    #[error("no default year: dataset contains no year values")]
    NoDefaultYear,

    /// A category value outside its known domain reached a scale.
    #[error("unrecognized {kind} category: {value:?}")]
    UnrecognizedCategory {
        /// Which categorical field the value came from ("sex", "level", "age").
        kind: &'static str,
        /// The offending raw value.
        value: String,
    },

    /// Scale domain error (e.g., empty band domain, degenerate linear domain).
    #[error("scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

impl Error {
    /// Shorthand for an unrecognized-category error.
    #[must_use]
    pub fn unrecognized(kind: &'static str, value: &str) -> Self {
        Error::UnrecognizedCategory { kind, value: value.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset_display() {
        let err = Error::EmptyDataset { filter_year: Some("1996".to_string()) };
        assert!(err.to_string().contains("1996"));

        let err = Error::EmptyDataset { filter_year: None };
        assert!(err.to_string().contains("empty dataset"));
    }

    #[test]
    fn test_unrecognized_category_display() {
        let err = Error::unrecognized("sex", "X");
        assert!(err.to_string().contains("sex"));
        assert!(err.to_string().contains('X'));
    }

    #[test]
    fn test_no_default_year_display() {
        assert!(Error::NoDefaultYear.to_string().contains("default year"));
    }
}
