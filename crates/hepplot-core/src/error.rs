//! Error types for histogram preparation
//!
//! Provides a unified error type for all hepplot crates.

use thiserror::Error;

/// Core error type for histogram construction and manipulation
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input data (mismatched array lengths, bad values)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Bin edges that cannot define a histogram axis
    #[error("Invalid binning: {0}")]
    InvalidBinning(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} entries, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Re-binning requested on a histogram that cannot support it
    #[error("Re-binning not supported: {0}")]
    RebinUnsupported(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(context: &str) -> Self {
        Self::InvalidInput(format!("{context} is empty"))
    }

    /// Create an error for size mismatch between parallel arrays
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for edges that are not strictly increasing
    pub fn edges_not_increasing(context: &str) -> Self {
        Self::InvalidBinning(format!("{context}: edges must be strictly increasing"))
    }

    /// Create an error for an edge sequence too short to define any bin
    pub fn too_few_edges(actual: usize, context: &str) -> Self {
        Self::InvalidBinning(format!(
            "{context}: need at least 2 edges to define a bin, got {actual}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("weights length differs from data".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid input: weights length differs from data"
        );

        let err = Error::InvalidBinning("edges [1, 1] are degenerate".to_string());
        assert_eq!(err.to_string(), "Invalid binning: edges [1, 1] are degenerate");

        let err = Error::InsufficientData {
            expected: 1,
            actual: 0,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 1 entries, got 0"
        );

        let err = Error::RebinUnsupported("efficiency histogram".to_string());
        assert_eq!(
            err.to_string(),
            "Re-binning not supported: efficiency histogram"
        );

        let err = Error::Computation("quadrature sum overflowed".to_string());
        assert_eq!(err.to_string(), "Computation error: quadrature sum overflowed");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::empty_input("sample");
        assert_eq!(err.to_string(), "Invalid input: sample is empty");

        let err = Error::size_mismatch(100, 50, "weight array");
        assert_eq!(
            err.to_string(),
            "Invalid input: Size mismatch in weight array: expected 100, got 50"
        );

        let err = Error::edges_not_increasing("x axis");
        assert_eq!(
            err.to_string(),
            "Invalid binning: x axis: edges must be strictly increasing"
        );

        let err = Error::too_few_edges(1, "y axis");
        assert_eq!(
            err.to_string(),
            "Invalid binning: y axis: need at least 2 edges to define a bin, got 1"
        );
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => assert!(err.to_string().contains("custom error message")),
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn test_function(succeed: bool) -> Result<i32> {
            if succeed {
                Ok(42)
            } else {
                Err(Error::Computation("test failure".to_string()))
            }
        }

        assert_eq!(test_function(true).unwrap(), 42);
        assert!(test_function(false).is_err());
    }
}
