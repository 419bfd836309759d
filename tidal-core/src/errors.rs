//! Error types for tidal prediction.
//!
//! This module provides a unified error type [`TideError`] covering the failure
//! modes of the prediction core: unresolvable constituent names, incomplete major
//! constituent sets, ambiguous or malformed Doodson numbers, mismatched nodal
//! correction conventions, and inconsistent array shapes.
//!
//! # Error Categories
//!
//! | Variant | Use Case | Recoverable? |
//! |---------|----------|--------------|
//! | [`UnknownConstituent`](TideError::UnknownConstituent) | Name not in the catalog or alias table | No |
//! | [`InsufficientMajorConstituents`](TideError::InsufficientMajorConstituents) | Minor inference without the required majors | No |
//! | [`AmbiguousDoodsonNumber`](TideError::AmbiguousDoodsonNumber) | Inverse lookup hits several constituents | Yes |
//! | [`InvalidDoodsonNumber`](TideError::InvalidDoodsonNumber) | Malformed or unencodable Doodson number | No |
//! | [`InvalidNodalConvention`](TideError::InvalidNodalConvention) | Unknown or mismatched corrections convention | No |
//! | [`DimensionMismatch`](TideError::DimensionMismatch) | Array lengths disagree | No |
//! | [`InvalidInput`](TideError::InvalidInput) | Out-of-range arguments, bad calendar dates | No |
//!
//! Masked harmonic constants are *not* errors. They flow through prediction and
//! come back as invalid entries in a [`MaskedArray`](crate::MaskedArray).
//!
//! # Usage
//!
//! Most functions return [`TideResult<T>`], which is `Result<T, TideError>`.
//! Use the constructor methods for consistent error creation:
//!
//! ```
//! use tidal_core::TideError;
//!
//! fn check_lengths(names: &[&str], constants: &[f64]) -> Result<(), TideError> {
//!     if names.len() != constants.len() {
//!         return Err(TideError::dimension_mismatch(
//!             "harmonic constants",
//!             names.len(),
//!             constants.len(),
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for tidal prediction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TideError {
    /// Name failed to resolve through canonicalization and the alias table.
    #[error("Unknown tidal constituent: {name}")]
    UnknownConstituent { name: String },

    /// Minor constituent inference was requested without the core majors.
    #[error("Insufficient major constituents for minor inference: missing {}", missing.join(", "))]
    InsufficientMajorConstituents { missing: Vec<String> },

    /// Inverse Doodson lookup matched more than one constituent.
    ///
    /// Recoverable: retry with one of the listed candidates as a hint.
    #[error("Ambiguous Doodson number {number}: candidates {}", candidates.join(", "))]
    AmbiguousDoodsonNumber {
        number: String,
        candidates: Vec<String>,
    },

    /// Doodson number could not be parsed or encoded.
    #[error("Invalid Doodson number {input}: {message}")]
    InvalidDoodsonNumber { input: String, message: String },

    /// Corrections convention is unknown, unsupported for a constituent, or
    /// inconsistent between inputs.
    #[error("Invalid nodal correction convention {convention}: {message}")]
    InvalidNodalConvention { convention: String, message: String },

    /// Array lengths disagree along a point, time or constituent axis.
    #[error("Dimension mismatch in {context}: expected {expected}, found {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Argument outside its valid domain.
    #[error("Invalid input in {context}: {message}")]
    InvalidInput { context: String, message: String },
}

/// Convenience alias for `Result<T, TideError>`.
pub type TideResult<T> = Result<T, TideError>;

impl TideError {
    /// Creates an [`UnknownConstituent`](Self::UnknownConstituent) error.
    pub fn unknown_constituent(name: &str) -> Self {
        Self::UnknownConstituent {
            name: name.to_string(),
        }
    }

    /// Creates an [`InsufficientMajorConstituents`](Self::InsufficientMajorConstituents) error.
    pub fn insufficient_majors<S: AsRef<str>>(missing: &[S]) -> Self {
        Self::InsufficientMajorConstituents {
            missing: missing.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Creates an [`AmbiguousDoodsonNumber`](Self::AmbiguousDoodsonNumber) error.
    pub fn ambiguous_doodson<S: AsRef<str>>(number: &str, candidates: &[S]) -> Self {
        Self::AmbiguousDoodsonNumber {
            number: number.to_string(),
            candidates: candidates.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Creates an [`InvalidDoodsonNumber`](Self::InvalidDoodsonNumber) error.
    pub fn invalid_doodson(input: &str, reason: &str) -> Self {
        Self::InvalidDoodsonNumber {
            input: input.to_string(),
            message: reason.to_string(),
        }
    }

    /// Creates an [`InvalidNodalConvention`](Self::InvalidNodalConvention) error.
    pub fn invalid_convention(convention: &str, reason: &str) -> Self {
        Self::InvalidNodalConvention {
            convention: convention.to_string(),
            message: reason.to_string(),
        }
    }

    /// Creates a [`DimensionMismatch`](Self::DimensionMismatch) error.
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context: context.to_string(),
            expected,
            actual,
        }
    }

    /// Creates an [`InvalidInput`](Self::InvalidInput) error.
    pub fn invalid_input(context: &str, reason: &str) -> Self {
        Self::InvalidInput {
            context: context.to_string(),
            message: reason.to_string(),
        }
    }

    /// Returns `true` if the caller can retry with more information.
    ///
    /// Only [`AmbiguousDoodsonNumber`](Self::AmbiguousDoodsonNumber) qualifies:
    /// supplying one of the candidates as a hint resolves it.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::AmbiguousDoodsonNumber { .. } => true,
            Self::UnknownConstituent { .. } => false,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_constituent_error() {
        let err = TideError::unknown_constituent("zz9");
        assert_eq!(err.to_string(), "Unknown tidal constituent: zz9");
    }

    #[test]
    fn test_insufficient_majors_lists_missing() {
        let err = TideError::insufficient_majors(&["k2", "p1"]);
        assert!(err.to_string().contains("missing k2, p1"));
    }

    #[test]
    fn test_ambiguous_doodson_error() {
        let err = TideError::ambiguous_doodson("227.655", &["eps2", "mns2"]);
        assert!(err.to_string().contains("227.655"));
        assert!(err.to_string().contains("eps2, mns2"));
    }

    #[test]
    fn test_invalid_convention_error() {
        let err = TideError::invalid_convention("TPXO", "unrecognized convention");
        assert!(err
            .to_string()
            .contains("Invalid nodal correction convention TPXO"));
    }

    #[test]
    fn test_dimension_mismatch_error() {
        let err = TideError::dimension_mismatch("constituent names", 8, 7);
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in constituent names: expected 8, found 7"
        );
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(TideError::ambiguous_doodson("085.455", &["mt", "mtm"]).is_recoverable());
        assert!(!TideError::unknown_constituent("x").is_recoverable());
        assert!(!TideError::invalid_doodson("1", "too short").is_recoverable());
        assert!(!TideError::invalid_input("latitude", "above 90").is_recoverable());
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<TideError>();
        _assert_sync::<TideError>();
    }
}
