//! Error types for the decayed-drift library.

use crate::core::DemographicKey;
use thiserror::Error;

/// Result type alias for drift fitting and forecasting operations.
pub type Result<T> = std::result::Result<T, DriftError>;

/// Errors that can occur while fitting or forecasting drift.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriftError {
    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A series value is NaN or infinite.
    #[error("non-finite value {value} at index {index}")]
    NonFiniteValue { index: usize, value: f64 },

    /// A single demographic series failed to fit.
    #[error("invalid series for {key}: {source}")]
    InvalidSeries {
        key: DemographicKey,
        #[source]
        source: Box<DriftError>,
    },

    /// A required dimension is absent from the array.
    #[error("missing dimension '{0}'")]
    MissingDimension(String),

    /// The array carries a dimension the operation cannot iterate.
    #[error("unexpected dimension '{0}'")]
    UnexpectedDimension(String),

    /// The same dimension name appears twice.
    #[error("duplicate dimension '{0}'")]
    DuplicateDimension(String),

    /// The same coordinate label appears twice within one dimension.
    #[error("duplicate label {label} in dimension '{dim}'")]
    DuplicateLabel { dim: String, label: i64 },

    /// Value count does not match the array shape.
    #[error("shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// A selection names a label the dimension does not carry.
    #[error("unknown label {label} in dimension '{dim}'")]
    UnknownLabel { dim: String, label: i64 },

    /// A selection does not pin every required dimension.
    #[error("incomplete selection: {0}")]
    IncompleteSelection(String),

    /// Year range is empty, unordered, overlapping or has gaps.
    #[error("invalid year range: {0}")]
    InvalidYearRange(String),

    /// The array's years do not line up with the past years.
    #[error("year mismatch: expected {expected:?}, got {got:?}")]
    YearMismatch { expected: Vec<i64>, got: Vec<i64> },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,
}

impl DriftError {
    /// Attach the demographic combination a series error came from.
    pub(crate) fn for_key(self, key: DemographicKey) -> Self {
        DriftError::InvalidSeries {
            key,
            source: Box::new(self),
        }
    }
}
