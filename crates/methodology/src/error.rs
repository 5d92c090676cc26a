//! Error types for candidate methodologies.

use data_loader::DataLoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MethodologyError {
    /// A rating table lookup failed (e.g. a user missing from the test set)
    #[error(transparent)]
    Lookup(#[from] DataLoadError),

    /// Threshold filtering was requested with no threshold configured
    #[error("Threshold filtering requested but no threshold is set")]
    MissingThreshold,

    /// Thresholds must be finite; NaN would silently reject every score
    #[error("Invalid threshold {0}: must be a finite number")]
    InvalidThreshold(f32),

    #[error("{methodology} does not support threshold filtering")]
    ThresholdNotSupported { methodology: String },

    #[error("{methodology} requires an item universe")]
    MissingUniverse { methodology: String },

    #[error("Unknown methodology: {0}")]
    UnknownMethodology(String),
}

pub type Result<T> = std::result::Result<T, MethodologyError>;
