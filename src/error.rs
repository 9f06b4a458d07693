use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthEngineError {
    #[error("Invalid smoothing factor {0}: must be strictly between 0.0 and 1.0")]
    InvalidSmoothingFactor(f64),

    #[error("Invalid analysis window {0}: must be a positive number of days")]
    InvalidAnalysisWindow(i64),

    #[error("Invalid cycle bounds: min {min} / default {default} / max {max} must satisfy 1 <= min <= default <= max")]
    InvalidCycleBounds { min: i64, default: i64, max: i64 },

    #[error("Invalid degrees of freedom {0}: must be greater than 1.0")]
    InvalidDegreesOfFreedom(f64),

    #[error("Invalid hybrid baseline ratio {0}: must be between 0.0 and 1.0")]
    InvalidBaselineRatio(f64),

    #[error("Invalid trend sensitivity {0}: must be non-negative")]
    InvalidTrendSensitivity(f64),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HealthEngineError>;
