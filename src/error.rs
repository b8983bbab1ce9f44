use thiserror::Error;

#[derive(Error, Debug)]
pub enum MotionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Insufficient data: need {needed} landmarks, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Missing keypoint: {0}")]
    MissingKeypoint(String),

    #[error("Unknown processing method: {0}")]
    UnknownMethod(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sample source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, MotionError>;
