//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Image acquisition errors
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Resize error: {0}")]
    Resize(String),
}

/// Model loading and inference errors
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to load model: {0}")]
    Load(String),

    #[error("Expected {expected} features, got {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("Invalid model: {0}")]
    Invalid(String),
}

/// Classification errors
#[derive(Error, Debug)]
pub enum ClassificationError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Inference worker failed: {0}")]
    Worker(String),
}

/// Errors that end a trigger sequence early
#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("acquisition failed: {0}")]
    Acquisition(#[from] AcquisitionError),

    #[error("classification failed: {0}")]
    Classification(#[from] ClassificationError),

    #[error("delivery failed: {0}")]
    Delivery(BotError),
}

impl SequenceError {
    pub fn kind(&self) -> &'static str {
        match self {
            SequenceError::Acquisition(_) => "acquisition",
            SequenceError::Classification(_) => "classification",
            SequenceError::Delivery(_) => "delivery",
        }
    }
}

/// Inference endpoint errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    #[error("InvalidParameterException: {0}")]
    InvalidParameter(String),

    #[error("ModelException: {0}")]
    Model(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
