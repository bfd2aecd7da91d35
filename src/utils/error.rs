// src/utils/error.rs
use thiserror::Error;

// Extraction itself has no error type: a missing or malformed section leaves
// its record field at the default value. Only I/O and interchange parsing can
// fail hard, and neither produces partial output.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Invalid customization record: {0}")]
    Interchange(#[from] serde_json::Error),
}
