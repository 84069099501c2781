//! Crate-level error type.

use crate::validation::ValidationError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the tile GA.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {}", join_messages(.0))]
    InvalidConfig(Vec<ValidationError>),
    #[error("Unknown {kind} operator: {value}")]
    UnknownOperator { kind: &'static str, value: String },
    #[error("Invalid engine state: expected {expected}, found {actual}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("Parent pool needs at least 2 candidates, got {provided}")]
    InsufficientParents { provided: usize },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
