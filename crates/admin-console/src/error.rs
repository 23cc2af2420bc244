//! Error types for the console's domain clients.

use console_framework::ApiError;
use thiserror::Error;

/// Errors that can occur during console operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConsoleError {
    /// The request reached the API layer and failed there.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The payload was refused before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The configuration file or environment holds an invalid value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ConsoleError {
    /// The text a view would show for this error.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Api(e) => e.user_message(),
            ConsoleError::Validation(msg) | ConsoleError::Config(msg) => msg.clone(),
        }
    }
}
