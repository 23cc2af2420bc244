//! # Framework Errors
//!
//! This module defines the error taxonomy shared by every hook, controller and
//! transport. By centralizing error definitions, views and domain clients see
//! the same failure categories no matter which endpoint produced them.

/// Message shown when the server rejects a request without explaining why.
pub const GENERIC_REJECTION: &str = "The server could not process the request.";

/// Message shown for transport-level failures.
pub const GENERIC_NETWORK: &str = "Unable to reach the server. Please try again.";

/// Errors that can occur while talking to the admin API.
///
/// The type is `Clone` because a copy is stored in [`AsyncState::Error`](crate::AsyncState::Error)
/// while the original is returned to the caller.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ApiError {
    /// The HTTP call itself failed (timeout, connection reset, DNS).
    #[error("Network failure: {0}")]
    Network(String),

    /// The server answered but refused the request (non-2xx or `success: false`).
    #[error("Server rejected request: {message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },

    /// The response did not match any recognized envelope.
    #[error("Unexpected response shape: {0}")]
    ShapeMismatch(String),

    /// A write returned without a truthy success indicator.
    #[error("Mutation failed: {0}")]
    MutationFailed(String),

    /// The execution was aborted through `cancel()`.
    #[error("Request cancelled")]
    Cancelled,

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Builds a [`ApiError::Rejected`], falling back to a generic message when
    /// the server did not provide one.
    pub fn rejected(status: Option<u16>, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_REJECTION.to_string());
        ApiError::Rejected { status, message }
    }

    /// The HTTP status attached to a rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => *status,
            _ => None,
        }
    }

    /// Text suitable for display next to the failed action.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => GENERIC_NETWORK.to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::ShapeMismatch(_) => "The server returned an unexpected response.".to_string(),
            ApiError::MutationFailed(message) => message.clone(),
            ApiError::Cancelled => "The request was cancelled.".to_string(),
            ApiError::InvalidRequest(message) => message.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ApiError::InvalidRequest(e.to_string())
        } else if e.is_decode() {
            ApiError::ShapeMismatch(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::rejected(Some(status.as_u16()), None)
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::ShapeMismatch(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_without_message_uses_fallback() {
        let err = ApiError::rejected(Some(500), None);
        assert_eq!(err.user_message(), GENERIC_REJECTION);
        assert_eq!(err.status(), Some(500));

        let blank = ApiError::rejected(None, Some("   ".into()));
        assert_eq!(blank.user_message(), GENERIC_REJECTION);
    }

    #[test]
    fn rejection_keeps_server_message() {
        let err = ApiError::rejected(Some(422), Some("Role name taken".into()));
        assert_eq!(err.user_message(), "Role name taken");
    }

    #[test]
    fn network_failures_hide_details() {
        let err = ApiError::Network("connection reset by peer".into());
        assert_eq!(err.user_message(), GENERIC_NETWORK);
        assert!(err.to_string().contains("connection reset"));
    }
}
