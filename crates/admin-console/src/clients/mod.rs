//! Type-safe clients, one per console collection.
//!
//! Each wraps a [`ListController`](console_framework::ListController) and
//! implements [`ConsoleClient`](console_framework::ConsoleClient), so
//! `refresh`, `search`, `go_to_page` and `remove` come for free.

pub mod activity_log_client;
pub mod ai_model_client;
pub mod permission_client;
pub mod prompt_template_client;
pub mod role_client;
pub mod user_client;

pub use activity_log_client::*;
pub use ai_model_client::*;
pub use permission_client::*;
pub use prompt_template_client::*;
pub use role_client::*;
pub use user_client::*;

use crate::error::ConsoleError;

/// Fails with [`ConsoleError::Validation`] when `value` is blank.
pub(crate) fn require(value: &str, field: &str) -> Result<(), ConsoleError> {
    if value.trim().is_empty() {
        return Err(ConsoleError::Validation(format!("{field} is required")));
    }
    Ok(())
}
