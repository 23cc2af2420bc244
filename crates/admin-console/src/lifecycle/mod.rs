//! # System Lifecycle & Orchestration
//!
//! This module builds the console's runtime graph from a [`ConsoleConfig`](crate::config::ConsoleConfig)
//! and tears it down again.
//!
//! ## The ConsoleSystem Pattern
//!
//! Every client shares one transport, and the transport shares one
//! [`Session`](console_framework::Session) with the auth service:
//!
//! ```text
//!              Session (bearer token)
//!               /              \
//!     HttpTransport        ApiAuthService -> AuthController
//!          |
//!   Role / User / Permission / ActivityLog / AiModel / PromptTemplate clients
//! ```
//!
//! A successful login stores the token, so every later list read is
//! authenticated without the clients knowing about auth. A 401 clears it.
//!
//! ## Shutdown
//!
//! Nothing runs in the background, so [`ConsoleSystem::shutdown`] only needs
//! to cancel in-flight requests: each pending hook resolves to
//! `ApiError::Cancelled` and returns to `Idle`.
//!
//! ## Testing
//!
//! [`ConsoleSystem::with_transport`] accepts any
//! [`ApiTransport`](console_framework::ApiTransport), so the whole graph can
//! run against a [`MockTransport`](console_framework::mock::MockTransport).

pub mod console_system;

pub use console_system::*;
