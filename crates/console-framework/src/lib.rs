//! # Console Framework
//!
//! This crate provides the building blocks of the admin console client: a
//! small, generic implementation of the **fetch-state-render** lifecycle that
//! every screen of the console repeats.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **State Layer** ([`AsyncState`], [`ResourceHook`]) - binds one async
//!    operation to an observable `Idle | Loading | Success | Error` state
//! 2. **Collection Layer** ([`ListController`]) - a paginated, filterable
//!    collection plus CRUD, reloaded wholesale after every write
//! 3. **Transport Layer** ([`ApiTransport`], [`envelope`]) - the backend as an
//!    HTTP/JSON collaborator, with one place that understands its envelopes
//!
//! A caller triggers a controller action, the controller runs it through a
//! hook, the hook calls the transport, and on settle the hook publishes its new
//! state to every [`watch`](tokio::sync::watch) subscriber.
//!
//! ## Core Abstractions
//!
//! ### [`AdminResource`] - The Collection Contract
//!
//! ```rust
//! use console_framework::mock::MockTransport;
//! use console_framework::{AdminResource, ListController, QueryParams, QueryPatch};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Clone, Deserialize)]
//! struct Role { id: u64, name: String }
//! #[derive(Debug, Serialize)] struct RoleCreate { name: String }
//!
//! impl AdminResource for Role {
//!     type Id = u64;
//!     type Create = RoleCreate;
//!     type Update = RoleCreate;
//!     const COLLECTION: &'static str = "/roles";
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = Arc::new(MockTransport::new());
//!     mock.expect_get("/roles").return_json(json!({
//!         "data": [{ "id": 1, "name": "admin" }],
//!         "meta": { "total": 1, "current_page": 1, "per_page": 10 }
//!     }));
//!
//!     let roles = ListController::<Role>::new(mock.clone(), QueryParams::default());
//!     let list = roles.update_query_params(QueryPatch::new().search("adm")).await.unwrap();
//!     assert_eq!(list.items[0].name, "admin");
//!     mock.verify();
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Every hook takes a ticket per execution; only the latest ticket's
//!   settlement reaches state
//! - Cancellation is real: `cancel()` aborts in-flight executions
//! - Nothing is shared between hooks; the transport holds no cache
//!
//! ## Testing
//!
//! The [`mock`] module provides a scripted [`MockTransport`](mock::MockTransport)
//! and a [`channel_transport`](mock::channel_transport) for tests that need to
//! control when each request settles.

pub mod client_trait;
pub mod envelope;
pub mod error;
pub mod hook;
pub mod list;
pub mod mock;
pub mod query;
pub mod resource;
pub mod session;
pub mod state;
pub mod tracing;
pub mod transport;

// Re-export core types for convenience
pub use client_trait::ConsoleClient;
pub use envelope::{normalize_item, normalize_list, MutationReceipt, Page, PageMeta};
pub use error::ApiError;
pub use hook::{HookOptions, ResourceHook};
pub use list::{ListController, ListResource, MutationKind};
pub use query::{QueryParams, QueryPatch, DEFAULT_PER_PAGE};
pub use resource::{AdminResource, ReadOnly};
pub use session::Session;
pub use state::{AsyncState, Status};
pub use transport::{ApiRequest, ApiTransport, HttpTransport, Method};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
