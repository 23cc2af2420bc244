//! # Authentication
//!
//! The console does not implement an auth protocol. It talks to the backend
//! through the [`AuthService`] trait and keeps the bearer token in a shared
//! [`Session`](console_framework::Session), which the HTTP transport reads
//! on every request.
//!
//! - [`ApiAuthService`] implements the trait over `/auth/login`,
//!   `/auth/logout` and `/auth/me`.
//! - [`AuthController`] exposes the current user as an observable state.

pub mod controller;
pub mod service;

pub use controller::*;
pub use service::*;
