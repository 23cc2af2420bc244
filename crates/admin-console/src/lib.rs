//! # Admin Console Library
//!
//! This library exposes the console's resources, clients and wiring for the
//! binary and for integration testing.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod permissions;

pub use error::ConsoleError;
