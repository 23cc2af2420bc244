//! # Admin Console
//!
//! A command-line walk through the console's client layer.
//!
//! The binary loads a [`ConsoleConfig`], builds a [`ConsoleSystem`], signs in
//! when credentials are present in the environment, then lists roles and
//! permission categories.
//!
//! ## Quick Start
//!
//! ```bash
//! CONSOLE_API_URL=http://localhost:8000/api \
//! CONSOLE_EMAIL=admin@example.com CONSOLE_PASSWORD=secret \
//! RUST_LOG=info cargo run -p admin-console -- console.toml
//! ```
//!
//! The optional argument is a TOML configuration file.

use admin_console::auth::Credentials;
use admin_console::config::ConsoleConfig;
use admin_console::lifecycle::ConsoleSystem;
use console_framework::tracing::setup_tracing;
use console_framework::ConsoleClient;
use std::path::PathBuf;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ConsoleConfig::load(config_path.as_deref()).map_err(|e| e.to_string())?;

    info!(base_url = %config.api_base_url, "Starting admin console");
    let system = ConsoleSystem::new(config).map_err(|e| e.to_string())?;

    if let (Ok(email), Ok(password)) = (
        std::env::var("CONSOLE_EMAIL"),
        std::env::var("CONSOLE_PASSWORD"),
    ) {
        let span = tracing::info_span!("login");
        let login = async { system.auth.login(Credentials::new(email, password)).await }
            .instrument(span)
            .await;
        match login {
            Ok(user) => info!(user = %user.name, "Signed in"),
            Err(e) => warn!(error = %e, "Login failed, continuing anonymously"),
        }
    }

    let span = tracing::info_span!("roles");
    let roles = async { system.roles.refresh().await }.instrument(span).await;
    match roles {
        Ok(list) => {
            info!(count = list.len(), total = list.total, "Roles loaded");
            for role in &list.items {
                info!(id = role.id, name = %role.name, permissions = role.permissions.len(), "Role");
            }
        }
        Err(e) => error!(error = %e, "Could not load roles"),
    }

    let span = tracing::info_span!("permissions");
    let categories = async { system.permissions.load_categories().await }
        .instrument(span)
        .await;
    match categories {
        Ok(categories) => {
            for category in &categories {
                info!(category = %category.name, permissions = category.permissions.len(), "Permission category");
            }
        }
        Err(e) => error!(error = %e, "Could not load permissions"),
    }

    if system.auth.is_authenticated() {
        if let Err(e) = system.auth.logout().await {
            warn!(error = %e, "Logout failed");
        }
    }

    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Admin console finished");
    Ok(())
}
