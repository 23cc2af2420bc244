/// Initializes the tracing/logging infrastructure for the application.
///
/// This sets up structured logging using the `tracing` crate with:
/// - **Environment-based filtering**: Controlled via `RUST_LOG`
/// - **Compact formatting**: Spans shown inline, module paths hidden
///
/// Hooks log under their own name (`Role.list`, `AiModel.create`), so targets
/// add nothing.
///
/// # Environment Variables
///
/// - `RUST_LOG=info` - Completed mutations and degraded reads
/// - `RUST_LOG=debug` - Request payloads, tickets, stale settlements
/// - `RUST_LOG=console_framework=debug` - Debug only for the framework
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Console started");
/// ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
