use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `warn`.
///
/// - `RUST_LOG=debug` - everything the table model reports
/// - `RUST_LOG=csv_tabs::import=warn` - only skipped import lines
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .init();
}
