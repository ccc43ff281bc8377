//! Log output setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the fmt subscriber with `RUST_LOG`-style filtering.
///
/// Falls back to `info` when no filter is set, which keeps the per-recipient
/// progress lines visible without drowning the terminal in trace output.
pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
