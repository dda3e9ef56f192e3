//! Tracing setup for binaries and long-running tasks

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset. Outbound HTTP chatter stays at
/// warn so per-ticker progress is readable.
const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn";

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides the default filter. Call once at startup.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
