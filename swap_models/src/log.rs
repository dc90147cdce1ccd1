use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt as _};

/// Installs the global subscriber. Safe to call more than once: later calls are ignored.
pub fn init_tracing(prod_format: bool) {
    if prod_format {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().json().flatten_event(true).with_ansi(false))
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().json().pretty().with_ansi(true))
            .try_init()
            .ok();
    }
}
