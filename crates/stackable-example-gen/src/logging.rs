use tracing::Level;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes `tracing` logging with options from the environment variable given in the `env`
/// parameter.
///
/// Callers are encouraged to pass the application name plus `_LOG`, e.g. `EXAMPLE_GEN_LOG`.
/// If the variable is not set (or invalid), the maximum log level is set to WARN.
///
/// Logs are written to stderr, as stdout carries the generated example.
pub fn initialize_logging(env: &str, app_name: &str) {
    let filter = EnvFilter::try_from_env(env)
        .unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()));

    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if Registry::default().with(filter).with(fmt).try_init().is_err() {
        tracing::debug!(app_name, "global subscriber is already set, keeping it");
        return;
    }

    tracing::debug!(app_name, env, "logging initialized");
}
