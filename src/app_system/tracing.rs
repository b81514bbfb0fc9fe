use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the level follows `enable_logging`:
/// `debug` when on, `warn` when off.
///
/// ```bash
/// RUST_LOG=user_directory::user_actor=debug,info cargo run
/// ```
pub fn setup_tracing(config: &AppConfig) {
    let default_level = if config.enable_logging { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
