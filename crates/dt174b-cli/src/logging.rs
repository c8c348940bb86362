use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter directive for the given verbosity, falling back to the config file.
pub fn filter_directive(verbosity: u8, config: &LoggingConfig) -> String {
    match (verbosity, &config.filter) {
        (0, Some(filter)) => filter.clone(),
        (0, None) => "warn".to_string(),
        (1, _) => "info".to_string(),
        (2, _) => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence.
///
/// Logs go to stderr so that `download` output can be piped.
pub fn init(verbosity: u8, config: &LoggingConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter_directive(verbosity, config).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
