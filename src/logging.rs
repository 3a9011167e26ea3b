//! Tracing subscriber setup

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Directive used when `RUST_LOG` is not set
fn default_directive(config: &LoggingConfig, verbose: bool) -> String {
    let level = if verbose { "debug" } else { config.level.as_str() };
    format!("{level},hyper_util=warn,reqwest=warn")
}

/// Install the global subscriber, writing to stderr so stdout stays clean
/// for rendered output. `RUST_LOG` overrides the configured level.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(config, verbose)))
        .map_err(|e| anyhow!("Invalid log filter: {e}"))?;

    let registry = tracing_subscriber::registry().with(filter);
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match config.format.as_str() {
        "json" => registry
            .with(layer.json().with_current_span(false))
            .try_init(),
        _ => registry.with(layer.with_target(false)).try_init(),
    }
    .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        let config = LoggingConfig::default();
        assert!(default_directive(&config, false).starts_with("info,"));
        assert!(default_directive(&config, true).starts_with("debug,"));
    }

    #[test]
    fn test_directives_parse() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            format: "json".to_string(),
        };
        assert!(EnvFilter::try_new(default_directive(&config, false)).is_ok());
    }
}
