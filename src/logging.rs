//! Native tracing setup. `RUST_LOG` overrides [`DEFAULT_FILTER`].

use tracing_subscriber::{fmt, EnvFilter};

/// Quiet dependencies, keep connector events.
pub const DEFAULT_FILTER: &str = "warn,cardano_wallets=info";

/// Set to `1` for JSON log lines instead of the pretty format.
pub const LOG_JSON_ENV: &str = "CARDANO_WALLETS_LOG_JSON";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a stderr subscriber; later calls are no-ops.
pub fn init_logging() {
    let json = std::env::var(LOG_JSON_ENV).is_ok_and(|value| value == "1");
    let builder = fmt::Subscriber::builder().with_env_filter(env_filter()).with_writer(std::io::stderr);

    let _ = if json { builder.json().try_init() } else { builder.pretty().try_init() };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_targets_this_crate() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        assert!(DEFAULT_FILTER.contains("cardano_wallets=info"));
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging();
        init_logging();
        tracing::info!(target: "cardano_wallets", "still logging");
    }
}
