use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static TRACING_INIT: Once = Once::new();

/// Used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "carteira=info,carteira_api=info,carteira_core=info";

/// Installs the global subscriber. Logs go to stderr so `--json` output on
/// stdout stays clean.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = if verbose {
            EnvFilter::new("carteira=debug,carteira_api=debug,carteira_core=debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        };

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
