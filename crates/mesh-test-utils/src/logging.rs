//! Test logging setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a compact `fmt` layer filtered by `RUST_LOG` (default `info`).
///
/// Output goes through the test writer so it is captured per test. Safe to
/// call from every test; only the first call installs anything.
pub fn init() {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_test_writer()
        .compact();

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info, warn};

    #[test]
    fn test_logging_init_is_repeatable() {
        init();
        init();

        info!(version = "v2.0", "Projecting control plane spec");
        warn!("Baseline sets cluster domain");
        debug!("Filtered out at the default level");
        assert!(tracing::dispatcher::has_been_set());
    }
}
