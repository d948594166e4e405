//! Tracing initialization logic.

use crate::config::{Config, DEFAULT_LOG_FILTER};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber (fmt layer on stderr + env filter).
///
/// Stdout is reserved for the status lines that end up in the build log,
/// so all diagnostics go to stderr.
pub fn init_tracing(cfg: &Config) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(cfg.verbose)
        .with_level(true);

    let filter = EnvFilter::try_new(&cfg.log_filter).unwrap_or_else(|e| {
        eprintln!("Warning: Invalid log filter '{}': {e}", cfg.log_filter);
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });

    // try_init: a second initialization (e.g. from tests) is not an error.
    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        // option_env! so builds outside a git checkout still work
        git_sha = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        build_ts = option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        "incubator-prebuild starting"
    );

    info!(
        project_root = %cfg.project_root.display(),
        header = %cfg.header_path().display(),
        data_dir = %cfg.data_dir().display(),
        verbose = cfg.verbose,
        log_filter = %cfg.log_filter,
        "Configuration loaded"
    );
}
