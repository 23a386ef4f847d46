//! Tracing subscriber installation for the `halc` binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the filter directives, e.g. `hal_parse=trace`.
pub const LOG_ENV: &str = "HALC_LOG";
/// Set to `1` for indented, span-structured output.
pub const TREE_ENV: &str = "HALC_LOG_TREE";

/// Install a global subscriber if `HALC_LOG` (or `RUST_LOG`) is set.
///
/// Safe to call more than once. Output goes to standard error.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Some(directives) = std::env::var(LOG_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
        else {
            return;
        };
        let filter = EnvFilter::new(directives);
        let registry = tracing_subscriber::registry().with(filter);

        let installed = if std::env::var(TREE_ENV).is_ok_and(|v| v == "1") {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .try_init()
        };
        if installed.is_err() {
            eprintln!("warning: a tracing subscriber was already installed; {LOG_ENV} ignored");
        }
    });
}
