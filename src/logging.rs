//! Tracing subscriber setup
//!
//! Diagnostics such as a TEI file without a `mainLang` declaration are
//! emitted through `tracing`; installing this subscriber sends them to stderr.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::constants::logging;

/// Builds the filter: `RUST_LOG` directives plus the configured crate level
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    let directive = format!("{}={}", logging::CRATE_TARGET, config.level);
    let filter = EnvFilter::from_default_env();
    match directive.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(e) => {
            eprintln!("Ignoring invalid log level {:?}: {}", config.level, e);
            filter
        }
    }
}

/// Installs a stderr subscriber; returns false if one was already set
pub fn init_logging(config: &LoggingConfig) -> bool {
    fmt()
        .with_env_filter(build_filter(config))
        .with_writer(std::io::stderr)
        .with_target(config.show_target)
        .with_ansi(config.colored_output)
        .try_init()
        .is_ok()
}
