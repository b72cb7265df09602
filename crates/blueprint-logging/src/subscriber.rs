//! Global subscriber installation

use blueprint_core::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Convert a [`Level`] to a tracing [`LevelFilter`]
pub fn level_filter(level: Level) -> LevelFilter {
    match level {
        Level::Verbose => LevelFilter::TRACE,
        Level::Debugging => LevelFilter::DEBUG,
        Level::Information => LevelFilter::INFO,
        Level::Warning => LevelFilter::WARN,
        Level::Error => LevelFilter::ERROR,
        Level::Off => LevelFilter::OFF,
    }
}

/// Filter defaulting to `level`; directives in `RUST_LOG` take precedence.
pub fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_filter(level).into())
        .from_env_lossy()
}

/// Initialize logging to stderr at the given level
///
/// Call this once from a binary. Later calls are ignored.
pub fn init_logging(level: Level) {
    use tracing_subscriber::prelude::*;

    let subscriber = tracing_subscriber::registry().with(env_filter(level)).with(
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr),
    );

    // Try to set as global default (ignore error if already set)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
