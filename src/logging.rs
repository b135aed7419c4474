// Diagnostics go to stderr only; stdout carries nothing but the report.
//
// Priority: RUST_LOG env var > -v/-q flags > [logging] level > "warn".

use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem. `level` is the already-merged level
/// from config and CLI flags.
pub fn init(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!(version = crate::version_info(), filter = level, "Logging initialised");
}

fn build_filter(level: &str) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(format!("enfield_report={}", level.to_lowercase()))
    }
}

/// Map `-v` count and `--quiet` to a level, if either was given.
pub fn level_from_flags(verbose: u8, quiet: bool) -> Option<String> {
    if quiet {
        return Some("error".to_string());
    }

    match verbose {
        0 => None,
        1 => Some("debug".to_string()),
        _ => Some("trace".to_string()),
    }
}
