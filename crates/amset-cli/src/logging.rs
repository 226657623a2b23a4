use crate::error::{CliError, Result};
use std::fs::File;
use std::path::Path;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt::{self},
    prelude::*,
};

const CRATE_TARGETS: [&str; 2] = ["amset", "amset_cli"];

pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Events from this workspace pass at `level`; everything else is capped at
/// WARN so that dependency chatter stays out of `-vv` output.
fn targets(level: LevelFilter) -> Targets {
    CRATE_TARGETS
        .iter()
        .fold(Targets::new().with_default(level.min(LevelFilter::WARN)), |t, target| {
            t.with_target(*target, level)
        })
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let level = level_filter(verbosity, quiet);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(targets(level))
        .with(stderr_layer);

    if let Some(path) = log_file {
        let file = File::create(path).map_err(CliError::Io)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_target(true);

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{debug, error, info, trace, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("Failed to set up global logger for tests");
        });
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(0, true), LevelFilter::OFF);
    }

    #[test]
    fn dependency_targets_are_capped_at_warn() {
        let filter = targets(LevelFilter::DEBUG);
        assert!(filter.would_enable("amset::engine::rates", &tracing::Level::DEBUG));
        assert!(filter.would_enable("amset_cli", &tracing::Level::DEBUG));
        assert!(!filter.would_enable("rayon_core", &tracing::Level::INFO));
        assert!(filter.would_enable("rayon_core", &tracing::Level::WARN));
    }

    #[test]
    #[serial]
    fn initialization_and_macros_work() {
        ensure_global_logger_is_set();

        error!("This is an error");
        warn!("This is a warning");
        info!("This is info");
        debug!("This is debug");
        trace!("This is trace");
    }

    #[test]
    #[serial]
    fn file_layer_writes_thread_ids_without_ansi() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("amset.log");

        let file = File::create(&log_path).unwrap();
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true);
        let subscriber = tracing_subscriber::registry()
            .with(targets(LevelFilter::DEBUG))
            .with(file_layer);

        tracing::subscriber::with_default(subscriber, || {
            debug!(target: "amset::workflows", "Message for file-only test.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Message for file-only test."));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
        assert!(!content.contains("\u{1b}["));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let invalid_path = Path::new("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(0, false, Some(invalid_path));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }
}
