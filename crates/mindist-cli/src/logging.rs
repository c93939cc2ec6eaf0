use crate::error::{CliError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt::{
        self,
        format::{DefaultFields, FmtSpan, Format},
    },
    prelude::*,
};

/// Crate prefix shared by the library and the binary targets.
const OWN_TARGET: &str = "mindist";

/// Resolved logging options for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl LogSettings {
    /// `-q` keeps errors only; each `-v` raises the level from WARN.
    pub fn from_flags(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Self {
        let level = match (quiet, verbosity) {
            (true, _) => LevelFilter::ERROR,
            (false, 0) => LevelFilter::WARN,
            (false, 1) => LevelFilter::INFO,
            (false, 2) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        };
        Self { level, log_file }
    }

    /// Our own events follow `level`; dependencies never go below WARN so
    /// `-vvv` traces the search without drowning it.
    pub fn targets(&self) -> Targets {
        Targets::new()
            .with_default(self.level.min(LevelFilter::WARN))
            .with_target(OWN_TARGET, self.level)
    }
}

/// Plain-text file output. Closing spans of the instrumented workflow and
/// search record how long each took.
fn file_layer<S>(path: &Path) -> Result<fmt::Layer<S, DefaultFields, Format, File>> {
    let file = File::create(path)?;
    Ok(fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::CLOSE))
}

pub fn setup_logging(settings: &LogSettings) -> Result<()> {
    let file_layer = settings
        .log_file
        .as_deref()
        .map(file_layer)
        .transpose()?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(settings.targets())
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Config(format!("Failed to install the global logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{Level, debug, error, info, info_span, trace, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            setup_logging(&LogSettings::from_flags(3, false, None))
                .expect("Failed to set up global logger for tests");
        });
    }

    #[test]
    fn flags_map_to_levels() {
        let level = |v, q| LogSettings::from_flags(v, q, None).level;
        assert_eq!(level(0, false), LevelFilter::WARN);
        assert_eq!(level(1, false), LevelFilter::INFO);
        assert_eq!(level(2, false), LevelFilter::DEBUG);
        assert_eq!(level(7, false), LevelFilter::TRACE);
        assert_eq!(level(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn dependencies_stay_at_warn_when_verbose() {
        let targets = LogSettings::from_flags(3, false, None).targets();
        assert!(targets.would_enable("mindist::engine::basin_hopping", &Level::TRACE));
        assert!(!targets.would_enable("indicatif", &Level::DEBUG));
        assert!(targets.would_enable("indicatif", &Level::WARN));
    }

    #[test]
    fn quiet_silences_warnings_everywhere() {
        let targets = LogSettings::from_flags(0, true, None).targets();
        assert!(!targets.would_enable("mindist::workflows::align", &Level::WARN));
        assert!(targets.would_enable("mindist::workflows::align", &Level::ERROR));
    }

    #[test]
    #[serial]
    fn initialization_and_macros_work() {
        ensure_global_logger_is_set();

        error!("This is an error");
        warn!("This is a warning");
        info!(distance = 0.5, "This is info");
        debug!("This is debug");
        trace!("This is trace");
    }

    #[test]
    #[serial]
    fn second_initialization_is_an_error_not_a_panic() {
        ensure_global_logger_is_set();
        let result = setup_logging(&LogSettings::from_flags(0, false, None));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    #[serial]
    fn file_layer_records_events_and_span_timings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let subscriber = tracing_subscriber::registry().with(file_layer(&log_path).unwrap());
        tracing::subscriber::with_default(subscriber, || {
            info_span!("basin_hopping").in_scope(|| {
                debug!(steps_taken = 12, "Basin hopping finished.");
            });
        });

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Basin hopping finished."));
        assert!(content.contains("steps_taken=12"));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
        assert!(content.contains("close"));
        assert!(content.contains("time.busy"));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let invalid_path = PathBuf::from("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let settings = LogSettings::from_flags(0, false, Some(invalid_path));
            assert!(matches!(setup_logging(&settings), Err(CliError::Io(_))));
        }
    }
}
