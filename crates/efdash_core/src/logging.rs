//! Process logging for the analytics backend.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend behind the `log` facade once per process.
//! - Route records to rotating files when a directory is configured, stderr otherwise.
//!
//! # Invariants
//! - Repeating `init_logging` with the same level and destination is a no-op.
//! - A second call asking for another level or destination fails with
//!   `LoggingError::Conflict` and leaves the active logger untouched.
//! - Nothing here panics.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "efdash";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;
const PANIC_SUMMARY_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    destination: LogDestination,
    _handle: LoggerHandle,
}

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    /// Size-rotated `efdash_*.log` files in an absolute directory.
    Files(PathBuf),
}

impl LogDestination {
    fn parse(log_dir: Option<&str>) -> Result<Self, LoggingError> {
        let Some(raw) = log_dir else {
            return Ok(Self::Stderr);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LoggingError::InvalidDirectory(raw.to_string()));
        }
        let path = Path::new(trimmed);
        if !path.is_absolute() {
            return Err(LoggingError::InvalidDirectory(trimmed.to_string()));
        }
        Ok(Self::Files(path.to_path_buf()))
    }
}

impl Display for LogDestination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => f.write_str("stderr"),
            Self::Files(dir) => write!(f, "{}", dir.display()),
        }
    }
}

#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    /// Blank or relative log directory.
    InvalidDirectory(String),
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    Backend(String),
    Conflict {
        active: String,
        requested: String,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected off|error|warn|info|debug|trace"
            ),
            Self::InvalidDirectory(dir) => {
                write!(f, "log directory must be a non-empty absolute path, got `{dir}`")
            }
            Self::CreateDirectory { path, source } => {
                write!(f, "failed to create log directory `{}`: {source}", path.display())
            }
            Self::Backend(message) => write!(f, "failed to start logger: {message}"),
            Self::Conflict { active, requested } => write!(
                f,
                "logging already active as {active}; refusing to switch to {requested}"
            ),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDirectory { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Starts process logging at `level`, writing to `log_dir` when given.
pub fn init_logging(level: &str, log_dir: Option<&str>) -> Result<(), LoggingError> {
    let level = parse_level(level)?;
    let destination = LogDestination::parse(log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start(level, destination.clone()))?;
    if active.level != level || active.destination != destination {
        return Err(LoggingError::Conflict {
            active: describe(active.level, &active.destination),
            requested: describe(level, &destination),
        });
    }
    Ok(())
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(level: LevelFilter, destination: LogDestination) -> Result<ActiveLogger, LoggingError> {
    let logger = Logger::with(LogSpecification::builder().default(level).build());
    let logger = match &destination {
        LogDestination::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::detailed_format),
        LogDestination::Files(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDirectory {
                path: dir.clone(),
                source,
            })?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
    };
    let handle = logger
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook();
    info!(
        "event=logging_init module=core status=ok level={} destination={} version={}",
        level,
        destination,
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level,
        destination,
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    let trimmed = level.trim();
    if trimmed.eq_ignore_ascii_case("warning") {
        return Ok(LevelFilter::Warn);
    }
    trimmed
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::UnsupportedLevel(trimmed.to_string()))
}

fn describe(level: LevelFilter, destination: &LogDestination) -> String {
    format!("`{}` on `{destination}`", level.as_str().to_ascii_lowercase())
}

// Only ever called from inside the OnceCell initializer.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info.location().map_or_else(
            || "unknown".to_string(),
            |loc| format!("{}:{}", loc.file(), loc.line()),
        );
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            one_line(&payload, PANIC_SUMMARY_CHARS)
        );
        previous(panic_info);
    }));
}

/// Flattens `value` onto one line and caps it at `max_chars` characters.
fn one_line(value: &str, max_chars: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut capped: String = flat.chars().take(max_chars).collect();
    capped.push_str("...");
    capped
}

#[cfg(test)]
mod tests {
    use super::{init_logging, one_line, parse_level, LogDestination, LoggingError};
    use log::LevelFilter;
    use std::path::PathBuf;

    #[test]
    fn levels_parse_case_insensitively_with_warning_alias() {
        assert_eq!(parse_level(" INFO ").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level("warning").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert!(matches!(
            parse_level("verbose"),
            Err(LoggingError::UnsupportedLevel(level)) if level == "verbose"
        ));
    }

    #[test]
    fn destination_requires_an_absolute_directory() {
        assert_eq!(LogDestination::parse(None).unwrap(), LogDestination::Stderr);
        assert!(matches!(
            LogDestination::parse(Some("logs/dev")),
            Err(LoggingError::InvalidDirectory(_))
        ));
        assert!(matches!(
            LogDestination::parse(Some("   ")),
            Err(LoggingError::InvalidDirectory(_))
        ));
        let absolute = std::env::temp_dir();
        assert_eq!(
            LogDestination::parse(absolute.to_str()).unwrap(),
            LogDestination::Files(absolute.clone())
        );
        assert_eq!(LogDestination::Stderr.to_string(), "stderr");
    }

    #[test]
    fn panic_payloads_are_flattened_and_capped() {
        assert_eq!(one_line("a\nb\rc", 10), "a b c");
        assert_eq!(one_line("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn repeated_init_is_idempotent_and_conflicts_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap().to_string();
        let other: PathBuf = dir.path().join("other");

        init_logging("info", Some(&dir_str)).unwrap();
        init_logging(" INFO ", Some(&dir_str)).unwrap();

        let level_conflict = init_logging("debug", Some(&dir_str)).unwrap_err();
        assert!(matches!(level_conflict, LoggingError::Conflict { .. }));
        assert!(level_conflict.to_string().contains("refusing to switch"));

        let dir_conflict = init_logging("info", other.to_str()).unwrap_err();
        assert!(matches!(dir_conflict, LoggingError::Conflict { .. }));

        let stderr_conflict = init_logging("info", None).unwrap_err();
        assert!(stderr_conflict.to_string().contains("`stderr`"));
    }
}
