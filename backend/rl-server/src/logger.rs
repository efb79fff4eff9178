use crate::{ServerError, ServerResult};

use rl_config::LogLevel;

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// HTTP plumbing that is noisy at debug level
const QUIET_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "h2"];

/// Install the global logger.
///
/// `log_file` = None writes to stdout (coloured when `colored`), Some appends
/// to that file, creating its directory.
pub fn initialize(
    log_level: LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerResult<()> {
    let level = log_level.0;

    let output = match log_file.as_deref() {
        Some(path) => file_output(open_log_file(path)?),
        None if colored => colored_stdout(),
        None => plain_stdout(),
    };

    QUIET_TARGETS
        .iter()
        .fold(Dispatch::new().level(level), |dispatch, target| {
            dispatch.level_for(*target, level.min(LevelFilter::Info))
        })
        .chain(output)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(path) => log::info!("Logging at {:?} to {}", level, path.display()),
        None => log::info!("Logging at {:?} to stdout", level),
    }

    // reqwest and hyper emit tracing events
    tracing_log::LogTracer::init().ok();

    Ok(())
}

fn open_log_file(path: &Path) -> ServerResult<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to open log file {}: {}", path.display(), e),
        })
}

fn timestamp() -> humantime::Rfc3339Timestamp {
    humantime::format_rfc3339(SystemTime::now())
}

fn file_output(file: File) -> Dispatch {
    Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} - {}] {} [{}:{}]",
                timestamp(),
                record.level(),
                message,
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
            ))
        })
        .chain(file)
}

fn colored_stdout() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} - {}] {}",
                timestamp(),
                colors.color(record.level()),
                message,
            ))
        })
        .chain(std::io::stdout())
}

/// Plain output for non-TTY (systemd, docker logs)
fn plain_stdout() -> Dispatch {
    Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} - {}] {} [{}]",
                timestamp(),
                record.level(),
                message,
                record.target(),
            ))
        })
        .chain(std::io::stdout())
}
