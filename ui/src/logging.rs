use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_DIR: &str = "tmp";
const LOG_BASENAME: &str = "odds_chart";

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Filter directive used when `RUST_LOG` is unset (defaults to `info`).
    pub level: Option<String>,
    /// Also write plain-text logs under `tmp/`.
    pub to_file: bool,
}

fn log_path() -> PathBuf {
    let ts_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let pid = std::process::id();
    let filename = format!("{LOG_BASENAME}_{ts_ms}_pid{pid}.log");
    Path::new(LOG_DIR).join(filename)
}

fn env_filter(level: Option<&str>) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level.unwrap_or("info"))
            .with_context(|| format!("invalid log level '{}'", level.unwrap_or("info"))),
    }
}

/// Installs the global subscriber. Returns the log file path when file
/// output is enabled.
pub fn init_logging(options: &LogOptions) -> Result<Option<PathBuf>> {
    let filter = env_filter(options.level.as_deref())?;

    let (file_layer, path) = if options.to_file {
        let path = log_path();
        if let Some(parent) = path.parent() {
            create_dir_all(parent)
                .with_context(|| format!("failed to create log dir {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        let layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
        (Some(layer), Some(path))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()
        .context("logging already initialised")?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_names_carry_pid() {
        let path = log_path();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(path.starts_with(LOG_DIR));
        assert!(name.starts_with(LOG_BASENAME));
        assert!(name.ends_with(&format!("_pid{}.log", std::process::id())));
    }

    #[test]
    fn rejects_bad_level() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(env_filter(Some("odds_core=loud")).is_err());
            assert!(env_filter(Some("debug")).is_ok());
        }
    }
}
