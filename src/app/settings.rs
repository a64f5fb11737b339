//! Environment-backed settings and logging setup.
//!
//! `.env` is loaded once, then process environment variables are read.
//! Command-line flags take precedence over anything resolved here.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

pub const DATA_DIR_ENV: &str = "CROP_DATA_DIR";
pub const LOG_FILE_ENV: &str = "TRENDS_LOG_FILE";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_LOG_FILTER: &str = "crop_trends=warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root of the `{sector}/{sub_sector}/{category}` tree.
    pub data_dir: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Read settings from `.env` (if present) and the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            data_dir: get(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            log_file: get(LOG_FILE_ENV).map(PathBuf::from),
        }
    }

    /// The data directory, with a command-line override applied.
    pub fn data_dir_or(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.data_dir.clone())
    }
}

/// Where log records may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Line-oriented commands log to stderr.
    Stderr,
    /// The TUI owns the terminal: `TRENDS_LOG_FILE` or nowhere.
    FileOnly,
}

/// Install the global `tracing` subscriber.
///
/// Filtering follows `RUST_LOG` when set, else [`DEFAULT_LOG_FILTER`].
/// A configured log file receives the records for every command.
pub fn init_tracing(settings: &Settings, target: LogTarget) -> Result<(), AppError> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match (target, &settings.log_file) {
        (_, Some(path)) => {
            let file = File::create(path).map_err(|e| {
                AppError::new(2, format!("Failed to create log file '{}': {e}", path.display()))
            })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .ok();
        }
        (LogTarget::Stderr, None) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init()
                .ok();
        }
        (LogTarget::FileOnly, None) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.log_file, None);
    }

    #[test]
    fn environment_values_are_used_and_blank_is_unset() {
        let settings = Settings::from_lookup(lookup(&[
            (DATA_DIR_ENV, " /srv/crops "),
            (LOG_FILE_ENV, "  "),
        ]));
        assert_eq!(settings.data_dir, PathBuf::from("/srv/crops"));
        assert_eq!(settings.log_file, None);
    }

    #[test]
    fn flag_overrides_environment() {
        let settings = Settings::from_lookup(lookup(&[(DATA_DIR_ENV, "/srv/crops")]));
        assert_eq!(settings.data_dir_or(Some(PathBuf::from("local"))), PathBuf::from("local"));
        assert_eq!(settings.data_dir_or(None), PathBuf::from("/srv/crops"));
    }
}
