//! Runtime configuration for an assistant session.
//!
//! Resolution order: built-in defaults, then `DESKMATE_*` environment
//! variables, then explicit overrides from the caller (CLI flags).

use crate::logging::default_log_level;
use crate::service::workspace::SnapshotPaths;
use std::path::PathBuf;

pub const CONTACTS_SNAPSHOT_FILE: &str = "contacts.sqlite3";
pub const NOTES_SNAPSHOT_FILE: &str = "notes.sqlite3";
pub const DEFAULT_DATA_DIR: &str = "deskmate-data";

pub const DATA_DIR_ENV: &str = "DESKMATE_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "DESKMATE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "DESKMATE_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    /// Directory holding both snapshot files.
    pub data_dir: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Directory for rolling log files.
    pub log_dir: PathBuf,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self::with_data_dir(DEFAULT_DATA_DIR)
    }
}

impl AssistantConfig {
    /// Defaults rooted at `data_dir`; logs go to `<data_dir>/logs`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            log_dir: data_dir.join("logs"),
            log_level: default_log_level().to_string(),
            data_dir,
        }
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`, which maps variable names to values.
    ///
    /// Blank values are ignored. Without an explicit log dir, logs follow the
    /// data dir.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = match read(DATA_DIR_ENV) {
            Some(dir) => Self::with_data_dir(dir),
            None => Self::default(),
        };
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            config.log_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn snapshot_paths(&self) -> SnapshotPaths {
        SnapshotPaths::in_dir(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::{AssistantConfig, DATA_DIR_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn lookup_overrides_defaults_and_log_dir_follows_data_dir() {
        let env = HashMap::from([
            (DATA_DIR_ENV, "/tmp/deskmate"),
            (LOG_LEVEL_ENV, "warn"),
        ]);
        let config = AssistantConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/deskmate"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/deskmate/logs"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(
            config.snapshot_paths().contacts,
            PathBuf::from("/tmp/deskmate/contacts.sqlite3")
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let env = HashMap::from([(DATA_DIR_ENV, "  "), (LOG_DIR_ENV, "/var/log/deskmate")]);
        let config = AssistantConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config, {
            let mut expected = AssistantConfig::default();
            expected.log_dir = PathBuf::from("/var/log/deskmate");
            expected
        });
    }
}
