use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::DeckError;
use crate::lifecycle::model::DEFAULT_TICK_INTERVAL_SECONDS;

/// Service configuration, loadable from a YAML file. Every field has a
/// default so an empty file (or no file at all) is a valid configuration.
///
/// The scan window itself is deliberately not configurable; it is the
/// documented constant in the lifecycle model.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeckConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Root directory for the database and stored contract sources.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Seconds between live-view re-evaluations. Clamped to 1..=2.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_seconds: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8700
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL_SECONDS
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            tick_interval_seconds: default_tick_interval(),
        }
    }
}

impl DeckConfig {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("auditdeck.db")
    }

    pub fn files_dir(&self) -> PathBuf {
        self.data_dir.join("files")
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.tick_interval_seconds.clamp(1, 2))
    }
}

pub fn load_config(path: Option<&Path>) -> Result<DeckConfig, DeckError> {
    match path {
        None => Ok(DeckConfig::default()),
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                DeckError::Config(format!("Cannot read {}: {}", path.display(), e))
            })?;
            if raw.trim().is_empty() {
                return Ok(DeckConfig::default());
            }
            let config: DeckConfig = serde_yaml::from_str(&raw)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8700);
        assert_eq!(config.tick_interval_seconds, 1);
        assert!(config.db_path().ends_with("auditdeck.db"));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port: 9100\ntick_interval_seconds: 2").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.tick_interval(), std::time::Duration::from_secs(2));
    }

    #[test]
    fn test_tick_interval_is_clamped() {
        let config = DeckConfig {
            tick_interval_seconds: 30,
            ..DeckConfig::default()
        };
        assert_eq!(config.tick_interval(), std::time::Duration::from_secs(2));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = load_config(Some(Path::new("/nonexistent/deck.yaml"))).unwrap_err();
        assert!(matches!(err, DeckError::Config(_)));
    }
}
