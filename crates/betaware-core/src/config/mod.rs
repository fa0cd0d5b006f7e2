//! Client configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! `BETAWARE_*` environment variables. Front ends apply their own flags last.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::face::DEFAULT_FACE_API_BASE_URL;
use crate::health::DEFAULT_HEALTH_CHECK_INTERVAL;
use crate::remote::DEFAULT_API_BASE_URL;
use crate::store::DATABASE_FILE_NAME;
use crate::util::{normalize_base_url, normalize_text_option};

const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "betaware";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const MAX_HEALTH_CHECK_INTERVAL_SECS: u64 = 24 * 60 * 60;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 60 * 60;

pub const ENV_API_URL: &str = "BETAWARE_API_URL";
pub const ENV_FACE_API_URL: &str = "BETAWARE_FACE_API_URL";
pub const ENV_HEALTH_INTERVAL_SECS: &str = "BETAWARE_HEALTH_INTERVAL_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "BETAWARE_REQUEST_TIMEOUT_SECS";
pub const ENV_DATA_DIR: &str = "BETAWARE_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_face_api_base_url")]
    pub face_api_base_url: String,
    #[serde(default = "default_health_check_interval_secs")]
    pub health_check_interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Directory holding `betaware.db`; the platform data dir when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            face_api_base_url: default_face_api_base_url(),
            health_check_interval_secs: default_health_check_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            data_dir: None,
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_face_api_base_url() -> String {
    DEFAULT_FACE_API_BASE_URL.to_string()
}

const fn default_health_check_interval_secs() -> u64 {
    DEFAULT_HEALTH_CHECK_INTERVAL.as_secs()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// `<config_dir>/betaware/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl ClientConfig {
    /// Defaults, the default config file when present, then the process environment.
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) => Self::load_from_path(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let mut config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            Error::Config(format!(
                "Failed to parse config at {}: {}",
                path.display(),
                error
            ))
        })?;
        config.normalize()?;
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut normalized = self.clone();
        normalized.normalize()?;
        let serialized = serde_json::to_string_pretty(&normalized)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Override fields from `BETAWARE_*` variables found through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| normalize_text_option(lookup(key));

        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(url) = lookup(ENV_FACE_API_URL) {
            self.face_api_base_url = url;
        }
        if let Some(value) = lookup(ENV_HEALTH_INTERVAL_SECS) {
            self.health_check_interval_secs = parse_seconds(ENV_HEALTH_INTERVAL_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            self.request_timeout_secs = parse_seconds(ENV_REQUEST_TIMEOUT_SECS, &value)?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        self.normalize()
    }

    pub const fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.health_check_interval_secs)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The configured data dir, or `<data_local_dir>/betaware`.
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Failed to resolve a data directory".to_string()))
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        Ok(self.resolved_data_dir()?.join(DATABASE_FILE_NAME))
    }

    fn normalize(&mut self) -> Result<()> {
        self.api_base_url = normalize_base_url(&self.api_base_url)
            .map_err(|error| Error::Config(format!("api_base_url: {error}")))?;
        self.face_api_base_url = normalize_base_url(&self.face_api_base_url)
            .map_err(|error| Error::Config(format!("face_api_base_url: {error}")))?;
        check_seconds(
            "health_check_interval_secs",
            self.health_check_interval_secs,
            MAX_HEALTH_CHECK_INTERVAL_SECS,
        )?;
        check_seconds(
            "request_timeout_secs",
            self.request_timeout_secs,
            MAX_REQUEST_TIMEOUT_SECS,
        )
    }
}

fn check_seconds(field: &str, value: u64, max: u64) -> Result<()> {
    if value == 0 {
        return Err(Error::Config(format!("{field} must be greater than zero")));
    }
    if value > max {
        return Err(Error::Config(format!(
            "{field} must be at most {max} seconds, got {value}"
        )));
    }
    Ok(())
}

fn parse_seconds(key: &str, value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|_| Error::Config(format!("{key} must be a whole number of seconds, got '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_services() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.face_api_base_url, "http://localhost:5000/api");
        assert_eq!(config.health_check_interval(), Duration::from_secs(30));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load_from_path(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn file_values_are_normalized_and_partial_files_keep_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"api_base_url": " https://api.betaware.example/api/v1/ ", "request_timeout_secs": 3}"#,
        )
        .unwrap();

        let config = ClientConfig::load_from_path(&path).unwrap();
        assert_eq!(config.api_base_url, "https://api.betaware.example/api/v1");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.health_check_interval_secs, 30);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_url": "http://localhost"}"#).unwrap();

        let error = ClientConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(error, Error::Config(_)));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = ClientConfig {
            api_base_url: "http://10.0.2.2:8080/api/v1/".to_string(),
            data_dir: Some(dir.path().join("data")),
            ..ClientConfig::default()
        };

        config.save_to_path(&path).unwrap();
        let loaded = ClientConfig::load_from_path(&path).unwrap();

        assert_eq!(loaded.api_base_url, "http://10.0.2.2:8080/api/v1");
        assert_eq!(loaded.data_dir, config.data_dir);
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = ClientConfig::default();
        config
            .apply_env(env(&[
                (ENV_API_URL, "https://remote.example/api/v1"),
                (ENV_HEALTH_INTERVAL_SECS, "5"),
                (ENV_DATA_DIR, "/tmp/betaware-test"),
                (ENV_FACE_API_URL, "   "),
            ]))
            .unwrap();

        assert_eq!(config.api_base_url, "https://remote.example/api/v1");
        assert_eq!(config.health_check_interval(), Duration::from_secs(5));
        assert_eq!(config.face_api_base_url, DEFAULT_FACE_API_BASE_URL);
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/betaware-test").join("betaware.db")
        );
    }

    #[test]
    fn invalid_environment_values_are_config_errors() {
        let mut config = ClientConfig::default();
        let error = config
            .apply_env(env(&[(ENV_REQUEST_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(error.to_string().contains(ENV_REQUEST_TIMEOUT_SECS));

        let mut config = ClientConfig::default();
        let error = config
            .apply_env(env(&[(ENV_API_URL, "ftp://example.com")]))
            .unwrap_err();
        assert!(matches!(error, Error::Config(_)));

        let mut config = ClientConfig::default();
        assert!(config
            .apply_env(env(&[(ENV_HEALTH_INTERVAL_SECS, "0")]))
            .is_err());
    }

    #[test]
    fn oversized_intervals_are_rejected() {
        let mut config = ClientConfig::default();
        let error = config
            .apply_env(env(&[(ENV_HEALTH_INTERVAL_SECS, "18446744073709551615")]))
            .unwrap_err();
        assert!(matches!(error, Error::Config(_)));
        assert!(error.to_string().contains("health_check_interval_secs"));

        let mut config = ClientConfig::default();
        assert!(config
            .apply_env(env(&[(ENV_REQUEST_TIMEOUT_SECS, "3601")]))
            .is_err());

        let mut config = ClientConfig::default();
        config
            .apply_env(env(&[(ENV_HEALTH_INTERVAL_SECS, "86400")]))
            .unwrap();
        assert_eq!(config.health_check_interval(), Duration::from_secs(86_400));
    }

    #[test]
    fn oversized_interval_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"health_check_interval_secs": 9999999999}"#).unwrap();

        assert!(matches!(
            ClientConfig::load_from_path(&path),
            Err(Error::Config(_))
        ));
    }
}
