//! Client configuration.
//!
//! Native clients resolve settings from built-in defaults, an optional
//! `.toml`/`.json` file, `IPHMS_*` environment variables and finally explicit
//! command-line overrides, each layer replacing the one before it. The browser
//! build has no file system or environment, so its base URL is fixed at
//! compile time.

use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::DEFAULT_API_URL;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "IPHMS_API_URL";
/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "IPHMS_LOG_LEVEL";
/// Environment variable overriding the log format.
pub const LOG_FORMAT_ENV: &str = "IPHMS_LOG_FORMAT";
/// Environment variable overriding where the CLI keeps its session file.
pub const SESSION_PATH_ENV: &str = "IPHMS_SESSION_PATH";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("unsupported configuration format for {}; use .toml or .json", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("invalid {name} value {value:?}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Settings shared by the IPHMS clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Where the CLI persists the session.
    #[cfg(not(target_arch = "wasm32"))]
    pub session_path: PathBuf,
    pub logging: LoggingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            logging: LoggingConfig::default(),
            #[cfg(not(target_arch = "wasm32"))]
            session_path: default_session_path(),
        }
    }

    /// Configuration baked in at build time; used by the browser client.
    #[must_use]
    pub fn from_build_env() -> Self {
        let mut config = Self::with_defaults();
        if let Some(url) = option_env!("IPHMS_API_URL").filter(|url| !url.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }
        config
    }

    /// Check the resolved values, collecting every problem found.
    ///
    /// # Errors
    /// Returns one message per invalid setting.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match url::Url::parse(&self.api_base_url) {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => errors.push(format!(
                "API base URL must use http or https: {}",
                self.api_base_url
            )),
            Ok(url) if url.host_str().is_none() => {
                errors.push(format!("API base URL has no host: {}", self.api_base_url));
            }
            Ok(_) => {}
            Err(err) => errors.push(format!(
                "Invalid API base URL '{}': {err}",
                self.api_base_url
            )),
        }

        let level = self.logging.level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(format!(
                "Invalid log level '{}'. Expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::{
        env, fs,
        path::{Path, PathBuf},
    };

    use directories::BaseDirs;
    use tracing::debug;

    use super::{
        API_URL_ENV, ClientConfig, ConfigError, LOG_FORMAT_ENV, LOG_LEVEL_ENV, SESSION_PATH_ENV,
    };

    pub(super) fn default_session_path() -> PathBuf {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("iphms").join("session.json"))
            .unwrap_or_else(|| PathBuf::from("./iphms-session.json"))
    }

    fn non_empty_env(name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.trim().is_empty())
    }

    impl ClientConfig {
        /// Resolve the configuration from every layer.
        ///
        /// # Arguments
        /// * `config_path` - Optional `.toml` or `.json` file.
        /// * `api_url_override` - Base URL given on the command line.
        ///
        /// # Errors
        /// Fails when the file cannot be read or parsed, an environment
        /// variable holds an invalid value, or the result does not validate.
        pub fn load_config(
            config_path: Option<&Path>,
            api_url_override: Option<&str>,
        ) -> Result<Self, ConfigError> {
            let mut config = match config_path {
                Some(path) => Self::from_file(path)?,
                None => Self::with_defaults(),
            };

            config.apply_env_overrides()?;

            if let Some(url) = api_url_override {
                config.api_base_url = url.to_string();
            }

            config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
            config.validate().map_err(ConfigError::Invalid)?;
            debug!(api_base_url = %config.api_base_url, "configuration resolved");
            Ok(config)
        }

        fn from_file(path: &Path) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let parse_error = |message: String| ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            };

            match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => toml::from_str(&content).map_err(|err| parse_error(err.to_string())),
                Some("json") => {
                    serde_json::from_str(&content).map_err(|err| parse_error(err.to_string()))
                }
                _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
            }
        }

        /// Apply `IPHMS_*` environment variables on top of the current values.
        ///
        /// # Errors
        /// Returns [`ConfigError::InvalidEnv`] for an unknown log format.
        pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
            if let Some(url) = non_empty_env(API_URL_ENV) {
                self.api_base_url = url;
            }
            if let Some(level) = non_empty_env(LOG_LEVEL_ENV) {
                self.logging.level = level;
            }
            if let Some(format) = non_empty_env(LOG_FORMAT_ENV) {
                self.logging.format = format.parse().map_err(|_| ConfigError::InvalidEnv {
                    name: LOG_FORMAT_ENV,
                    value: format,
                })?;
            }
            if let Some(path) = non_empty_env(SESSION_PATH_ENV) {
                self.session_path = PathBuf::from(path);
            }
            Ok(())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
use native::default_session_path;

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn cleanup_env_vars() {
        unsafe {
            for name in [API_URL_ENV, LOG_LEVEL_ENV, LOG_FORMAT_ENV, SESSION_PATH_ENV] {
                std::env::remove_var(name);
            }
        }
    }

    #[test]
    fn defaults_point_at_local_api() {
        let config = ClientConfig::with_defaults();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.session_path.ends_with("session.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn load_without_file_uses_defaults() {
        cleanup_env_vars();
        let config = ClientConfig::load_config(None, None).unwrap();
        assert_eq!(config, ClientConfig::with_defaults());
    }

    #[test]
    #[serial]
    fn load_from_toml_file() {
        cleanup_env_vars();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("iphms.toml");
        fs::write(
            &path,
            r#"
api_base_url = "https://vitals.example.com/"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = ClientConfig::load_config(Some(&path), None).unwrap();
        assert_eq!(config.api_base_url, "https://vitals.example.com");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.session_path, ClientConfig::with_defaults().session_path);
    }

    #[test]
    #[serial]
    fn load_from_json_file() {
        cleanup_env_vars();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("iphms.json");
        fs::write(
            &path,
            r#"{ "api_base_url": "http://10.0.0.5:5000", "session_path": "/tmp/iphms.json" }"#,
        )
        .unwrap();

        let config = ClientConfig::load_config(Some(&path), None).unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:5000");
        assert_eq!(config.session_path, PathBuf::from("/tmp/iphms.json"));
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("iphms.ini");
        fs::write(&path, "api_base_url=http://x").unwrap();
        let err = ClientConfig::load_config(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_and_malformed_files_fail() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            ClientConfig::load_config(Some(&missing), None),
            Err(ConfigError::Read { .. })
        ));

        let malformed = dir.path().join("bad.json");
        fs::write(&malformed, "{ not json").unwrap();
        assert!(matches!(
            ClientConfig::load_config(Some(&malformed), None),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    #[serial]
    fn environment_overrides_file_and_cli_overrides_environment() {
        cleanup_env_vars();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("iphms.toml");
        fs::write(&path, "api_base_url = \"http://file:5000\"\n").unwrap();

        unsafe {
            std::env::set_var(API_URL_ENV, "http://env:5000");
            std::env::set_var(LOG_LEVEL_ENV, "warn");
            std::env::set_var(SESSION_PATH_ENV, "/tmp/env-session.json");
        }

        let config = ClientConfig::load_config(Some(&path), None).unwrap();
        assert_eq!(config.api_base_url, "http://env:5000");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.session_path, PathBuf::from("/tmp/env-session.json"));

        let config = ClientConfig::load_config(Some(&path), Some("http://cli:5000")).unwrap();
        assert_eq!(config.api_base_url, "http://cli:5000");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn invalid_log_format_in_environment_fails() {
        cleanup_env_vars();
        unsafe {
            std::env::set_var(LOG_FORMAT_ENV, "yaml");
        }
        let err = ClientConfig::load_config(None, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name, .. } if name == LOG_FORMAT_ENV));
        cleanup_env_vars();
    }

    #[test]
    fn validate_reports_every_problem() {
        let mut config = ClientConfig::with_defaults();
        config.api_base_url = "ftp://files.example.com".into();
        config.logging.level = "loud".into();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("http or https"));
        assert!(errors[1].contains("Invalid log level"));

        config.api_base_url = "not a url".into();
        config.logging.level = "DEBUG".into();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Invalid API base URL"));
    }

    #[test]
    #[serial]
    fn cli_override_is_validated() {
        cleanup_env_vars();
        let err = ClientConfig::load_config(None, Some("localhost")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn log_format_parses_leniently() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" text ".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Json.to_string(), "json");
    }
}
