//! Configuration loading and constants.
//!
//! All settings come from the process environment and are read once at startup.
//! Empty variables count as unset, so `PORT=` falls back to the default port the
//! same way an absent `PORT` does. `AppConfig` is the root configuration struct.

use std::net::IpAddr;
use std::str::FromStr;

// =============================================================================
// Environment Variable Names
// =============================================================================

pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "HOST";
pub const ENV_APP_VERSION: &str = "APP_VERSION";
pub const ENV_NODE_ENV: &str = "NODE_ENV";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

// =============================================================================
// Defaults
// =============================================================================

/// Listening port when `PORT` is not set
pub const DEFAULT_PORT: u16 = 3000;

/// Bind address when `HOST` is not set (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Reported version when `APP_VERSION` is not set
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// Reported environment name when `NODE_ENV` is not set
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Default log filter when neither `--log-level` nor RUST_LOG is given
pub const DEFAULT_LOG_FILTER: &str = "pipeline_demo=info,tower_http=info";

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Every endpoint reports live values, so nothing may be cached upstream
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// HTTP listener configuration
    pub http: HttpServerConfig,
    /// Values reported by the informational endpoints
    pub app: AppInfo,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

/// Deployment metadata echoed back to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub version: String,
    pub environment: String,
}

/// Logging configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

/// Log output format: human-readable text or one JSON object per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            version: DEFAULT_APP_VERSION.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Values that are present but empty are treated as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let port = match get(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let host = get(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host.clone()))?;

        let format = match get(ENV_LOG_FORMAT) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            http: HttpServerConfig { host, port },
            app: AppInfo {
                version: get(ENV_APP_VERSION).unwrap_or_else(|| DEFAULT_APP_VERSION.to_string()),
                environment: get(ENV_NODE_ENV)
                    .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            },
            logging: LoggingConfig { format },
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0:?}")]
    InvalidPort(String),
    #[error("Invalid HOST value: {0:?}")]
    InvalidHost(String),
    #[error("Invalid LOG_FORMAT value: {0:?} (expected \"text\" or \"json\")")]
    InvalidLogFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.app.version, "1.0.0");
        assert_eq!(config.app.environment, "development");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn empty_variables_count_as_unset() {
        let config = load(&[(ENV_PORT, ""), (ENV_APP_VERSION, ""), (ENV_NODE_ENV, "")]).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = load(&[
            (ENV_PORT, "8080"),
            (ENV_HOST, "127.0.0.1"),
            (ENV_APP_VERSION, "2.3.4"),
            (ENV_NODE_ENV, "production"),
            (ENV_LOG_FORMAT, "JSON"),
        ])
        .unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.host, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.app.version, "2.3.4");
        assert_eq!(config.app.environment, "production");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert_eq!(
            load(&[(ENV_PORT, "http")]),
            Err(ConfigError::InvalidPort("http".to_string()))
        );
        assert!(matches!(
            load(&[(ENV_PORT, "70000")]),
            Err(ConfigError::InvalidPort(_))
        ));
    }

    #[test]
    fn invalid_host_is_rejected() {
        assert!(matches!(
            load(&[(ENV_HOST, "not an address")]),
            Err(ConfigError::InvalidHost(_))
        ));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert_eq!(
            "yaml".parse::<LogFormat>(),
            Err(ConfigError::InvalidLogFormat("yaml".to_string()))
        );
        assert_eq!("Text".parse::<LogFormat>(), Ok(LogFormat::Text));
    }
}
