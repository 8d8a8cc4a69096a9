use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the admin desk.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub backend: BackendConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let base_url = env::var("BACKEND_BASE_URL")
            .unwrap_or_else(|_| BackendConfig::DEFAULT_BASE_URL.to_string());
        let directory_timeout_secs = env::var("BACKEND_DIRECTORY_TIMEOUT_SECS")
            .unwrap_or_else(|_| BackendConfig::DEFAULT_DIRECTORY_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidDirectoryTimeout)?;
        let employee_limit = env::var("BACKEND_EMPLOYEE_LIMIT")
            .unwrap_or_else(|_| BackendConfig::DEFAULT_EMPLOYEE_LIMIT.to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidEmployeeLimit)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            backend: BackendConfig::new(base_url, directory_timeout_secs, employee_limit)?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the recruitment REST backend and the limits applied when calling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub directory_timeout: Duration,
    pub employee_limit: u32,
}

impl BackendConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:5000";
    pub const DEFAULT_DIRECTORY_TIMEOUT_SECS: u64 = 60;
    pub const DEFAULT_EMPLOYEE_LIMIT: u32 = 200;

    pub fn new(
        base_url: impl Into<String>,
        directory_timeout_secs: u64,
        employee_limit: u32,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl { value: base_url });
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            directory_timeout: Duration::from_secs(directory_timeout_secs),
            employee_limit,
        })
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            directory_timeout: Duration::from_secs(Self::DEFAULT_DIRECTORY_TIMEOUT_SECS),
            employee_limit: Self::DEFAULT_EMPLOYEE_LIMIT,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidBackendUrl { value: String },
    InvalidDirectoryTimeout,
    InvalidEmployeeLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidBackendUrl { value } => write!(
                f,
                "BACKEND_BASE_URL must be an http(s) URL, got '{}'",
                value
            ),
            ConfigError::InvalidDirectoryTimeout => write!(
                f,
                "BACKEND_DIRECTORY_TIMEOUT_SECS must be a positive number of seconds"
            ),
            ConfigError::InvalidEmployeeLimit => {
                write!(f, "BACKEND_EMPLOYEE_LIMIT must be a valid u32")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidBackendUrl { .. }
            | ConfigError::InvalidDirectoryTimeout
            | ConfigError::InvalidEmployeeLimit => None,
        }
    }
}
