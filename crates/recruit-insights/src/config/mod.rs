use crate::workflows::recruiting::{
    ProcessStateRules, DEFAULT_ACCEPTED_STATE, DEFAULT_OFFER_MARKER,
};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_REPORT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_REPORT_CACHE_ENTRIES: usize = 32;

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub analytics: AnalyticsConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            analytics: AnalyticsConfig::from_env()?,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Process-state vocabulary and report cache sizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    pub accepted_state: String,
    pub offer_marker: String,
    pub report_cache_ttl: Duration,
    /// Zero disables the report cache.
    pub report_cache_entries: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            accepted_state: DEFAULT_ACCEPTED_STATE.to_string(),
            offer_marker: DEFAULT_OFFER_MARKER.to_string(),
            report_cache_ttl: Duration::from_secs(DEFAULT_REPORT_CACHE_TTL_SECS),
            report_cache_entries: DEFAULT_REPORT_CACHE_ENTRIES,
        }
    }
}

impl AnalyticsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let accepted_state = state_label("APP_ACCEPTED_STATE", defaults.accepted_state)?;
        let offer_marker = state_label("APP_OFFER_MARKER", defaults.offer_marker)?;

        let report_cache_ttl = match env::var("APP_REPORT_CACHE_TTL_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidCacheTtl)?,
            ),
            Err(_) => defaults.report_cache_ttl,
        };

        let report_cache_entries = match env::var("APP_REPORT_CACHE_ENTRIES") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidCacheEntries)?,
            Err(_) => defaults.report_cache_entries,
        };

        Ok(Self {
            accepted_state,
            offer_marker,
            report_cache_ttl,
            report_cache_entries,
        })
    }

    pub fn state_rules(&self) -> ProcessStateRules {
        ProcessStateRules::new(self.accepted_state.clone(), self.offer_marker.clone())
    }
}

fn state_label(variable: &'static str, default: String) -> Result<String, ConfigError> {
    match env::var(variable) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyStateLabel { variable }),
        Ok(value) => Ok(value.trim().to_string()),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCacheTtl,
    InvalidCacheEntries,
    EmptyStateLabel { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCacheTtl => {
                write!(f, "APP_REPORT_CACHE_TTL_SECS must be a whole number of seconds")
            }
            ConfigError::InvalidCacheEntries => {
                write!(f, "APP_REPORT_CACHE_ENTRIES must be a non-negative integer")
            }
            ConfigError::EmptyStateLabel { variable } => {
                write!(f, "{} must not be blank", variable)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidCacheTtl
            | ConfigError::InvalidCacheEntries
            | ConfigError::EmptyStateLabel { .. } => None,
        }
    }
}
