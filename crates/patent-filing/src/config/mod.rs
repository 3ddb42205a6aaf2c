use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::filing::{FeeSchedule, FeeScheduleError, FilingRules};

const DEFAULT_OFFLINE_SURCHARGE_PERCENT: u64 = 10;
const MAX_OFFLINE_SURCHARGE_PERCENT: u64 = 1000;

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
    pub filing: FilingSettings,
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
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(value) => LogFormat::parse(&value).ok_or(ConfigError::InvalidLogFormat(value))?,
            Err(_) => LogFormat::default(),
        };

        let fee_schedule_path = env::var("FEE_SCHEDULE_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let offline_surcharge_percent = match env::var("OFFLINE_SURCHARGE_PERCENT") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|percent| *percent <= MAX_OFFLINE_SURCHARGE_PERCENT)
                .ok_or(ConfigError::InvalidSurcharge(value))?,
            Err(_) => DEFAULT_OFFLINE_SURCHARGE_PERCENT,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            filing: FilingSettings {
                fee_schedule_path,
                offline_surcharge_percent,
            },
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

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Where the fee tables come from and how paper filings are surcharged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingSettings {
    pub fee_schedule_path: Option<PathBuf>,
    pub offline_surcharge_percent: u64,
}

impl Default for FilingSettings {
    fn default() -> Self {
        Self {
            fee_schedule_path: None,
            offline_surcharge_percent: DEFAULT_OFFLINE_SURCHARGE_PERCENT,
        }
    }
}

impl FilingSettings {
    /// Build the rule tables once: the CSV schedule when a path is set,
    /// the statutory schedule otherwise.
    pub fn rules(&self) -> Result<FilingRules, ConfigError> {
        let schedule = match &self.fee_schedule_path {
            Some(path) => FeeSchedule::from_path(path).map_err(|source| ConfigError::FeeSchedule {
                path: path.clone(),
                source,
            })?,
            None => FeeSchedule::standard(),
        };
        Ok(FilingRules::with_schedule(
            schedule.with_offline_surcharge(self.offline_surcharge_percent),
        ))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat(String),
    InvalidSurcharge(String),
    FeeSchedule { path: PathBuf, source: FeeScheduleError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'pretty', found '{value}'")
            }
            ConfigError::InvalidSurcharge(value) => write!(
                f,
                "OFFLINE_SURCHARGE_PERCENT must be an integer between 0 and {MAX_OFFLINE_SURCHARGE_PERCENT}, found '{value}'"
            ),
            ConfigError::FeeSchedule { path, .. } => {
                write!(f, "unable to load fee schedule from {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidLogFormat(_)
            | ConfigError::InvalidSurcharge(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::FeeSchedule { source, .. } => Some(source),
        }
    }
}
