//! Application configuration structs
//!
//! Loads configuration from environment variables and an optional `.env` file.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub cors: CorsConfig,
    pub static_files: StaticFilesConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// HTTP/WebSocket listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// WebSocket connection tuning
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Interval between server pings in milliseconds
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_ms: u64,
    /// Close a connection after this long without any inbound frame
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_ms: u64,
    /// Per-connection outbound queue capacity; oldest events drop when full
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_ms: default_heartbeat_interval(),
            idle_timeout_ms: default_idle_timeout(),
            outbound_buffer: default_outbound_buffer(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Static client files
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    #[serde(default = "default_static_dir")]
    pub dir: String,
}

// Default value functions
fn default_app_name() -> String {
    "chat-relay".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_heartbeat_interval() -> u64 {
    25_000
}

fn default_idle_timeout() -> u64 {
    60_000
}

fn default_outbound_buffer() -> usize {
    256
}

/// Largest accepted per-connection outbound queue
///
/// Each connection allocates its queue up front.
pub const MAX_OUTBOUND_BUFFER: usize = 65_536;

fn default_static_dir() -> String {
    "public".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(raw) => Environment::parse(&raw)
                .ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
            None => Environment::default(),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::to_lowercase) {
            Some(raw) if raw == "json" => LogFormat::Json,
            Some(raw) if raw == "pretty" => LogFormat::Pretty,
            Some(raw) => return Err(ConfigError::InvalidValue("LOG_FORMAT", raw)),
            None if env.is_production() => LogFormat::Json,
            None => LogFormat::Pretty,
        };

        let gateway = GatewayConfig {
            heartbeat_interval_ms: parse_or(
                &lookup,
                "HEARTBEAT_INTERVAL_MS",
                default_heartbeat_interval,
            )?,
            idle_timeout_ms: parse_or(&lookup, "IDLE_TIMEOUT_MS", default_idle_timeout)?,
            outbound_buffer: parse_or(&lookup, "OUTBOUND_BUFFER", default_outbound_buffer)?,
        };

        if gateway.heartbeat_interval_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "HEARTBEAT_INTERVAL_MS",
                "must be greater than zero".to_string(),
            ));
        }
        if gateway.idle_timeout_ms <= gateway.heartbeat_interval_ms {
            return Err(ConfigError::InvalidValue(
                "IDLE_TIMEOUT_MS",
                format!("must exceed HEARTBEAT_INTERVAL_MS ({})", gateway.heartbeat_interval_ms),
            ));
        }
        if gateway.outbound_buffer == 0 {
            return Err(ConfigError::InvalidValue(
                "OUTBOUND_BUFFER",
                "must be greater than zero".to_string(),
            ));
        }
        if gateway.outbound_buffer > MAX_OUTBOUND_BUFFER {
            return Err(ConfigError::InvalidValue(
                "OUTBOUND_BUFFER",
                format!("must not exceed {MAX_OUTBOUND_BUFFER}"),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
                log_format,
            },
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(default_host),
                port: parse_or(&lookup, "PORT", default_port)?,
            },
            gateway,
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            static_files: StaticFilesConfig {
                dir: lookup("STATIC_DIR").unwrap_or_else(default_static_dir),
            },
        })
    }
}

/// Parse an optional variable, falling back to a default when unset
fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
