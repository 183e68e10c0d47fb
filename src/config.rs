/*
 * Responsibility
 * - read environment / .env settings once at startup (PORT, APP_ENV, ADMIN_SERVICE_URL)
 * - validate them (fail startup instead of failing per request)
 * - values are immutable after startup; components receive what they need at construction
 */
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

/// Used when `ADMIN_SERVICE_URL` is unset.
pub const DEFAULT_ADMIN_SERVICE_URL: &str = "http://localhost:8001";

/// Upper bound for one `GET /api/v1/auth/me` round trip.
pub const IDENTITY_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Base address of the identity (admin) service; `/api/v1/auth/me` is resolved against it.
    pub admin_service_url: Url,
    pub identity_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Unset PORT falls back to 3000; a set but unusable one fails startup.
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env =
            AppEnv::parse(&lookup("APP_ENV").unwrap_or_else(|| "development".to_string()));

        let admin_service_url = parse_service_url(
            &lookup("ADMIN_SERVICE_URL").unwrap_or_else(|| DEFAULT_ADMIN_SERVICE_URL.to_string()),
        )?;

        Ok(Self {
            addr,
            app_env,
            admin_service_url,
            identity_timeout: IDENTITY_REQUEST_TIMEOUT,
        })
    }
}

fn parse_service_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Missing("ADMIN_SERVICE_URL"));
    }

    let url = Url::parse(raw).map_err(|_| ConfigError::Invalid("ADMIN_SERVICE_URL"))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(ConfigError::Invalid("ADMIN_SERVICE_URL")),
    }
}
