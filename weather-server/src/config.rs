use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Service configuration, loaded once at startup from `WEATHER_*`
/// environment variables. Read-only after that; every request sees the
/// same values.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::address")]
    pub address: String,

    #[serde(default = "defaults::port")]
    pub port: u16,

    /// Log filter directive, e.g. "info" or "weather_server=debug".
    #[serde(default = "defaults::log_level")]
    pub log_level: String,

    /// Per-request deadline for the whole pipeline, in seconds.
    #[serde(default = "defaults::read_write_timeout_secs")]
    pub read_write_timeout_secs: u64,

    /// Grace period for in-flight requests on shutdown, in seconds.
    #[serde(default = "defaults::shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,

    /// Base URL of the OpenWeather API, without the `/weather` suffix.
    pub openweather_base_url: String,

    /// OpenWeather API credential (`appid` query parameter).
    pub openweather_api_id: String,

    #[serde(default = "defaults::openweather_timeout_secs")]
    pub openweather_timeout_secs: u64,

    /// Placeholder until the auth middleware does real lookups.
    #[serde(default = "defaults::auth_service_url")]
    pub auth_service_url: String,
}

impl Config {
    /// Load config from `WEATHER_*` environment variables, e.g.
    /// `WEATHER_PORT=8080` or `WEATHER_OPENWEATHER_API_ID=...`.
    pub fn from_env() -> Result<Self> {
        let conf: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("WEATHER").try_parsing(true))
            .build()
            .context("reading environment")?
            .try_deserialize()
            .context("parsing environment variables")?;
        Ok(conf)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn read_write_timeout(&self) -> Duration {
        Duration::from_secs(self.read_write_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    pub fn openweather_timeout(&self) -> Duration {
        Duration::from_secs(self.openweather_timeout_secs)
    }
}

mod defaults {
    pub fn address() -> String {
        "0.0.0.0".to_string()
    }

    pub fn port() -> u16 {
        80
    }

    pub fn log_level() -> String {
        "info".to_string()
    }

    pub fn read_write_timeout_secs() -> u64 {
        20
    }

    pub fn shutdown_timeout_secs() -> u64 {
        20
    }

    pub fn openweather_timeout_secs() -> u64 {
        5
    }

    pub fn auth_service_url() -> String {
        "http://some.auth.com".to_string()
    }
}
