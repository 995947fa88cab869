/*
 * Responsibility
 * - Read settings from the environment (.env supported)
 * - Validate them (missing / invalid values fail startup)
 */
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::services::gate::MissingIdentityPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_production() { "info" } else { "debug" }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub identity_verify_url: Url,
    pub identity_timeout: Duration,
    pub missing_identity_policy: MissingIdentityPolicy,

    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let identity_verify_url = lookup("IDENTITY_VERIFY_URL")
            .ok_or(ConfigError::Missing("IDENTITY_VERIFY_URL"))
            .and_then(|raw| {
                Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid("IDENTITY_VERIFY_URL"))
            })?;

        if !matches!(identity_verify_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid("IDENTITY_VERIFY_URL"));
        }

        let identity_timeout_ms: u64 = match lookup("IDENTITY_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::Invalid("IDENTITY_TIMEOUT_MS"))?,
            None => 5000,
        };

        let missing_identity_policy = match lookup("MISSING_IDENTITY_POLICY") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("MISSING_IDENTITY_POLICY"))?,
            None => MissingIdentityPolicy::default(),
        };

        let request_timeout_secs: u64 = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?,
            None => 30,
        };

        let identity_timeout = Duration::from_millis(identity_timeout_ms);
        let request_timeout = Duration::from_secs(request_timeout_secs);

        // The global timeout must not pre-empt the identity call's own 500.
        if request_timeout <= identity_timeout {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"));
        }

        Ok(Self {
            addr,
            app_env,
            identity_verify_url,
            identity_timeout,
            missing_identity_policy,
            request_timeout,
        })
    }
}
