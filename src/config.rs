//! Runtime configuration from environment variables (and `.env`)

use crate::error::AdvisorError;
use crate::report::DEFAULT_CURRENCY;
use crate::scenario::{DEFAULT_MAX_HORIZON_MONTHS, HORIZON_LIMIT_MONTHS};
use crate::Result;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BACKEND_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_AUTH_BASE_URL: &str = "http://127.0.0.1:8001";
pub const DEFAULT_API_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub backend_base_url: String,
    pub auth_base_url: String,
    pub api_port: u16,
    /// Simulated processing delay for the local advisor
    pub latency: Duration,
    pub currency: String,
    pub http_timeout: Duration,
    pub max_horizon_months: u32,
    /// Where to persist the login session; in-memory when unset
    pub session_file: Option<PathBuf>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            api_port: DEFAULT_API_PORT,
            latency: Duration::ZERO,
            currency: DEFAULT_CURRENCY.to_string(),
            http_timeout: Duration::from_secs(30),
            max_horizon_months: DEFAULT_MAX_HORIZON_MONTHS,
            session_file: None,
        }
    }
}

impl AdvisorConfig {
    /// Load from the process environment, after reading `.env` if present
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_port = match get("PORT").or_else(|| get("API_PORT")) {
            Some(raw) => parse_value("PORT", &raw)?,
            None => defaults.api_port,
        };

        let latency = match get("ADVISOR_LATENCY_MS") {
            Some(raw) => Duration::from_millis(parse_value("ADVISOR_LATENCY_MS", &raw)?),
            None => defaults.latency,
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_value("HTTP_TIMEOUT_SECS", &raw)?),
            None => defaults.http_timeout,
        };

        let max_horizon_months = match get("MAX_HORIZON_MONTHS") {
            Some(raw) => parse_value("MAX_HORIZON_MONTHS", &raw)?,
            None => defaults.max_horizon_months,
        };
        if max_horizon_months == 0 || max_horizon_months > HORIZON_LIMIT_MONTHS {
            return Err(AdvisorError::Config(format!(
                "MAX_HORIZON_MONTHS must be between 1 and {}, got {}",
                HORIZON_LIMIT_MONTHS, max_horizon_months
            )));
        }

        Ok(Self {
            backend_base_url: get("BACKEND_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_base_url),
            auth_base_url: get("AUTH_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.auth_base_url),
            api_port,
            latency,
            currency: get("ADVISOR_CURRENCY").unwrap_or(defaults.currency),
            http_timeout,
            max_horizon_months,
            session_file: get("SESSION_FILE").map(PathBuf::from),
        })
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AdvisorError::Config(format!("{} has invalid value '{}'", key, raw)))
}
