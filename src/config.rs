use std::str::FromStr;
use std::time::Duration;

use crate::common::ConfigError;

pub const DEFAULT_CONVERSION_API_BASE: &str =
    "https://graph.facebook.com/v24.0";

pub const DEFAULT_LEAD_WEBHOOK_URL: &str =
    "https://n8n.apcef-eventos.com/webhook/new-lead";

pub const DEFAULT_CONTACT_WEBHOOK_URL: &str =
    "https://n8n.apcef-eventos.com/webhook/new-contact";

/// Process configuration, read once at startup from the environment
/// (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub super_admin_email: Option<String>,
    pub lead_webhook_url: Option<String>,
    pub contact_webhook_url: Option<String>,
    pub conversion_api_base: String,
    pub outbound_timeout: Duration,
    pub public_base_url: String,
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url =
            get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let timeout_secs: u64 =
            parse_or("OUTBOUND_TIMEOUT_SECS", get("OUTBOUND_TIMEOUT_SECS"), 10)?;

        Ok(Self {
            database_url,
            bind_addr: get("BIND_ADDR")
                .unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                5,
            )?,
            super_admin_email: get("SUPER_ADMIN_EMAIL")
                .map(|e| e.to_lowercase()),
            lead_webhook_url: webhook_url(
                get("LEAD_WEBHOOK_URL"),
                DEFAULT_LEAD_WEBHOOK_URL,
            ),
            contact_webhook_url: webhook_url(
                get("CONTACT_WEBHOOK_URL"),
                DEFAULT_CONTACT_WEBHOOK_URL,
            ),
            conversion_api_base: get("CONVERSION_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_CONVERSION_API_BASE.to_string()),
            outbound_timeout: Duration::from_secs(timeout_secs),
            public_base_url: get("PUBLIC_BASE_URL")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            secure_cookies: parse_or(
                "SECURE_COOKIES",
                get("SECURE_COOKIES"),
                false,
            )?,
        })
    }
}

/// Unset falls back to the fixed endpoint; `off` disables delivery.
fn webhook_url(value: Option<String>, default: &str) -> Option<String> {
    match value {
        None => Some(default.to_string()),
        Some(v) if v.eq_ignore_ascii_case("off") => None,
        Some(v) => Some(v),
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: v }),
    }
}
