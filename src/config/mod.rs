use std::env;
use std::str::FromStr;

use thiserror::Error;

pub mod cors;
pub mod headers;
pub mod throttle;

pub use cors::create_cors_layer;
pub use headers::apply_security_headers;
pub use throttle::ThrottleLayer;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_RATE_LIMIT_MAX: u32 = 60;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {0} has an invalid value")]
    Invalid(&'static str),
}

/// Process configuration, read once at startup. A missing `DATABASE_URL`
/// is fatal; everything else has a default or is optional.
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Comma-separated allowed CORS origins; `None` means permissive.
    pub allowed_origins: Option<String>,
    pub rate_limit: RateLimit,
    /// `None` disables email notification entirely.
    pub mail: Option<MailConfig>,
}

pub struct RateLimit {
    pub max_requests: u32,
    pub window_secs: u64,
}

pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    /// Sender address for both guest and admin messages.
    pub from: String,
    /// Admin notification recipient; absence skips the admin copy.
    pub admin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            non_empty_var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            port: parsed_var("PORT", DEFAULT_PORT)?,
            allowed_origins: non_empty_var("CORS_ALLOWED_ORIGINS"),
            rate_limit: RateLimit {
                max_requests: parsed_var("RATE_LIMIT_MAX", DEFAULT_RATE_LIMIT_MAX)?,
                window_secs: parsed_var("RATE_LIMIT_WINDOW_SECS", DEFAULT_RATE_LIMIT_WINDOW_SECS)?,
            },
            mail: MailConfig::from_env()?,
        })
    }
}

impl MailConfig {
    /// Notification is enabled only when both the SMTP host and the sender
    /// address are present; a partially configured mailer is treated as
    /// disabled rather than an error.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let (Some(smtp_host), Some(from)) = (non_empty_var("SMTP_HOST"), non_empty_var("MAIL_FROM"))
        else {
            return Ok(None);
        };

        Ok(Some(Self {
            smtp_host,
            smtp_port: parsed_var("SMTP_PORT", DEFAULT_SMTP_PORT)?,
            smtp_username: non_empty_var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: non_empty_var("SMTP_PASSWORD").unwrap_or_default(),
            from,
            admin: non_empty_var("ADMIN_EMAIL"),
        }))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(name) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global, so the from_env scenarios
    // run inside one test function.
    #[test]
    fn from_env_requires_database_url_and_fills_defaults() {
        env::remove_var("DATABASE_URL");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));

        env::set_var("DATABASE_URL", "postgres://localhost/boxoffice");
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.rate_limit.max_requests, DEFAULT_RATE_LIMIT_MAX);
        assert!(config.mail.is_none());
        env::remove_var("DATABASE_URL");
    }
}
