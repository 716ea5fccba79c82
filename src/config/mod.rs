use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::scrape::fetcher::FETCH_TIMEOUT;
use crate::scrape::EnrichPolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value `{value}`: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub is_dev: bool,
    pub fetch_timeout: Duration,
    pub enrich: EnrichPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = EnrichPolicy::default();

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: parse_var("SERVER_PORT", 8080)?,
            is_dev: env::var("APP_ENV").as_deref() != Ok("production"),
            fetch_timeout: fetch_timeout()?,
            enrich: EnrichPolicy {
                concurrency: parse_var("ENRICH_CONCURRENCY", defaults.concurrency)?.max(1),
                delay: Duration::from_millis(parse_var(
                    "ENRICH_DELAY_MS",
                    defaults.delay.as_millis() as u64,
                )?),
                strategy: parse_var("ENRICH_STRATEGY", defaults.strategy)?,
            },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

// Must be at least one second; zero is a configuration error.
fn fetch_timeout() -> Result<Duration, ConfigError> {
    let secs: u64 = parse_var("FETCH_TIMEOUT_SECS", FETCH_TIMEOUT.as_secs())?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            name: "FETCH_TIMEOUT_SECS",
            value: secs.to_string(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Read `name` and parse it, falling back to `default` when unset.
fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value,
            })
        }
        Err(_) => Ok(default),
    }
}
