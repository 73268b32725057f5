use crate::error::{AppError, Result};

/// Process configuration, read once from the environment at startup.
/// Any missing required value aborts the run before dispatch.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub pds_location: String,
    pub account_number: String,
    pub ssid: Option<String>,
    pub max_tries: u32,
    pub retry_backoff_ms: u64,
    pub task_timeout_seconds: u64,
    pub worker_pool_size: usize,
    pub poll_interval_ms: u64,
    pub insecure_tls: bool,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Ok(Config {
            host: required("ZOSMF_HOST")?,
            port: parsed("ZOSMF_PORT", required("ZOSMF_PORT")?)?,
            user: required("ZOSMF_USER")?,
            password: required("ZOSMF_PASSWORD")?,
            pds_location: required("PDS_LOCATION")?,
            account_number: required("ACCOUNT_NUMBER")?,
            ssid: std::env::var("SSID").ok().filter(|s| !s.is_empty()),
            max_tries: parsed_or("MAX_TRIES", 5)?,
            retry_backoff_ms: parsed_or("RETRY_BACKOFF_MS", 2000)?,
            task_timeout_seconds: parsed_or("TASK_TIMEOUT_SECONDS", 300)?,
            worker_pool_size: parsed_or("WORKER_POOL_SIZE", 10)?,
            poll_interval_ms: parsed_or("POLL_INTERVAL_MS", 3000)?,
            insecure_tls: parsed_or("ZOSMF_INSECURE", false)?,
        })
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Config(format!("{name} must be set")))
}

fn parsed<T>(name: &str, value: String) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| AppError::Config(format!("invalid value for {name}: {e}")))
}

fn parsed_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => parsed(name, value),
        _ => Ok(default),
    }
}
