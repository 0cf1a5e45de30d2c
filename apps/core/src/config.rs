//! Runtime configuration read from the environment (and `.env` when present).

use std::env;
use std::fmt::Display;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), 5000));
const DEFAULT_DATABASE_URL: &str = "sqlite://herbwise.sqlite";
const DEFAULT_RATE_LIMIT: usize = 10;
const DEFAULT_RATE_WINDOW_SECS: u64 = 60;

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for local development
    Pretty,
    /// Bunyan-style JSON lines for log shipping
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format `{}` (expected `pretty` or `json`)", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// Recommendation requests allowed per user within `rate_window`.
    pub rate_limit: usize,
    pub rate_window: Duration,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_vars()
    }

    fn from_vars() -> Result<Self, AppError> {
        let rate_limit: usize = parse_var("HERBWISE_RATE_LIMIT", DEFAULT_RATE_LIMIT)?;
        if rate_limit == 0 {
            return Err(AppError::Config(
                "HERBWISE_RATE_LIMIT must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            bind_addr: parse_var("HERBWISE_BIND_ADDR", DEFAULT_BIND_ADDR)?,
            database_url: env::var("HERBWISE_DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            rate_limit,
            rate_window: Duration::from_secs(parse_var(
                "HERBWISE_RATE_WINDOW_SECS",
                DEFAULT_RATE_WINDOW_SECS,
            )?),
            log_format: parse_var("HERBWISE_LOG_FORMAT", LogFormat::Pretty)?,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} is invalid: {}", name, e))),
        Err(_) => Ok(default),
    }
}
