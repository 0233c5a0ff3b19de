use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use log::warn;
use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://mtri4fosrcw3ekig6xubcjuhpe0lyndj.lambda-url.us-east-1.on.aws/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid RELAY_UPSTREAM_URL {value:?}: {reason}")]
    UpstreamUrl { value: String, reason: String },
    #[error("invalid HOST {0:?}")]
    Host(String),
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub url: Url,
    /// `None` leaves the outbound call unbounded.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub upstream: UpstreamConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match lookup("HOST") {
            Some(value) => value.parse::<IpAddr>().map_err(|_| ConfigError::Host(value))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = parse_or_default(&lookup, "PORT", DEFAULT_PORT);

        let raw_url = lookup("RELAY_UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        let url = parse_upstream_url(&raw_url)?;

        let timeout = lookup("RELAY_UPSTREAM_TIMEOUT_MS").and_then(|value| {
            match value.parse::<u64>() {
                Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
                _ => {
                    warn!("ignoring RELAY_UPSTREAM_TIMEOUT_MS={value:?}, upstream calls will not time out");
                    None
                }
            }
        });

        Ok(Self {
            host,
            port,
            upstream: UpstreamConfig { url, timeout },
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or_default<F>(lookup: &F, key: &str, default: u16) -> u16
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value.parse::<u16>().unwrap_or_else(|_| {
            warn!("ignoring {key}={value:?}, using {default}");
            default
        }),
        None => default,
    }
}

fn parse_upstream_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::UpstreamUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UpstreamUrl {
            value: value.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}
