use std::{env, net::SocketAddr, time::Duration};

use thiserror::Error;

pub const DEFAULT_SSE_PORT: u16 = 8080;
pub const DEFAULT_HTTP_PORT: u16 = 8081;
pub const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: Option<String>,
    pub bind_addr: String,
    pub bind_port: u16,
    pub sse_keep_alive: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a valid u16")]
    InvalidPort,
    #[error("SSE_KEEP_ALIVE_SECS must be a positive integer")]
    InvalidKeepAlive,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env(default_port: u16) -> Result<Self, ConfigError> {
        Self::from_lookup(default_port, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(default_port: u16, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup("MCP_API_TOKEN")
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        let bind_addr = lookup("BIND_ADDR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        let bind_port = lookup("PORT")
            .map(|value| {
                value
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPort)
            })
            .transpose()?
            .unwrap_or(default_port);
        let keep_alive_secs = lookup("SSE_KEEP_ALIVE_SECS")
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::InvalidKeepAlive)
            })
            .transpose()?
            .unwrap_or(DEFAULT_SSE_KEEP_ALIVE_SECS);

        let config = Self {
            api_token,
            bind_addr,
            bind_port,
            sse_keep_alive: Duration::from_secs(keep_alive_secs),
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}
