use sleep_config::constants::*;
use sleep_core::constants::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_API_PORT, DEFAULT_REMOTE_URL};
use sleep_core::TransitionPolicy;
use std::env;
use std::net::IpAddr;
use std::num::ParseIntError;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
    #[error("Invalid store backend: {0}")]
    InvalidBackend(String),
    #[error("Invalid mock latency: {0}")]
    InvalidLatency(String),
    #[error("Invalid status policy: {0}")]
    InvalidPolicy(String),
}

/// Where the server keeps the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory, // Seeded, process-local
    Remote, // Another Project Sleep API
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "remote" => Ok(StoreBackend::Remote),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub cors_origin: String,
    pub store_backend: StoreBackend,
    pub remote_url: String,
    pub mock_latency: Duration,
    pub status_policy: TransitionPolicy,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var(SLEEP_API_PORT).or_else(|_| env::var(PORT)) {
            Ok(port_str) => port_str.trim().parse::<u16>()?,
            Err(_) => DEFAULT_API_PORT,
        };

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let host_str = env::var(SLEEP_API_HOST).unwrap_or_else(|_| "127.0.0.1".to_string());
        let host = host_str
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host_str.clone()))?;

        let cors_origin =
            env::var(SLEEP_CORS_ORIGIN).unwrap_or_else(|_| "http://localhost:5173".to_string());

        let store_backend = env::var(SLEEP_STORE_BACKEND)
            .unwrap_or_else(|_| "memory".to_string())
            .parse::<StoreBackend>()?;

        let remote_url =
            env::var(SLEEP_REMOTE_URL).unwrap_or_else(|_| DEFAULT_REMOTE_URL.to_string());

        let latency_str = env::var(SLEEP_MOCK_LATENCY_MS).unwrap_or_else(|_| "0".to_string());
        let mock_latency = latency_str
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidLatency(latency_str.clone()))?;

        let status_policy = match env::var(SLEEP_STATUS_POLICY) {
            Ok(policy) => policy
                .parse::<TransitionPolicy>()
                .map_err(|_| ConfigError::InvalidPolicy(policy.clone()))?,
            Err(_) => TransitionPolicy::default(),
        };

        let admin_email =
            env::var(SLEEP_ADMIN_EMAIL).unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
        let admin_password =
            env::var(SLEEP_ADMIN_PASSWORD).unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());

        // Unset or blank means a fresh token per process
        let admin_token = env::var(SLEEP_ADMIN_TOKEN)
            .ok()
            .filter(|t| !t.trim().is_empty());

        Ok(Config {
            host,
            port,
            cors_origin,
            store_backend,
            remote_url,
            mock_latency,
            status_policy,
            admin_email,
            admin_password,
            admin_token,
        })
    }
}
