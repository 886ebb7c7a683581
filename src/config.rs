use std::net::SocketAddr;

use thiserror::Error;

use crate::pipeline::extraction::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::report::DEFAULT_GENERATED_BY;
use crate::session::{RemovalPolicy, DEFAULT_WORKERS};

/// Application-level constants
pub const APP_NAME: &str = "BoasVindas";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address for the HTTP API.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default per-file upload limit, in megabytes.
pub const DEFAULT_MAX_FILE_MB: usize = 20;

/// Extraction requests can take minutes for long scanned documents.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "boasvindas_lib=info,boasvindas=info,tower_http=warn"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Runtime settings, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub bind_addr: SocketAddr,
    pub max_file_bytes: usize,
    pub workers: usize,
    pub removal_policy: RemovalPolicy,
    pub generated_by: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_file_bytes: DEFAULT_MAX_FILE_MB * 1024 * 1024,
            workers: DEFAULT_WORKERS,
            removal_policy: RemovalPolicy::default(),
            generated_by: DEFAULT_GENERATED_BY.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        config.gemini_api_key = get("GEMINI_API_KEY");
        if let Some(model) = get("GEMINI_MODEL") {
            config.gemini_model = model;
        }
        if let Some(url) = get("GEMINI_BASE_URL") {
            config.gemini_base_url = url;
        }
        if let Some(addr) = get("BOASVINDAS_BIND") {
            config.bind_addr = addr.parse().map_err(|_| ConfigError::Invalid {
                var: "BOASVINDAS_BIND",
                value: addr.clone(),
            })?;
        }
        if let Some(mb) = get("BOASVINDAS_MAX_FILE_MB") {
            let parsed: usize = parse_positive("BOASVINDAS_MAX_FILE_MB", &mb)?;
            config.max_file_bytes = parsed * 1024 * 1024;
        }
        if let Some(workers) = get("BOASVINDAS_WORKERS") {
            config.workers = parse_positive("BOASVINDAS_WORKERS", &workers)?;
        }
        if let Some(policy) = get("BOASVINDAS_REMOVAL_POLICY") {
            config.removal_policy = policy.parse().map_err(|_| ConfigError::Invalid {
                var: "BOASVINDAS_REMOVAL_POLICY",
                value: policy.clone(),
            })?;
        }
        if let Some(by) = get("BOASVINDAS_GENERATED_BY") {
            config.generated_by = by;
        }
        if let Some(secs) = get("BOASVINDAS_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs =
                parse_positive::<u64>("BOASVINDAS_REQUEST_TIMEOUT_SECS", &secs)?;
        }

        Ok(config)
    }
}

fn parse_positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
        }),
    }
}
