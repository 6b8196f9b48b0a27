// src/config.rs
use std::{
    env,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use thiserror::Error;

use crate::services::openai::{DEFAULT_BASE_URL, OpenAiConfig};

/// The persona file is a deployment artifact next to the binary's working dir.
pub const SYSTEM_PROMPT_PATH: &str = "assetiq.txt";

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("invalid CORS origin: {0:?}")]
    InvalidOrigin(String),

    #[error("invalid listen address {0:?}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub model: String,
    pub cors_origins: Vec<String>,
    pub listen_addr: SocketAddr,
    pub system_prompt_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup("OPENAI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "OPENAI_TIMEOUT_SECS",
                expected: "a whole number of seconds",
                value: raw,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                expected: "a port number",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let ip: IpAddr = host
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(host.clone()))?;
        let listen_addr = SocketAddr::new(ip, port);

        let cors_origins = parse_origins(
            &lookup("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        );

        Ok(Self {
            openai: OpenAiConfig {
                api_key: lookup("OPENAI_API_KEY").filter(|key| !key.is_empty()),
                base_url: lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            cors_origins,
            listen_addr,
            system_prompt_path: PathBuf::from(SYSTEM_PROMPT_PATH),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.listen_addr, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(config.openai.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.openai.timeout, Duration::from_secs(600));
        assert!(config.openai.api_key.is_none());
        assert_eq!(config.system_prompt_path, PathBuf::from("assetiq.txt"));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = config_from(&[(
            "CORS_ORIGINS",
            "http://localhost:3000, https://app.finmatrix.io ,,",
        )])
        .unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "https://app.finmatrix.io"]
        );
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = config_from(&[("OPENAI_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("OPENAI_TIMEOUT_SECS"));
    }

    #[test]
    fn ipv6_host_is_accepted() {
        let config = config_from(&[("HOST", "::"), ("PORT", "9000")]).unwrap();
        assert_eq!(config.listen_addr, "[::]:9000".parse().unwrap());

        let err = config_from(&[("HOST", "not an address")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress(_)));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let config = config_from(&[("OPENAI_API_KEY", "")]).unwrap();
        assert!(config.openai.api_key.is_none());
    }
}
