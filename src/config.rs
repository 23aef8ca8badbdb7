// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup. A `.env` file
//! in the working directory is loaded first when present.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `NETWORK` | Network name or chain id | `rinkeby` |
//! | `RPC_HTTP_URL` | JSON-RPC HTTP endpoint | Required |
//! | `PRIVATE_KEY` | Hex private key (optional `0x`) | One of the key variables is required |
//! | `PRIVATE_KEY_PEM_FILE` | Path to a SEC1/PKCS#8 PEM key | One of the key variables is required |
//! | `ACCOUNT_ADDRESS` | Expected account; must match the key | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use alloy::primitives::Address;
use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::blockchain::signing::KeyError;
use crate::blockchain::{NetworkConfig, DEFAULT_NETWORK};

pub const NETWORK_ENV: &str = "NETWORK";
pub const RPC_HTTP_URL_ENV: &str = "RPC_HTTP_URL";
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";
pub const PRIVATE_KEY_PEM_FILE_ENV: &str = "PRIVATE_KEY_PEM_FILE";
pub const ACCOUNT_ADDRESS_ENV: &str = "ACCOUNT_ADDRESS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default `RUST_LOG` filter.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue(LOG_FORMAT_ENV, other.to_string())),
        }
    }
}

/// A string that is redacted in debug output and zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
    inner: String,
}

impl SecretString {
    pub fn new(secret: String) -> Self {
        Self { inner: secret }
    }

    /// Expose the secret value.
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

/// Where the signing key comes from.
#[derive(Debug, Clone)]
pub enum KeySource {
    Hex(SecretString),
    PemFile(PathBuf),
}

/// Startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub network: NetworkConfig,
    pub rpc_url: Url,
    pub key: KeySource,
    /// Optional expected account, cross-checked against the key's address
    pub account: Option<Address>,
    pub log_format: LogFormat,
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let network_name = get(NETWORK_ENV).unwrap_or_else(|| DEFAULT_NETWORK.to_string());
        let network = NetworkConfig::lookup(&network_name)
            .ok_or(ConfigError::UnsupportedNetwork(network_name))?;

        let raw_url = get(RPC_HTTP_URL_ENV).ok_or(ConfigError::Missing(RPC_HTTP_URL_ENV))?;
        let rpc_url = Url::parse(raw_url.trim())
            .map_err(|e| ConfigError::InvalidValue(RPC_HTTP_URL_ENV, e.to_string()))?;

        let key = match (get(PRIVATE_KEY_ENV), get(PRIVATE_KEY_PEM_FILE_ENV)) {
            (Some(hex), None) => KeySource::Hex(SecretString::new(hex)),
            (None, Some(path)) => KeySource::PemFile(PathBuf::from(path)),
            (Some(_), Some(_)) => {
                return Err(ConfigError::InvalidValue(
                    PRIVATE_KEY_ENV,
                    format!("set only one of {PRIVATE_KEY_ENV} and {PRIVATE_KEY_PEM_FILE_ENV}"),
                ))
            }
            (None, None) => return Err(ConfigError::Missing(PRIVATE_KEY_ENV)),
        };

        let account = get(ACCOUNT_ADDRESS_ENV)
            .map(|raw| {
                Address::from_str(raw.trim())
                    .map_err(|e| ConfigError::InvalidValue(ACCOUNT_ADDRESS_ENV, e.to_string()))
            })
            .transpose()?;

        let log_format = get(LOG_FORMAT_ENV)
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            network,
            rpc_url,
            key,
            account,
            log_format,
        })
    }
}

/// Configuration errors. All of them abort before any network contact.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Unsupported network `{0}`")]
    UnsupportedNetwork(String),

    #[error("Invalid private key: {0}")]
    InvalidKey(#[from] KeyError),

    #[error("ACCOUNT_ADDRESS {configured} does not match the key's address {derived}")]
    AccountMismatch {
        configured: Address,
        derived: Address,
    },
}
