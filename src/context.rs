// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Immutable connection context shared by every component.

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use url::Url;

use crate::blockchain::signing::{signer_from_hex, signer_from_pem};
use crate::blockchain::NetworkConfig;
use crate::config::{Config, ConfigError, KeySource, PRIVATE_KEY_PEM_FILE_ENV};

/// Network identity, RPC endpoint and signing credential.
///
/// Built once at startup and passed by reference. The account address is
/// always derived from the signing key; a configured address is only
/// cross-checked against it.
#[derive(Debug, Clone)]
pub struct ConnectionContext {
    network: NetworkConfig,
    rpc_url: Url,
    signer: PrivateKeySigner,
}

impl ConnectionContext {
    /// Decode the key and build the context. Fails before any network contact.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let signer = match &config.key {
            KeySource::Hex(hex) => signer_from_hex(hex.expose_secret())?,
            KeySource::PemFile(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    ConfigError::InvalidValue(
                        PRIVATE_KEY_PEM_FILE_ENV,
                        format!("{}: {}", path.display(), e),
                    )
                })?;
                signer_from_pem(&bytes)?
            }
        };

        if let Some(expected) = config.account {
            if expected != signer.address() {
                return Err(ConfigError::AccountMismatch {
                    configured: expected,
                    derived: signer.address(),
                });
            }
        }

        Ok(Self {
            network: config.network.clone(),
            rpc_url: config.rpc_url.clone(),
            signer,
        })
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Address derived from the signing key.
    pub fn account(&self) -> Address {
        self.signer.address()
    }
}
