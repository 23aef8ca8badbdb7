// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::blockchain::ClientError;
use crate::config::ConfigError;

/// Anything that aborts a run. Nothing is recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::Logging(_) => 2,
            AppError::Client(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_distinguished_from_chain_errors() {
        let cfg: AppError = ConfigError::Missing("RPC_HTTP_URL").into();
        assert_eq!(cfg.exit_code(), 2);
        assert_eq!(
            cfg.to_string(),
            "Configuration error: Missing required environment variable RPC_HTTP_URL"
        );

        let rpc: AppError = ClientError::RpcError("connection refused".to_string()).into();
        assert_eq!(rpc.exit_code(), 1);
        assert_eq!(rpc.to_string(), "RPC error: connection refused");
    }
}
