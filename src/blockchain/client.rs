// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ledger client: balance queries, transfers and typed contract dispatch.

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, U256},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, Provider, ProviderBuilder, RootProvider,
    },
    rpc::types::TransactionRequest,
    sol_types::SolCall,
};

use super::amount::Amount;
use super::types::{NetworkConfig, TxHandle, NATIVE_DECIMALS};
use crate::context::ConnectionContext;

/// HTTP provider with the recommended fillers and a signing wallet.
type SigningProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Client for one network, signing with the connection's key.
///
/// Every call is a single request: nothing is retried, and a failed submission
/// means the transaction is not guaranteed to have been applied.
pub struct LedgerClient {
    network: NetworkConfig,
    account: Address,
    provider: SigningProvider,
}

impl LedgerClient {
    /// Build a client from the connection context. No network contact is made.
    pub fn connect(ctx: &ConnectionContext) -> Self {
        let wallet = EthereumWallet::from(ctx.signer().clone());
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(ctx.rpc_url().clone());

        Self {
            network: ctx.network().clone(),
            account: ctx.account(),
            provider,
        }
    }

    /// Client over a mocked transport that replays the asserter's responses.
    #[cfg(test)]
    pub(crate) fn mocked(
        network: NetworkConfig,
        asserter: alloy::transports::mock::Asserter,
    ) -> Self {
        let signer = alloy::signers::local::PrivateKeySigner::from_slice(&[1u8; 32]).unwrap();
        let account = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_mocked_client(asserter);

        Self {
            network,
            account,
            provider,
        }
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Address transactions are signed from.
    pub fn account(&self) -> Address {
        self.account
    }

    /// Get the native balance for an address.
    pub async fn get_balance(&self, address: Address) -> Result<Amount, ClientError> {
        let balance = self
            .provider
            .get_balance(address)
            .await
            .map_err(|e| ClientError::RpcError(e.to_string()))?;

        Ok(Amount::new(balance, NATIVE_DECIMALS))
    }

    /// Get the current block number.
    pub async fn get_block_number(&self) -> Result<u64, ClientError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| ClientError::RpcError(e.to_string()))
    }

    /// Whether contract code is deployed at `address`.
    pub async fn has_code(&self, address: Address) -> Result<bool, ClientError> {
        let code = self
            .provider
            .get_code_at(address)
            .await
            .map_err(|e| ClientError::RpcError(e.to_string()))?;
        Ok(!code.is_empty())
    }

    /// Send native currency. Balance is not checked locally; the node rejects
    /// an unaffordable transfer.
    ///
    /// # Arguments
    /// * `to` - Recipient address
    /// * `amount_wei` - Amount in wei
    pub async fn send_native_transfer(
        &self,
        to: Address,
        amount_wei: U256,
    ) -> Result<TxHandle, ClientError> {
        let tx = TransactionRequest::default().to(to).value(amount_wei);
        tracing::info!(%to, amount = %amount_wei, "Sending native transfer");
        self.send_transaction(tx).await
    }

    /// Read-only contract call through `eth_call`, decoded with the call's ABI.
    pub async fn call_contract<C: SolCall>(
        &self,
        address: Address,
        call: &C,
    ) -> Result<C::Return, ClientError> {
        let tx = TransactionRequest::default()
            .to(address)
            .input(call.abi_encode().into());

        let output = self
            .provider
            .call(tx)
            .await
            .map_err(|e| ClientError::RpcError(format!("{}: {}", C::SIGNATURE, e)))?;

        C::abi_decode_returns(&output)
            .map_err(|e| ClientError::ContractError(format!("{}: {}", C::SIGNATURE, e)))
    }

    /// Signed, state-changing contract call carrying `value` wei.
    pub async fn send_contract<C: SolCall>(
        &self,
        address: Address,
        call: &C,
        value: U256,
    ) -> Result<TxHandle, ClientError> {
        let tx = TransactionRequest::default()
            .to(address)
            .input(call.abi_encode().into())
            .value(value);

        tracing::info!(
            contract = %address,
            method = C::SIGNATURE,
            value = %value,
            "Sending contract transaction"
        );
        self.send_transaction(tx).await
    }

    /// Internal helper to send a transaction and return the hash.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHandle, ClientError> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ClientError::TransactionFailed(format!("Failed to send: {}", e)))?;

        let hash = *pending.tx_hash();
        let explorer_url = self.network.tx_url(&hash);
        tracing::debug!(tx_hash = ?hash, "Transaction submitted");

        Ok(TxHandle { hash, explorer_url })
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("No liquidity pool for {token_a:?}/{token_b:?} at {pair:?}")]
    PairNotFound {
        token_a: Address,
        token_b: Address,
        pair: Address,
    },

    #[error("Insufficient reserves in pair {0:?}")]
    InsufficientReserves(Address),

    #[error("Input amount too small to produce any output")]
    InsufficientInputAmount,
}
