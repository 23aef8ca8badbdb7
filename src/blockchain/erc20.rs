// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ERC-20 token contract interactions.

use alloy::{
    primitives::{Address, U256},
    sol,
};

use super::amount::Amount;
use super::client::{ClientError, LedgerClient};
use super::types::{Token, TxHandle};

// Define the ERC-20 interface using alloy's sol! macro
sol! {
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

/// ERC-20 contract bound to one token address.
pub struct TokenContract<'a> {
    client: &'a LedgerClient,
    address: Address,
}

impl<'a> TokenContract<'a> {
    pub fn new(client: &'a LedgerClient, address: Address) -> Self {
        Self { client, address }
    }

    /// Get the token decimals.
    pub async fn decimals(&self) -> Result<u8, ClientError> {
        self.client
            .call_contract(self.address, &IERC20::decimalsCall {})
            .await
    }

    /// Get the token symbol.
    pub async fn symbol(&self) -> Result<String, ClientError> {
        self.client
            .call_contract(self.address, &IERC20::symbolCall {})
            .await
    }

    /// Get the token name.
    pub async fn name(&self) -> Result<String, ClientError> {
        self.client
            .call_contract(self.address, &IERC20::nameCall {})
            .await
    }

    /// Raw balance of `owner` in the token's smallest unit.
    pub async fn balance_of(&self, owner: Address) -> Result<U256, ClientError> {
        self.client
            .call_contract(self.address, &IERC20::balanceOfCall { account: owner })
            .await
    }

    /// Balance of `owner` scaled by `decimals`.
    pub async fn balance(&self, owner: Address, decimals: u8) -> Result<Amount, ClientError> {
        Ok(Amount::new(self.balance_of(owner).await?, decimals))
    }

    /// Transfer `amount` smallest units to `to`.
    ///
    /// The amount must already be scaled by the token's decimals. Balance is
    /// not checked locally; the contract rejects an unaffordable transfer.
    pub async fn transfer(&self, to: Address, amount: U256) -> Result<TxHandle, ClientError> {
        let call = IERC20::transferCall { to, amount };
        self.client.send_contract(self.address, &call, U256::ZERO).await
    }

    /// Fetch a token descriptor. `decimals` is required; symbol and name are
    /// optional on ERC-20 and fall back to `None`.
    pub async fn descriptor(&self) -> Result<Token, ClientError> {
        let decimals = self.decimals().await?;

        let symbol = match self.symbol().await {
            Ok(symbol) => Some(symbol),
            Err(e) => {
                tracing::warn!(token = %self.address, "Token symbol unavailable: {}", e);
                None
            }
        };
        let name = match self.name().await {
            Ok(name) => Some(name),
            Err(e) => {
                tracing::warn!(token = %self.address, "Token name unavailable: {}", e);
                None
            }
        };

        Ok(Token {
            chain_id: self.client.network().chain_id,
            address: self.address,
            decimals,
            symbol,
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::types::ETH_MAINNET;
    use alloy::{
        primitives::{address, hex, Bytes},
        sol_types::SolCall,
        transports::mock::Asserter,
    };

    #[test]
    fn transfer_call_encoding() {
        let call = IERC20::transferCall {
            to: address!("e7ed092D58f9065BD3675f5Ea82a37105Fb66681"),
            amount: Amount::parse("4.0", 18).unwrap().value,
        };
        let data = call.abi_encode();

        // transfer(address,uint256)
        assert_eq!(&data[..4], &hex!("a9059cbb"));
        assert_eq!(data.len(), 4 + 32 + 32);
        assert_eq!(
            U256::from_be_slice(&data[36..68]),
            U256::from(4_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn balance_of_selector() {
        assert_eq!(IERC20::balanceOfCall::SELECTOR, hex!("70a08231"));
        assert_eq!(IERC20::decimalsCall::SELECTOR, hex!("313ce567"));
    }

    #[tokio::test]
    async fn descriptor_tolerates_missing_metadata() {
        let asserter = Asserter::new();
        let client = LedgerClient::mocked(ETH_MAINNET, asserter.clone());
        let usdc = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

        // decimals() succeeds, symbol() and name() revert
        asserter.push_success(&Bytes::from(U256::from(6u64).to_be_bytes::<32>().to_vec()));
        asserter.push_failure_msg("execution reverted");
        asserter.push_failure_msg("execution reverted");

        let token = TokenContract::new(&client, usdc).descriptor().await.unwrap();
        assert_eq!(token.decimals, 6);
        assert_eq!(token.chain_id, 1);
        assert!(token.symbol.is_none());
        assert!(token.name.is_none());
        assert_eq!(token.display_symbol(), format!("{:?}", usdc));
    }
}
