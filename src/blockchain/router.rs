// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Uniswap V2 Router02 adapter.

use alloy::{primitives::Address, sol};

use super::client::{ClientError, LedgerClient};
use super::swap::SwapParams;
use super::types::TxHandle;

sol! {
    interface IUniswapV2Router02 {
        function swapExactETHForTokens(
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external payable returns (uint256[] memory amounts);
    }
}

/// Router contract bound to the network's router address.
pub struct ExchangeRouter<'a> {
    client: &'a LedgerClient,
    address: Address,
}

impl<'a> ExchangeRouter<'a> {
    /// Router of the client's network.
    pub fn new(client: &'a LedgerClient) -> Self {
        let address = client.network().router;
        Self { client, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Swap exactly `params.value` wei for as many tokens as possible along
    /// `params.path`, reverting below `params.amount_out_min` or after
    /// `params.deadline`.
    pub async fn swap_exact_eth_for_tokens(
        &self,
        params: &SwapParams,
    ) -> Result<TxHandle, ClientError> {
        self.client
            .send_contract(self.address, &params.to_call(), params.value)
            .await
    }
}
