// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Native and ERC-20 transfers.

use alloy::primitives::Address;

use crate::blockchain::erc20::TokenContract;
use crate::blockchain::{Amount, ClientError, LedgerClient, TxHandle};

/// Send `amount` (decimal ether) to `to`.
pub async fn transfer_native(
    client: &LedgerClient,
    to: Address,
    amount: &str,
) -> Result<TxHandle, ClientError> {
    let amount = Amount::parse_ether(amount)?;
    let handle = client.send_native_transfer(to, amount.value).await?;

    println!("Transfer Hash : {:?}", handle.hash);
    println!("Explorer : {}", handle.explorer_url);
    Ok(handle)
}

/// Print the account's token balance, then send `amount` tokens to `to`.
///
/// `amount` is scaled by `decimals` here; the token adapter takes smallest
/// units only.
pub async fn transfer_token(
    client: &LedgerClient,
    token: Address,
    to: Address,
    amount: &str,
    decimals: u8,
) -> Result<TxHandle, ClientError> {
    let contract = TokenContract::new(client, token);

    let balance = contract.balance(client.account(), decimals).await?;
    println!("Token Balance : {}", balance.value);
    println!("Token Balance in decimal : {balance}");

    let amount = Amount::parse(amount, decimals)?;
    let handle = contract.transfer(to, amount.value).await?;

    println!("Token transfer Hash : {:?}", handle.hash);
    println!("Explorer : {}", handle.explorer_url);
    Ok(handle)
}
