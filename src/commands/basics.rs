// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account basics: native balance, unit conversion and chain height.

use crate::blockchain::{Amount, ClientError, LedgerClient};

pub async fn run(client: &LedgerClient) -> Result<(), ClientError> {
    let account = client.account();
    println!("Account : {account}");

    let balance = client.get_balance(account).await?;
    println!("ETH Balance (wei): {}", balance.value);
    println!("ETH Balance : {balance}");

    let one = Amount::parse_ether("1.0")?;
    println!("ETH to Wei Conversion: {}", one.value);

    let block_number = client.get_block_number().await?;
    println!("Block Number : {block_number}");

    Ok(())
}
