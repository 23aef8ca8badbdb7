// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Native-for-token swap through the Uniswap V2 router.

use std::time::Duration;

use alloy::primitives::{Address, U256};

use crate::blockchain::pair::Fetcher;
use crate::blockchain::router::ExchangeRouter;
use crate::blockchain::swap::{plan_swap, unix_now, SwapParams, SwapRequest};
use crate::blockchain::trade::Slippage;
use crate::blockchain::{Amount, ClientError, LedgerClient, TxHandle, NATIVE_DECIMALS};

/// Swap options as given on the command line.
#[derive(Debug, Clone)]
pub struct SwapOptions {
    pub token: Address,
    /// Decimal ether
    pub amount: String,
    pub slippage: Slippage,
    pub deadline: Duration,
    /// Defaults to the signing account
    pub recipient: Option<Address>,
    /// Print parameters without submitting
    pub dry_run: bool,
}

/// Plan the swap, print its parameters and submit it unless `dry_run`.
pub async fn run(
    client: &LedgerClient,
    options: &SwapOptions,
) -> Result<Option<TxHandle>, ClientError> {
    let request = SwapRequest {
        token: options.token,
        amount_in: Amount::parse_ether(&options.amount)?.value,
        slippage: options.slippage,
        recipient: options.recipient.unwrap_or_else(|| client.account()),
        deadline_horizon: options.deadline,
    };

    let fetcher = Fetcher::new(client);
    let params = plan_swap(&fetcher, client.network(), &request, unix_now()).await?;
    let router = ExchangeRouter::new(client);
    println!("Router : {}", router.address());
    print_params(&params, &options.slippage);

    if options.dry_run {
        println!("Dry run: transaction not submitted");
        return Ok(None);
    }

    let handle = router.swap_exact_eth_for_tokens(&params).await?;
    println!("Swap Transaction Hash : {:?}", handle.hash);
    println!("Explorer : {}", handle.explorer_url);
    Ok(Some(handle))
}

fn print_params(params: &SwapParams, slippage: &Slippage) {
    let symbol = params.token.display_symbol();
    println!(
        "Token : {} ({})",
        params.token.name.as_deref().unwrap_or(symbol.as_str()),
        params.token.address
    );
    println!("Swap : {} ETH -> {}", Amount::new(params.value, NATIVE_DECIMALS), symbol);
    println!("Expected output : {} {}", params.expected_out, symbol);
    println!(
        "Minimum output : {} {} (slippage {})",
        Amount::new(params.amount_out_min, params.token.decimals),
        symbol,
        slippage
    );
    println!("Price impact : {}", format_bps(params.price_impact_bps));
    println!("amountOutMin : {}", params.amount_out_min_hex());
    println!(
        "path : [{}]",
        params
            .path
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("to : {}", params.to);
    println!("deadline : {}", params.deadline_hex());
    println!("value : {}", params.value_hex());
}

/// Basis points as a percentage with two decimals.
fn format_bps(bps: U256) -> String {
    let hundred = U256::from(100u64);
    format!("{}.{:0>2}%", bps / hundred, (bps % hundred).to_string())
}
