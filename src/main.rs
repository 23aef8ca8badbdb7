// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use evm_swap_client::blockchain::swap::DEFAULT_DEADLINE_HORIZON;
use evm_swap_client::blockchain::trade::{Slippage, DEFAULT_SLIPPAGE};
use evm_swap_client::blockchain::LedgerClient;
use evm_swap_client::commands::{self, parse_address, swap::SwapOptions};
use evm_swap_client::config::Config;
use evm_swap_client::context::ConnectionContext;
use evm_swap_client::error::AppError;
use evm_swap_client::logging::init_tracing;

#[derive(Parser)]
#[command(name = "evm-swap-client")]
#[command(about = "Balances, transfers and Uniswap V2 swaps on EVM networks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show native balance, a unit conversion and the block number
    Basics,
    /// Send native currency
    TransferEth {
        #[arg(long)]
        to: String,
        /// Decimal amount, e.g. 0.1
        #[arg(long)]
        amount: String,
    },
    /// Show token balance and send ERC-20 tokens
    TransferToken {
        #[arg(long)]
        token: String,
        #[arg(long)]
        to: String,
        /// Decimal amount, e.g. 4.0
        #[arg(long)]
        amount: String,
        #[arg(long, default_value_t = 18)]
        decimals: u8,
    },
    /// Swap native currency for a token through the Uniswap V2 router
    Swap {
        #[arg(long)]
        token: String,
        /// Decimal ether to spend, e.g. 0.001
        #[arg(long)]
        amount: String,
        /// Slippage ratio numerator (ratio, not percent: 5/1000 is 0.5%)
        #[arg(long, default_value_t = DEFAULT_SLIPPAGE.numerator())]
        slippage_numerator: u64,
        #[arg(long, default_value_t = DEFAULT_SLIPPAGE.denominator())]
        slippage_denominator: u64,
        #[arg(long, default_value_t = DEFAULT_DEADLINE_HORIZON.as_secs() / 60)]
        deadline_minutes: u64,
        /// Token receiver; defaults to the signing account
        #[arg(long)]
        recipient: Option<String>,
        /// Print the parameters without submitting
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_env()?;
    init_tracing(config.log_format)?;

    let ctx = ConnectionContext::from_config(&config)?;
    tracing::info!(
        network = ctx.network().name,
        chain_id = ctx.network().chain_id,
        account = %ctx.account(),
        "Connection ready"
    );
    let client = LedgerClient::connect(&ctx);

    match cli.command {
        Commands::Basics => commands::basics::run(&client).await?,
        Commands::TransferEth { to, amount } => {
            let to = parse_address(&to)?;
            commands::transfer::transfer_native(&client, to, &amount).await?;
        }
        Commands::TransferToken {
            token,
            to,
            amount,
            decimals,
        } => {
            let token = parse_address(&token)?;
            let to = parse_address(&to)?;
            commands::transfer::transfer_token(&client, token, to, &amount, decimals).await?;
        }
        Commands::Swap {
            token,
            amount,
            slippage_numerator,
            slippage_denominator,
            deadline_minutes,
            recipient,
            dry_run,
        } => {
            let options = SwapOptions {
                token: parse_address(&token)?,
                amount,
                slippage: Slippage::new(slippage_numerator, slippage_denominator)?,
                deadline: Duration::from_secs(deadline_minutes.saturating_mul(60)),
                recipient: recipient.as_deref().map(parse_address).transpose()?,
                dry_run,
            };
            commands::swap::run(&client, &options).await?;
        }
    }

    Ok(())
}
