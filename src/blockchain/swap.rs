// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Swap parameter builder.
//!
//! Turns "swap this much native currency for that token" into the exact
//! arguments of `swapExactETHForTokens`:
//!
//! 1. Resolve WETH for the network and fetch the target token.
//! 2. Fetch the direct WETH/token pair; a missing or empty pool is fatal.
//! 3. Quote an exact-input trade over that single hop.
//! 4. Derive the minimum output, the path and the deadline.
//!
//! Nothing here writes to the chain. Submitting is left to
//! [`ExchangeRouter`](super::router::ExchangeRouter).

use std::time::Duration;

use alloy::primitives::{Address, U256};

use super::amount::{to_hex_quantity, Amount};
use super::client::ClientError;
use super::pair::{Fetcher, Pair};
use super::router::IUniswapV2Router02;
use super::trade::{Route, Slippage, Trade};
use super::types::{NetworkConfig, Token};

/// Deadline horizon used when none is given.
pub const DEFAULT_DEADLINE_HORIZON: Duration = Duration::from_secs(20 * 60);

/// Read access to token and pool data.
#[allow(async_fn_in_trait)]
pub trait MarketData {
    async fn token(&self, address: Address) -> Result<Token, ClientError>;

    async fn pair(&self, token_a: &Token, token_b: &Token) -> Result<Pair, ClientError>;
}

impl MarketData for Fetcher<'_> {
    async fn token(&self, address: Address) -> Result<Token, ClientError> {
        self.fetch_token(address).await
    }

    async fn pair(&self, token_a: &Token, token_b: &Token) -> Result<Pair, ClientError> {
        self.fetch_pair(token_a, token_b).await
    }
}

/// What the caller wants to swap.
#[derive(Debug, Clone)]
pub struct SwapRequest {
    /// Token to buy
    pub token: Address,
    /// Native input in wei
    pub amount_in: U256,
    pub slippage: Slippage,
    /// Receiver of the bought tokens
    pub recipient: Address,
    pub deadline_horizon: Duration,
}

/// Arguments for one `swapExactETHForTokens` call.
#[derive(Debug, Clone)]
pub struct SwapParams {
    pub amount_out_min: U256,
    /// `[WETH, token]`
    pub path: Vec<Address>,
    pub to: Address,
    /// Unix seconds
    pub deadline: U256,
    /// Wei attached to the transaction
    pub value: U256,
    /// Output quoted at current reserves
    pub expected_out: Amount,
    pub price_impact_bps: U256,
    pub token: Token,
}

impl SwapParams {
    pub fn to_call(&self) -> IUniswapV2Router02::swapExactETHForTokensCall {
        IUniswapV2Router02::swapExactETHForTokensCall {
            amountOutMin: self.amount_out_min,
            path: self.path.clone(),
            to: self.to,
            deadline: self.deadline,
        }
    }

    pub fn amount_out_min_hex(&self) -> String {
        to_hex_quantity(self.amount_out_min)
    }

    pub fn deadline_hex(&self) -> String {
        to_hex_quantity(self.deadline)
    }

    pub fn value_hex(&self) -> String {
        to_hex_quantity(self.value)
    }
}

/// `now + horizon` in whole seconds.
pub fn deadline_after(now_unix_secs: u64, horizon: Duration) -> U256 {
    U256::from(now_unix_secs) + U256::from(horizon.as_secs())
}

/// Current Unix time in seconds.
pub fn unix_now() -> u64 {
    // Clamp pre-epoch clocks to zero
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

/// Compute swap parameters for `request` at time `now_unix_secs`.
pub async fn plan_swap<M: MarketData>(
    market: &M,
    network: &NetworkConfig,
    request: &SwapRequest,
    now_unix_secs: u64,
) -> Result<SwapParams, ClientError> {
    let weth = network.wrapped_native();
    let token = market.token(request.token).await?;
    if token == weth {
        return Err(ClientError::InvalidRoute(
            "cannot swap native currency for WETH through the router".to_string(),
        ));
    }

    let pair = market.pair(&weth, &token).await?;
    let route = Route::new(vec![pair], weth)?;
    let trade = Trade::exact_input(route, request.amount_in)?;

    let amount_out_min = trade.minimum_amount_out(&request.slippage);
    let deadline = deadline_after(now_unix_secs, request.deadline_horizon);
    let path = trade.route().path_addresses();

    tracing::debug!(
        token = %token.address,
        expected_out = %trade.output_amount(),
        amount_out_min = %amount_out_min,
        slippage = %request.slippage,
        deadline = %deadline,
        "Planned swap"
    );

    Ok(SwapParams {
        amount_out_min,
        path,
        to: request.recipient,
        deadline,
        value: trade.input_amount().value,
        expected_out: trade.output_amount(),
        price_impact_bps: trade.price_impact_bps(),
        token,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::blockchain::pair::tests::DAI;
    use crate::blockchain::trade::DEFAULT_SLIPPAGE;
    use crate::blockchain::types::ETH_RINKEBY;
    use alloy::primitives::address;

    const RECIPIENT: Address = address!("e7ed092D58f9065BD3675f5Ea82a37105Fb66681");
    const NOW: u64 = 1_700_000_000;

    /// In-memory market keyed by token address.
    struct FakeMarket {
        tokens: HashMap<Address, Token>,
        reserves: HashMap<Address, (U256, U256)>,
    }

    impl FakeMarket {
        /// One WETH/token pool with the given (weth, token) reserves.
        fn with_pool(token: Address, weth_reserve: U256, token_reserve: U256) -> Self {
            let mut tokens = HashMap::new();
            tokens.insert(token, Token::new(ETH_RINKEBY.chain_id, token, 18));
            let mut reserves = HashMap::new();
            reserves.insert(token, (weth_reserve, token_reserve));
            Self { tokens, reserves }
        }
    }

    impl MarketData for FakeMarket {
        async fn token(&self, address: Address) -> Result<Token, ClientError> {
            if address == ETH_RINKEBY.weth {
                return Ok(ETH_RINKEBY.wrapped_native());
            }
            self.tokens
                .get(&address)
                .cloned()
                .ok_or_else(|| ClientError::ContractError("no such token".to_string()))
        }

        async fn pair(&self, token_a: &Token, token_b: &Token) -> Result<Pair, ClientError> {
            let other = if token_a.address == ETH_RINKEBY.weth {
                token_b
            } else {
                token_a
            };
            let pair_not_found = || ClientError::PairNotFound {
                token_a: token_a.address,
                token_b: token_b.address,
                pair: Address::ZERO,
            };
            let (weth_reserve, token_reserve) =
                *self.reserves.get(&other.address).ok_or_else(pair_not_found)?;
            Ok(Pair::new(
                &ETH_RINKEBY,
                (ETH_RINKEBY.wrapped_native(), weth_reserve),
                (other.clone(), token_reserve),
            ))
        }
    }

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
    }

    fn request(token: Address, amount: &str) -> SwapRequest {
        SwapRequest {
            token,
            amount_in: Amount::parse_ether(amount).unwrap().value,
            slippage: DEFAULT_SLIPPAGE,
            recipient: RECIPIENT,
            deadline_horizon: DEFAULT_DEADLINE_HORIZON,
        }
    }

    #[tokio::test]
    async fn plans_native_to_token_swap() {
        let market = FakeMarket::with_pool(DAI, ether(100), ether(200_000));
        let params = plan_swap(&market, &ETH_RINKEBY, &request(DAI, "0.001"), NOW)
            .await
            .unwrap();

        assert_eq!(params.value, U256::from(1_000_000_000_000_000u64));
        assert_eq!(params.value_hex(), "0x038d7ea4c68000");
        assert_eq!(params.path, vec![ETH_RINKEBY.weth, DAI]);
        assert_eq!(params.to, RECIPIENT);
        assert_eq!(params.deadline, U256::from(NOW + 1_200));

        let expected = params.expected_out.value;
        assert!(expected > U256::ZERO);
        assert_eq!(
            params.amount_out_min,
            expected * U256::from(1_000u64) / U256::from(11_000u64)
        );
        assert!(params.amount_out_min < expected);
    }

    #[tokio::test]
    async fn call_carries_planned_arguments() {
        let market = FakeMarket::with_pool(DAI, ether(100), ether(200_000));
        let params = plan_swap(&market, &ETH_RINKEBY, &request(DAI, "0.001"), NOW)
            .await
            .unwrap();
        let call = params.to_call();

        assert_eq!(call.amountOutMin, params.amount_out_min);
        assert_eq!(call.path, vec![ETH_RINKEBY.weth, DAI]);
        assert_eq!(call.to, RECIPIENT);
        assert_eq!(call.deadline, params.deadline);
    }

    #[tokio::test]
    async fn empty_pool_fails_before_any_write() {
        let market = FakeMarket::with_pool(DAI, U256::ZERO, U256::ZERO);
        let result = plan_swap(&market, &ETH_RINKEBY, &request(DAI, "0.001"), NOW).await;
        assert!(matches!(result, Err(ClientError::InsufficientReserves(_))));
    }

    #[tokio::test]
    async fn missing_pool_is_fatal() {
        let other = address!("9A9410d7d6a59C970F45C19404902D2093e97D66");
        let mut market = FakeMarket::with_pool(DAI, ether(1), ether(1));
        market
            .tokens
            .insert(other, Token::new(ETH_RINKEBY.chain_id, other, 18));

        let result = plan_swap(&market, &ETH_RINKEBY, &request(other, "0.001"), NOW).await;
        assert!(matches!(result, Err(ClientError::PairNotFound { .. })));
    }

    #[tokio::test]
    async fn weth_target_is_rejected() {
        let market = FakeMarket::with_pool(DAI, ether(1), ether(1));
        let result = plan_swap(&market, &ETH_RINKEBY, &request(ETH_RINKEBY.weth, "1"), NOW).await;
        assert!(matches!(result, Err(ClientError::InvalidRoute(_))));
    }

    #[test]
    fn deadline_is_now_plus_horizon() {
        assert_eq!(
            deadline_after(NOW, DEFAULT_DEADLINE_HORIZON),
            U256::from(NOW + 20 * 60)
        );
        assert_eq!(deadline_after(0, Duration::from_secs(90)), U256::from(90u64));
        assert!(unix_now() > NOW);
    }
}
