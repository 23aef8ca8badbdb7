// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Uniswap V2 liquidity pairs.

use alloy::{
    primitives::{keccak256, Address, B256, U256},
    sol,
};

use super::client::{ClientError, LedgerClient};
use super::erc20::TokenContract;
use super::types::{NetworkConfig, Token};

sol! {
    interface IUniswapV2Pair {
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
    }
}

/// Fee numerator applied to the input amount (0.3% fee).
const FEE_NUMERATOR: u64 = 997;
const FEE_DENOMINATOR: u64 = 1000;

/// Address of the pair contract for two tokens.
///
/// Pairs are deployed by the factory with CREATE2, salted by the sorted token
/// addresses, so the address is known without a network read.
pub fn pair_address(factory: Address, init_code_hash: B256, a: Address, b: Address) -> Address {
    let (token0, token1) = if a < b { (a, b) } else { (b, a) };
    let salt = keccak256([token0.as_slice(), token1.as_slice()].concat());
    factory.create2(salt.0, init_code_hash.0)
}

/// A pool with its current reserves. `token0` always sorts before `token1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub address: Address,
    pub token0: Token,
    pub token1: Token,
    pub reserve0: U256,
    pub reserve1: U256,
}

impl Pair {
    /// Build a pair from two tokens and their reserves, in any order.
    pub fn new(
        network: &NetworkConfig,
        (token_a, reserve_a): (Token, U256),
        (token_b, reserve_b): (Token, U256),
    ) -> Self {
        let address = pair_address(
            network.factory,
            network.pair_init_code_hash,
            token_a.address,
            token_b.address,
        );
        if token_a.sorts_before(&token_b) {
            Self {
                address,
                token0: token_a,
                token1: token_b,
                reserve0: reserve_a,
                reserve1: reserve_b,
            }
        } else {
            Self {
                address,
                token0: token_b,
                token1: token_a,
                reserve0: reserve_b,
                reserve1: reserve_a,
            }
        }
    }

    /// Build a pair from two tokens in any order and the reserves as the pair
    /// contract reports them (`reserve0` belongs to the lower address).
    pub fn from_reserves(
        network: &NetworkConfig,
        token_a: Token,
        token_b: Token,
        reserve0: U256,
        reserve1: U256,
    ) -> Self {
        let (reserve_a, reserve_b) = if token_a.sorts_before(&token_b) {
            (reserve0, reserve1)
        } else {
            (reserve1, reserve0)
        };
        Self::new(network, (token_a, reserve_a), (token_b, reserve_b))
    }

    pub fn involves(&self, token: &Token) -> bool {
        *token == self.token0 || *token == self.token1
    }

    /// The token on the other side of `token`.
    pub fn other(&self, token: &Token) -> &Token {
        if *token == self.token0 {
            &self.token1
        } else {
            &self.token0
        }
    }

    /// Reserves ordered as (input side, output side).
    pub fn reserves_for(&self, token_in: &Token) -> (U256, U256) {
        if *token_in == self.token0 {
            (self.reserve0, self.reserve1)
        } else {
            (self.reserve1, self.reserve0)
        }
    }

    /// Output received for `amount_in` of `token_in` at current reserves,
    /// after the pool fee.
    pub fn output_amount(&self, token_in: &Token, amount_in: U256) -> Result<U256, ClientError> {
        if !self.involves(token_in) {
            return Err(ClientError::InvalidRoute(format!(
                "{:?} is not in pair {:?}",
                token_in.address, self.address
            )));
        }

        let (reserve_in, reserve_out) = self.reserves_for(token_in);
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(ClientError::InsufficientReserves(self.address));
        }

        let overflow = || ClientError::InvalidAmount("Amount overflow".to_string());
        let amount_in_with_fee = amount_in
            .checked_mul(U256::from(FEE_NUMERATOR))
            .ok_or_else(overflow)?;
        let numerator = amount_in_with_fee
            .checked_mul(reserve_out)
            .ok_or_else(overflow)?;
        let denominator = reserve_in
            .checked_mul(U256::from(FEE_DENOMINATOR))
            .and_then(|d| d.checked_add(amount_in_with_fee))
            .ok_or_else(overflow)?;

        let output = numerator / denominator;
        if output.is_zero() {
            return Err(ClientError::InsufficientInputAmount);
        }
        Ok(output)
    }
}

/// Reads token and pair data from the network.
pub struct Fetcher<'a> {
    client: &'a LedgerClient,
}

impl<'a> Fetcher<'a> {
    pub fn new(client: &'a LedgerClient) -> Self {
        Self { client }
    }

    /// Token descriptor by contract address.
    pub async fn fetch_token(&self, address: Address) -> Result<Token, ClientError> {
        let network = self.client.network();
        if address == network.weth {
            return Ok(network.wrapped_native());
        }
        TokenContract::new(self.client, address).descriptor().await
    }

    /// Pair and current reserves for two tokens.
    ///
    /// Fails with [`ClientError::PairNotFound`] if no pool is deployed.
    pub async fn fetch_pair(&self, token_a: &Token, token_b: &Token) -> Result<Pair, ClientError> {
        let network = self.client.network();
        let address = pair_address(
            network.factory,
            network.pair_init_code_hash,
            token_a.address,
            token_b.address,
        );

        if !self.client.has_code(address).await? {
            return Err(ClientError::PairNotFound {
                token_a: token_a.address,
                token_b: token_b.address,
                pair: address,
            });
        }

        let reserves = self
            .client
            .call_contract(address, &IUniswapV2Pair::getReservesCall {})
            .await?;
        tracing::debug!(
            pair = %address,
            reserve0 = %reserves.reserve0,
            reserve1 = %reserves.reserve1,
            "Fetched pair reserves"
        );

        Ok(Pair::from_reserves(
            network,
            token_a.clone(),
            token_b.clone(),
            U256::from(reserves.reserve0),
            U256::from(reserves.reserve1),
        ))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::blockchain::types::ETH_MAINNET;
    use alloy::primitives::{address, Bytes};
    use alloy::transports::mock::Asserter;

    pub(crate) const DAI: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");
    pub(crate) const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

    pub(crate) fn token(address: Address, decimals: u8) -> Token {
        Token::new(ETH_MAINNET.chain_id, address, decimals)
    }

    #[test]
    fn pair_address_matches_deployed_pools() {
        let weth = ETH_MAINNET.weth;
        let factory = ETH_MAINNET.factory;
        let hash = ETH_MAINNET.pair_init_code_hash;

        assert_eq!(
            pair_address(factory, hash, DAI, weth),
            address!("A478c2975Ab1Ea89e8196811F51A7B7Ade33eB11")
        );
        assert_eq!(
            pair_address(factory, hash, weth, USDC),
            address!("B4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc")
        );
        // Argument order does not matter
        assert_eq!(
            pair_address(factory, hash, weth, DAI),
            pair_address(factory, hash, DAI, weth)
        );
    }

    #[test]
    fn new_sorts_tokens_and_reserves() {
        let weth = ETH_MAINNET.wrapped_native();
        let dai = token(DAI, 18);
        let pair = Pair::new(
            &ETH_MAINNET,
            (weth.clone(), U256::from(10u64)),
            (dai.clone(), U256::from(20_000u64)),
        );

        // DAI (0x6B..) sorts before WETH (0xC0..)
        assert_eq!(pair.token0, dai);
        assert_eq!(pair.reserve0, U256::from(20_000u64));
        assert_eq!(pair.token1, weth);
        assert_eq!(pair.reserve1, U256::from(10u64));
        assert_eq!(pair.other(&weth), &dai);
        assert_eq!(pair.reserves_for(&weth), (U256::from(10u64), U256::from(20_000u64)));
    }

    #[test]
    fn output_amount_applies_fee() {
        let weth = ETH_MAINNET.wrapped_native();
        let dai = token(DAI, 18);
        let pair = Pair::new(
            &ETH_MAINNET,
            (weth.clone(), U256::from(1_000u64)),
            (dai.clone(), U256::from(1_000u64)),
        );

        // 100 * 997 * 1000 / (1000 * 1000 + 100 * 997) = 90.66 -> 90
        assert_eq!(
            pair.output_amount(&weth, U256::from(100u64)).unwrap(),
            U256::from(90u64)
        );
    }

    #[test]
    fn output_amount_rejects_empty_pool_and_dust() {
        let weth = ETH_MAINNET.wrapped_native();
        let dai = token(DAI, 18);

        let empty = Pair::new(
            &ETH_MAINNET,
            (weth.clone(), U256::ZERO),
            (dai.clone(), U256::from(1_000u64)),
        );
        assert!(matches!(
            empty.output_amount(&weth, U256::from(100u64)),
            Err(ClientError::InsufficientReserves(_))
        ));

        let shallow = Pair::new(
            &ETH_MAINNET,
            (weth.clone(), U256::from(1_000_000u64)),
            (dai.clone(), U256::from(1u64)),
        );
        assert!(matches!(
            shallow.output_amount(&weth, U256::from(1u64)),
            Err(ClientError::InsufficientInputAmount)
        ));
    }

    #[test]
    fn output_amount_rejects_foreign_token() {
        let weth = ETH_MAINNET.wrapped_native();
        let pair = Pair::new(
            &ETH_MAINNET,
            (weth.clone(), U256::from(1_000u64)),
            (token(DAI, 18), U256::from(1_000u64)),
        );
        assert!(matches!(
            pair.output_amount(&token(USDC, 6), U256::from(1u64)),
            Err(ClientError::InvalidRoute(_))
        ));
    }

    #[test]
    fn from_reserves_follows_pair_ordering() {
        let weth = ETH_MAINNET.wrapped_native();
        let dai = token(DAI, 18);
        // reserve0 belongs to DAI, the lower address
        let (reserve0, reserve1) = (U256::from(20_000u64), U256::from(10u64));

        let dai_first =
            Pair::from_reserves(&ETH_MAINNET, dai.clone(), weth.clone(), reserve0, reserve1);
        let weth_first =
            Pair::from_reserves(&ETH_MAINNET, weth.clone(), dai.clone(), reserve0, reserve1);

        assert_eq!(dai_first, weth_first);
        assert_eq!(weth_first.reserves_for(&weth), (reserve1, reserve0));
        assert_eq!(weth_first.reserves_for(&dai), (reserve0, reserve1));
    }

    /// ABI-encoded `getReserves` return data.
    fn reserves_output(reserve0: u64, reserve1: u64) -> Bytes {
        let mut data = Vec::with_capacity(96);
        data.extend_from_slice(&U256::from(reserve0).to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(reserve1).to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(1_700_000_000u64).to_be_bytes::<32>());
        Bytes::from(data)
    }

    #[tokio::test]
    async fn fetch_pair_reads_reserves_in_caller_order() {
        let asserter = Asserter::new();
        let client = LedgerClient::mocked(ETH_MAINNET, asserter.clone());
        let fetcher = Fetcher::new(&client);
        let weth = ETH_MAINNET.wrapped_native();
        let dai = token(DAI, 18);

        // eth_getCode, then eth_call(getReserves) with DAI as token0
        asserter.push_success(&Bytes::from_static(&[0x60, 0x80]));
        asserter.push_success(&reserves_output(20_000, 10));

        let pair = fetcher.fetch_pair(&weth, &dai).await.unwrap();
        assert_eq!(
            pair.address,
            address!("A478c2975Ab1Ea89e8196811F51A7B7Ade33eB11")
        );
        assert_eq!(pair.token0, dai);
        assert_eq!(pair.reserves_for(&weth), (U256::from(10u64), U256::from(20_000u64)));
    }

    #[tokio::test]
    async fn fetch_pair_without_contract_is_not_found() {
        let asserter = Asserter::new();
        let client = LedgerClient::mocked(ETH_MAINNET, asserter.clone());
        let fetcher = Fetcher::new(&client);

        asserter.push_success(&Bytes::new());

        let result = fetcher
            .fetch_pair(&ETH_MAINNET.wrapped_native(), &token(USDC, 6))
            .await;
        assert!(matches!(
            result,
            Err(ClientError::PairNotFound { pair, .. })
                if pair == address!("B4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc")
        ));
    }

    #[tokio::test]
    async fn fetch_token_resolves_weth_without_rpc() {
        let client = LedgerClient::mocked(ETH_MAINNET, Asserter::new());
        let token = Fetcher::new(&client)
            .fetch_token(ETH_MAINNET.weth)
            .await
            .unwrap();
        assert_eq!(token.symbol.as_deref(), Some("WETH"));
    }
}
