// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Routes, slippage tolerance and exact-input trades.

use std::fmt;

use alloy::primitives::{Address, U256};

use super::amount::Amount;
use super::client::ClientError;
use super::pair::Pair;
use super::types::Token;

/// Ordered hops from an input token to an output token.
#[derive(Debug, Clone)]
pub struct Route {
    pairs: Vec<Pair>,
    path: Vec<Token>,
}

impl Route {
    /// Build a route starting at `input`. Each pair must contain the token the
    /// previous hop produced.
    pub fn new(pairs: Vec<Pair>, input: Token) -> Result<Self, ClientError> {
        if pairs.is_empty() {
            return Err(ClientError::InvalidRoute("route has no pairs".to_string()));
        }

        let mut path = vec![input];
        for pair in &pairs {
            let current = &path[path.len() - 1];
            if !pair.involves(current) {
                return Err(ClientError::InvalidRoute(format!(
                    "pair {:?} does not contain {:?}",
                    pair.address, current.address
                )));
            }
            let next = pair.other(current).clone();
            path.push(next);
        }

        Ok(Self { pairs, path })
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Tokens visited, input first.
    pub fn path(&self) -> &[Token] {
        &self.path
    }

    /// Token addresses visited, as the router expects them.
    pub fn path_addresses(&self) -> Vec<Address> {
        self.path.iter().map(|t| t.address).collect()
    }

    pub fn input(&self) -> &Token {
        &self.path[0]
    }

    pub fn output(&self) -> &Token {
        &self.path[self.path.len() - 1]
    }
}

/// Slippage tolerance as a plain ratio `numerator / denominator`.
///
/// The ratio is the fraction itself, not a percentage: `5/1000` is 0.5% and
/// `10000/1000` is 1000%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slippage {
    numerator: u64,
    denominator: u64,
}

impl Slippage {
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, ClientError> {
        if denominator == 0 {
            return Err(ClientError::InvalidAmount(
                "slippage denominator must be positive".to_string(),
            ));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }
}

impl fmt::Display for Slippage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bps = u128::from(self.numerator) * 10_000 / u128::from(self.denominator);
        write!(f, "{}.{:02}%", bps / 100, bps % 100)
    }
}

/// Default tolerance: 10000/1000.
pub const DEFAULT_SLIPPAGE: Slippage = Slippage {
    numerator: 10_000,
    denominator: 1_000,
};

/// A trade with a fixed input amount.
#[derive(Debug, Clone)]
pub struct Trade {
    route: Route,
    input_amount: Amount,
    output_amount: Amount,
}

impl Trade {
    /// Quote `amount_in` (smallest units of the route's input) through every hop.
    pub fn exact_input(route: Route, amount_in: U256) -> Result<Self, ClientError> {
        let mut amount = amount_in;
        for (pair, token_in) in route.pairs().iter().zip(route.path()) {
            amount = pair.output_amount(token_in, amount)?;
        }

        let input_amount = Amount::new(amount_in, route.input().decimals);
        let output_amount = Amount::new(amount, route.output().decimals);
        Ok(Self {
            route,
            input_amount,
            output_amount,
        })
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn input_amount(&self) -> Amount {
        self.input_amount
    }

    /// Output expected at current reserves.
    pub fn output_amount(&self) -> Amount {
        self.output_amount
    }

    /// Least output accepted under `slippage`: `out * den / (den + num)`.
    ///
    /// Strictly below [`Trade::output_amount`] for any positive tolerance and
    /// non-increasing as the tolerance grows.
    pub fn minimum_amount_out(&self, slippage: &Slippage) -> U256 {
        let den = U256::from(slippage.denominator);
        let scale = den + U256::from(slippage.numerator);
        // floor(out * den / scale) without forming out * den
        let out = self.output_amount.value;
        (out / scale) * den + (out % scale) * den / scale
    }

    /// Loss versus the mid price in basis points, fee included.
    pub fn price_impact_bps(&self) -> U256 {
        let mut mid_out = self.input_amount.value;
        let mut mid_den = U256::from(1u64);
        for (pair, token_in) in self.route.pairs().iter().zip(self.route.path()) {
            let (reserve_in, reserve_out) = pair.reserves_for(token_in);
            mid_out = mid_out.saturating_mul(reserve_out);
            mid_den = mid_den.saturating_mul(reserve_in);
        }

        // (exact - out) / exact with exact = mid_out / mid_den
        let actual = self.output_amount.value.saturating_mul(mid_den);
        if mid_out.is_zero() || actual >= mid_out {
            return U256::ZERO;
        }
        (mid_out - actual).saturating_mul(U256::from(10_000u64)) / mid_out
    }
}
