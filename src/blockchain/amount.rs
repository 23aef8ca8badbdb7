// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Monetary amounts in smallest units and their decimal representation.

use std::fmt;

use alloy::primitives::U256;

use super::client::ClientError;

/// An amount in a token's smallest unit together with the token's decimals.
///
/// The human-readable form is `value / 10^decimals`. Formatting always keeps at
/// least one fractional digit (`1.0`), and [`Amount::parse`] accepts that form
/// back, so `parse(format(v)) == v` for every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    pub value: U256,
    pub decimals: u8,
}

impl Amount {
    pub fn new(value: U256, decimals: u8) -> Self {
        Self { value, decimals }
    }

    /// Parse a human-readable amount (e.g. "1.5") into smallest units.
    ///
    /// # Arguments
    /// * `amount` - Digits with an optional fractional part
    /// * `decimals` - Number of decimals (18 for ETH)
    pub fn parse(amount: &str, decimals: u8) -> Result<Self, ClientError> {
        let amount = amount.trim();
        let (whole, fraction) = match amount.split_once('.') {
            Some((w, f)) => (w, f),
            None => (amount, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(ClientError::InvalidAmount(format!(
                "Empty amount: {amount:?}"
            )));
        }
        if !is_digits(whole) || !is_digits(fraction) {
            return Err(ClientError::InvalidAmount(format!(
                "Invalid amount format: {amount:?}"
            )));
        }

        // Trailing zeros carry no precision
        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > decimals as usize {
            return Err(ClientError::InvalidAmount(format!(
                "Too many decimal places (max {decimals})"
            )));
        }

        let scale = pow10(decimals).ok_or_else(|| {
            ClientError::InvalidAmount(format!(
                "Unsupported decimals {decimals} (max {MAX_DECIMALS})"
            ))
        })?;

        let whole = parse_digits(whole)?;
        // Pad with zeros to match decimals
        let padded = format!("{:0<width$}", fraction, width = decimals as usize);
        let fraction = parse_digits(&padded)?;

        let value = whole
            .checked_mul(scale)
            .and_then(|w| w.checked_add(fraction))
            .ok_or_else(|| ClientError::InvalidAmount("Amount overflow".to_string()))?;

        Ok(Self { value, decimals })
    }

    /// Parse an amount of native currency (18 decimals).
    pub fn parse_ether(amount: &str) -> Result<Self, ClientError> {
        Self::parse(amount, super::types::NATIVE_DECIMALS)
    }

    /// The raw value as `0x`-prefixed big-endian hex.
    pub fn to_hex(&self) -> String {
        to_hex_quantity(self.value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Past MAX_DECIMALS every value is below one whole unit
        let (whole, remainder) = match pow10(self.decimals) {
            Some(divisor) => (self.value / divisor, self.value % divisor),
            None => (U256::ZERO, self.value),
        };

        if remainder.is_zero() {
            return write!(f, "{whole}.0");
        }

        let decimal_str = format!(
            "{:0>width$}",
            remainder.to_string(),
            width = self.decimals as usize
        );
        write!(f, "{}.{}", whole, decimal_str.trim_end_matches('0'))
    }
}

/// Encode a quantity as `0x`-prefixed big-endian hex padded to whole bytes.
///
/// Zero encodes as `0x00`.
pub fn to_hex_quantity(value: U256) -> String {
    let hex = format!("{value:x}");
    if hex.len() % 2 == 1 {
        format!("0x0{hex}")
    } else {
        format!("0x{hex}")
    }
}

/// Largest decimals whose scale `10^decimals` fits in a `U256`.
pub const MAX_DECIMALS: u8 = 77;

fn pow10(decimals: u8) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(decimals))
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_digits(s: &str) -> Result<U256, ClientError> {
    if s.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(s, 10).map_err(|e| ClientError::InvalidAmount(e.to_string()))
}
