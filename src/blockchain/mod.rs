// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration for Ethereum-compatible networks.
//!
//! This module provides functionality for:
//! - Querying native and ERC-20 balances
//! - Signing and submitting native and ERC-20 transfers
//! - Quoting and executing Uniswap V2 native-for-token swaps

pub mod amount;
pub mod client;
pub mod erc20;
pub mod pair;
pub mod router;
pub mod signing;
pub mod swap;
pub mod trade;
pub mod types;

pub use amount::{to_hex_quantity, Amount};
pub use client::{ClientError, LedgerClient};
pub use types::*;
