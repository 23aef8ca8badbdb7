// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EVM Swap Client
//!
//! Reads balances, sends native and ERC-20 transfers, and swaps native
//! currency for tokens through a Uniswap V2 router.
//!
//! ## Modules
//!
//! - `blockchain` - Ledger client, token and router adapters, swap planning
//! - `commands` - One-shot CLI actions
//! - `config` - Environment configuration
//! - `context` - Immutable connection context (network, RPC, signer)
//! - `error` - Top-level error type
//! - `logging` - Tracing subscriber setup

pub mod blockchain;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
