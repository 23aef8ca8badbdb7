// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! One-shot actions. Each runs to completion and prints its status to stdout.

pub mod basics;
pub mod swap;
pub mod transfer;

use alloy::primitives::Address;

use crate::blockchain::ClientError;

/// Parse a hex address argument.
pub fn parse_address(raw: &str) -> Result<Address, ClientError> {
    raw.trim()
        .parse()
        .map_err(|e| ClientError::InvalidAddress(format!("{raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_address_accepts_mixed_case() {
        let addr = parse_address(" 0xe7ed092D58f9065BD3675f5Ea82a37105Fb66681 ").unwrap();
        assert_eq!(
            addr,
            parse_address("0xe7ed092d58f9065bd3675f5ea82a37105fb66681").unwrap()
        );
        assert!(matches!(
            parse_address("0x1234"),
            Err(ClientError::InvalidAddress(_))
        ));
    }
}
