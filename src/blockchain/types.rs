// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use alloy::primitives::{address, b256, Address, TxHash, B256};

/// Ethereum network configuration, including the Uniswap V2 deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// Block explorer URL
    pub explorer_url: &'static str,
    /// Wrapped native currency (WETH) contract
    pub weth: Address,
    /// Uniswap V2 factory
    pub factory: Address,
    /// Uniswap V2 Router02
    pub router: Address,
    /// keccak256 of the pair creation code, used to derive pair addresses
    pub pair_init_code_hash: B256,
}

const UNISWAP_V2_FACTORY: Address = address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");
const UNISWAP_V2_ROUTER: Address = address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D");
const UNISWAP_V2_PAIR_INIT_CODE_HASH: B256 =
    b256!("96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f");

/// Ethereum mainnet.
pub const ETH_MAINNET: NetworkConfig = NetworkConfig {
    name: "mainnet",
    chain_id: 1,
    explorer_url: "https://etherscan.io",
    weth: address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
    factory: UNISWAP_V2_FACTORY,
    router: UNISWAP_V2_ROUTER,
    pair_init_code_hash: UNISWAP_V2_PAIR_INIT_CODE_HASH,
};

/// Ropsten testnet.
pub const ETH_ROPSTEN: NetworkConfig = NetworkConfig {
    name: "ropsten",
    chain_id: 3,
    explorer_url: "https://ropsten.etherscan.io",
    weth: address!("c778417E063141139Fce010982780140Aa0cD5Ab"),
    factory: UNISWAP_V2_FACTORY,
    router: UNISWAP_V2_ROUTER,
    pair_init_code_hash: UNISWAP_V2_PAIR_INIT_CODE_HASH,
};

/// Rinkeby testnet.
pub const ETH_RINKEBY: NetworkConfig = NetworkConfig {
    name: "rinkeby",
    chain_id: 4,
    explorer_url: "https://rinkeby.etherscan.io",
    weth: address!("c778417E063141139Fce010982780140Aa0cD5Ab"),
    factory: UNISWAP_V2_FACTORY,
    router: UNISWAP_V2_ROUTER,
    pair_init_code_hash: UNISWAP_V2_PAIR_INIT_CODE_HASH,
};

/// Görli testnet.
pub const ETH_GOERLI: NetworkConfig = NetworkConfig {
    name: "goerli",
    chain_id: 5,
    explorer_url: "https://goerli.etherscan.io",
    weth: address!("B4FBF271143F4FBf7B91A5ded31805e42b2208d6"),
    factory: UNISWAP_V2_FACTORY,
    router: UNISWAP_V2_ROUTER,
    pair_init_code_hash: UNISWAP_V2_PAIR_INIT_CODE_HASH,
};

/// Kovan testnet.
pub const ETH_KOVAN: NetworkConfig = NetworkConfig {
    name: "kovan",
    chain_id: 42,
    explorer_url: "https://kovan.etherscan.io",
    weth: address!("d0A1E359811322d97991E03f863a0C30C2cF029C"),
    factory: UNISWAP_V2_FACTORY,
    router: UNISWAP_V2_ROUTER,
    pair_init_code_hash: UNISWAP_V2_PAIR_INIT_CODE_HASH,
};

/// All networks with a known Uniswap V2 deployment.
pub const SUPPORTED_NETWORKS: [NetworkConfig; 5] =
    [ETH_MAINNET, ETH_ROPSTEN, ETH_RINKEBY, ETH_GOERLI, ETH_KOVAN];

/// Network used when none is configured.
pub const DEFAULT_NETWORK: &str = "rinkeby";

/// Decimals of the native currency and of WETH.
pub const NATIVE_DECIMALS: u8 = 18;

impl NetworkConfig {
    /// Resolve a network from its name (case-insensitive) or decimal chain id.
    pub fn lookup(raw: &str) -> Option<NetworkConfig> {
        let value = raw.trim().to_ascii_lowercase();
        let by_id = value.parse::<u64>().ok();

        SUPPORTED_NETWORKS
            .iter()
            .find(|n| n.name == value || Some(n.chain_id) == by_id)
            .cloned()
    }

    /// Wrapped native currency descriptor for this network.
    pub fn wrapped_native(&self) -> Token {
        Token {
            chain_id: self.chain_id,
            address: self.weth,
            decimals: NATIVE_DECIMALS,
            symbol: Some("WETH".to_string()),
            name: Some("Wrapped Ether".to_string()),
        }
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, hash: &TxHash) -> String {
        format!("{}/tx/{:?}", self.explorer_url, hash)
    }
}

/// ERC-20 token descriptor. Identity is `(chain_id, address)`.
#[derive(Debug, Clone)]
pub struct Token {
    pub chain_id: u64,
    pub address: Address,
    pub decimals: u8,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

impl Token {
    /// Create a descriptor without metadata.
    pub fn new(chain_id: u64, address: Address, decimals: u8) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: None,
            name: None,
        }
    }

    /// Whether this token sorts before `other` (Uniswap's `token0` ordering).
    pub fn sorts_before(&self, other: &Token) -> bool {
        self.address < other.address
    }

    /// Symbol for display, falling back to the address.
    pub fn display_symbol(&self) -> String {
        self.symbol
            .clone()
            .unwrap_or_else(|| format!("{:?}", self.address))
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

/// Handle for a submitted transaction. Confirmation is not awaited.
#[derive(Debug, Clone)]
pub struct TxHandle {
    /// Transaction hash
    pub hash: TxHash,
    /// Explorer URL for the transaction
    pub explorer_url: String,
}
