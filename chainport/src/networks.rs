//! Network identifiers and their static configuration tables.
//!
//! Every lookup is an exhaustive match, so a network missing from one of
//! the tables surfaces as an explicit `None` instead of an undefined value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::case::to_camel;
use crate::error::Error;

/// Blockchain protocol family a network belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    /// Ethereum and Ethereum testnets.
    Eth,
    /// BNB Smart Chain.
    Bsc,
}

impl ChainFamily {
    /// Slug token of the family.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eth => "eth",
            Self::Bsc => "bsc",
        }
    }
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RPC connection parameters handed to the deployment task runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkParams {
    /// JSON-RPC endpoint.
    pub url: &'static str,
    /// EIP-155 chain ID, when pinned.
    pub chain_id: Option<u64>,
    /// Gas price in wei, when pinned.
    pub gas_price: Option<u64>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

const ROPSTEN_RPC: &str = "https://ropsten.infura.io/v3/34ee2e319e7945caa976d4d1e24db07f";
const BSC_TESTNET_RPC: &str = "https://data-seed-prebsc-1-s1.binance.org:8545/";
const MAINNET_RPC: &str = "https://mainnet.infura.io/v3/1692a3b8ad92406189c2c7d2b01660bc";
const LOCAL_RPC: &str = "http://localhost:8545";

/// 40 gwei.
const TESTNET_GAS_PRICE: u64 = 40_000_000_000;
/// 115 gwei.
const MAINNET_GAS_PRICE: u64 = 115_000_000_000;

const TESTNET_TIMEOUT_MS: u64 = 50_000;
const MAINNET_TIMEOUT_MS: u64 = 10_000_000;

/// Network identifiers known to the toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    /// Ropsten, test tier.
    #[serde(rename = "ropsten")]
    Ropsten,
    /// Ropsten, staging tier.
    #[serde(rename = "ropstenStaging")]
    RopstenStaging,
    /// BSC testnet, test tier.
    #[serde(rename = "binancetest")]
    BinanceTest,
    /// BSC testnet, staging tier.
    #[serde(rename = "binancetestStaging")]
    BinanceTestStaging,
    /// BSC staging as named by the branch policy.
    #[serde(rename = "binanceStaging")]
    BinanceStaging,
    /// Ethereum mainnet.
    #[serde(rename = "mainnet")]
    Mainnet,
    /// BSC mainnet as named by the branch policy.
    #[serde(rename = "binanceMainnet")]
    BinanceMainnet,
    /// Local development node.
    #[serde(rename = "local")]
    Local,
}

impl Network {
    /// Every known network.
    pub const ALL: &[Self] = &[
        Self::Ropsten,
        Self::RopstenStaging,
        Self::BinanceTest,
        Self::BinanceTestStaging,
        Self::BinanceStaging,
        Self::Mainnet,
        Self::BinanceMainnet,
        Self::Local,
    ];

    /// Network targeted when nothing else is configured.
    pub const DEFAULT: Self = Self::Local;

    /// The identifier token, as used on the command line and on disk.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ropsten => "ropsten",
            Self::RopstenStaging => "ropstenStaging",
            Self::BinanceTest => "binancetest",
            Self::BinanceTestStaging => "binancetestStaging",
            Self::BinanceStaging => "binanceStaging",
            Self::Mainnet => "mainnet",
            Self::BinanceMainnet => "binanceMainnet",
            Self::Local => "local",
        }
    }

    /// Chain family used in the project slug.
    ///
    /// Only the four monitored testnet configurations carry a family.
    #[must_use]
    pub const fn chain_family(self) -> Option<ChainFamily> {
        match self {
            Self::Ropsten | Self::RopstenStaging => Some(ChainFamily::Eth),
            Self::BinanceTest | Self::BinanceTestStaging => Some(ChainFamily::Bsc),
            Self::BinanceStaging | Self::Mainnet | Self::BinanceMainnet | Self::Local => None,
        }
    }

    /// The only branch this network may be deployed from.
    #[must_use]
    pub const fn required_branch(self) -> Option<&'static str> {
        match self {
            Self::Ropsten | Self::BinanceTest => Some("develop"),
            Self::RopstenStaging | Self::BinanceStaging => Some("staging"),
            Self::Mainnet | Self::BinanceMainnet => Some("master"),
            Self::BinanceTestStaging | Self::Local => None,
        }
    }

    /// Built-in connection parameters, if the network has any.
    #[must_use]
    pub const fn params(self) -> Option<NetworkParams> {
        match self {
            Self::Ropsten | Self::RopstenStaging => Some(NetworkParams {
                url: ROPSTEN_RPC,
                chain_id: Some(3),
                gas_price: Some(TESTNET_GAS_PRICE),
                timeout_ms: Some(TESTNET_TIMEOUT_MS),
            }),
            Self::BinanceTest | Self::BinanceTestStaging => Some(NetworkParams {
                url: BSC_TESTNET_RPC,
                chain_id: Some(97),
                gas_price: Some(TESTNET_GAS_PRICE),
                timeout_ms: Some(TESTNET_TIMEOUT_MS),
            }),
            Self::Mainnet => Some(NetworkParams {
                url: MAINNET_RPC,
                chain_id: Some(1),
                gas_price: Some(MAINNET_GAS_PRICE),
                timeout_ms: Some(MAINNET_TIMEOUT_MS),
            }),
            Self::Local => Some(NetworkParams {
                url: LOCAL_RPC,
                chain_id: None,
                gas_price: None,
                timeout_ms: None,
            }),
            Self::BinanceStaging | Self::BinanceMainnet => None,
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().find(|n| n.as_str() == token).copied()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = Error;

    /// Parses the exact token, or a `-`/`_` separated spelling of it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::from_token(s)
            .or_else(|| Self::from_token(&to_camel(s)))
            .ok_or_else(|| Error::UnknownNetwork(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for network in Network::ALL {
            assert_eq!(network.as_str().parse::<Network>().ok(), Some(*network));
        }
    }

    #[test]
    fn separated_spellings_parse() {
        assert_eq!("ropsten-staging".parse::<Network>().ok(), Some(Network::RopstenStaging));
        assert_eq!(
            "binancetest_staging".parse::<Network>().ok(),
            Some(Network::BinanceTestStaging)
        );
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = "goerli".parse::<Network>().unwrap_err();
        assert!(matches!(err, Error::UnknownNetwork(ref t) if t == "goerli"));
    }

    #[test]
    fn chain_families() {
        assert_eq!(Network::Ropsten.chain_family(), Some(ChainFamily::Eth));
        assert_eq!(Network::RopstenStaging.chain_family(), Some(ChainFamily::Eth));
        assert_eq!(Network::BinanceTest.chain_family(), Some(ChainFamily::Bsc));
        assert_eq!(Network::BinanceTestStaging.chain_family(), Some(ChainFamily::Bsc));
        assert_eq!(Network::Mainnet.chain_family(), None);
        assert_eq!(Network::Local.chain_family(), None);
    }

    #[test]
    fn required_branches() {
        assert_eq!(Network::Ropsten.required_branch(), Some("develop"));
        assert_eq!(Network::BinanceTest.required_branch(), Some("develop"));
        assert_eq!(Network::RopstenStaging.required_branch(), Some("staging"));
        assert_eq!(Network::BinanceStaging.required_branch(), Some("staging"));
        assert_eq!(Network::Mainnet.required_branch(), Some("master"));
        assert_eq!(Network::BinanceMainnet.required_branch(), Some("master"));
        assert_eq!(Network::BinanceTestStaging.required_branch(), None);
    }

    #[test]
    fn params_table() {
        let bsc = Network::BinanceTestStaging.params();
        assert_eq!(bsc.and_then(|p| p.chain_id), Some(97));
        assert_eq!(Network::Mainnet.params().and_then(|p| p.gas_price), Some(115_000_000_000));
        assert_eq!(Network::Local.params().map(|p| p.url), Some("http://localhost:8545"));
        assert!(Network::BinanceMainnet.params().is_none());
    }

    #[test]
    fn serde_uses_tokens() {
        let json = serde_json::to_string(&Network::BinanceTestStaging).unwrap();
        assert_eq!(json, "\"binancetestStaging\"");
    }
}
