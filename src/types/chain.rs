//! Supported networks
//!
//! Every network the transaction service indexes is a closed variant here.
//! The lowercase name is what configuration files use and what appears in
//! wallet URLs (mainnet excepted, which the Safe web app addresses as `eth`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Chain {
    Mainnet,
    Sepolia,
    Optimism,
    Bsc,
    Gnosis,
    Polygon,
    Zksync,
    Base,
    Arbitrum,
    Avalanche,
    Linea,
}

impl Chain {
    pub const ALL: [Chain; 11] = [
        Chain::Mainnet,
        Chain::Sepolia,
        Chain::Optimism,
        Chain::Bsc,
        Chain::Gnosis,
        Chain::Polygon,
        Chain::Zksync,
        Chain::Base,
        Chain::Arbitrum,
        Chain::Avalanche,
        Chain::Linea,
    ];

    /// Configuration name
    pub fn name(&self) -> &'static str {
        match self {
            Chain::Mainnet => "mainnet",
            Chain::Sepolia => "sepolia",
            Chain::Optimism => "optimism",
            Chain::Bsc => "bsc",
            Chain::Gnosis => "gnosis",
            Chain::Polygon => "polygon",
            Chain::Zksync => "zksync",
            Chain::Base => "base",
            Chain::Arbitrum => "arbitrum",
            Chain::Avalanche => "avalanche",
            Chain::Linea => "linea",
        }
    }

    /// EVM chain id, used to address the client gateway
    pub fn chain_id(&self) -> u64 {
        match self {
            Chain::Mainnet => 1,
            Chain::Sepolia => 11_155_111,
            Chain::Optimism => 10,
            Chain::Bsc => 56,
            Chain::Gnosis => 100,
            Chain::Polygon => 137,
            Chain::Zksync => 324,
            Chain::Base => 8453,
            Chain::Arbitrum => 42_161,
            Chain::Avalanche => 43_114,
            Chain::Linea => 59_144,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Chain::Mainnet => "🔷",
            Chain::Sepolia => "🧪",
            Chain::Optimism => "🔴",
            Chain::Bsc => "🟡",
            Chain::Gnosis => "🟢",
            Chain::Polygon => "🟣",
            Chain::Zksync => "⚫",
            Chain::Base => "🔵",
            Chain::Arbitrum => "🌀",
            Chain::Avalanche => "🔺",
            Chain::Linea => "⬛",
        }
    }

    /// Prefix used in wallet URLs: the name as-is, except mainnet's ticker alias
    pub fn url_prefix(&self) -> &'static str {
        match self {
            Chain::Mainnet => "eth",
            other => other.name(),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "ethereum" | "eth" => return Ok(Chain::Mainnet),
            "bnb" => return Ok(Chain::Bsc),
            _ => {}
        }
        Chain::ALL
            .iter()
            .copied()
            .find(|chain| chain.name() == lowered)
            .ok_or_else(|| format!("Unsupported chain: {}", s))
    }
}

impl Serialize for Chain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Chain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
