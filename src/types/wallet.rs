//! Monitored wallets, signer aliases and ownership records

use super::Chain;
use crate::utils::address::same_address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A multisig wallet to poll on a given network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredWallet {
    pub address: String,
    pub chain: Chain,
}

impl MonitoredWallet {
    pub fn new(address: impl Into<String>, chain: Chain) -> Self {
        Self {
            address: address.into(),
            chain,
        }
    }
}

impl fmt::Display for MonitoredWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.address)
    }
}

/// Parses the `CHAIN:ADDRESS` form accepted by `--wallet`
impl FromStr for MonitoredWallet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chain, address) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected CHAIN:ADDRESS, got '{}'", s))?;
        let address = address.trim();
        if address.is_empty() {
            return Err(format!("Missing address in '{}'", s));
        }
        Ok(Self::new(address, chain.parse()?))
    }
}

/// Display label for a signer address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerAlias {
    pub address: String,
    pub handle: String,
}

impl SignerAlias {
    pub fn new(address: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            handle: handle.into(),
        }
    }

    /// Handle without any leading `@` the config author may have typed
    pub fn bare_handle(&self) -> &str {
        self.handle.trim_start_matches('@')
    }
}

/// Case-insensitive alias lookup
pub fn find_alias<'a>(aliases: &'a [SignerAlias], address: &str) -> Option<&'a SignerAlias> {
    aliases
        .iter()
        .find(|alias| same_address(&alias.address, address))
}

/// Owners and threshold of a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletInfo {
    pub owners: Vec<String>,
    pub threshold: u32,
}
