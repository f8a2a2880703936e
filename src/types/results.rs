use super::{Chain, QueuedTransaction, WalletInfo};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything gathered for one wallet that has at least one queued transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedWalletResult {
    pub chain: Chain,
    pub address: String,
    pub transactions: Vec<QueuedTransaction>,
    pub wallet_info: Option<WalletInfo>,
    pub wallet_url: String,
}

/// Output of one fetch-format cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorResult {
    pub total_transactions: usize,
    pub messages: Vec<String>,
    /// Lowercased signer address -> outstanding signatures across all wallets
    pub signer_summary: HashMap<String, usize>,
    pub raw_data: Vec<AggregatedWalletResult>,
}

impl MonitorResult {
    pub fn joined_message(&self) -> String {
        self.messages.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.total_transactions == 0
    }
}
