//! Client-gateway response shapes
//!
//! Only the fields the monitor reads are modelled; serde ignores the rest.

use crate::types::{QueuedTransaction, WalletInfo, PLACEHOLDER_PREFIX};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AddressValue {
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SafeInfoDto {
    pub threshold: u32,
    #[serde(default)]
    pub owners: Vec<AddressValue>,
}

impl From<SafeInfoDto> for WalletInfo {
    fn from(dto: SafeInfoDto) -> Self {
        WalletInfo {
            owners: dto.owners.into_iter().map(|owner| owner.value).collect(),
            threshold: dto.threshold,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueuedPageDto {
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<QueuedItemDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueuedItemDto {
    Transaction { transaction: TransactionSummaryDto },
    /// Labels ("Next", "Queued") and conflict headers
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummaryDto {
    pub id: String,
    pub execution_info: Option<ExecutionInfoDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionInfoDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub nonce: Option<u64>,
    #[serde(default)]
    pub confirmations_required: u32,
    #[serde(default)]
    pub confirmations_submitted: u32,
    pub missing_signers: Option<Vec<AddressValue>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDetailsDto {
    pub note: Option<String>,
}

impl TransactionSummaryDto {
    /// Converts a multisig summary; module transactions have no nonce and are dropped
    pub fn into_queued(self, wallet_address: &str) -> Option<QueuedTransaction> {
        let info = self.execution_info?;
        if info.kind != "MULTISIG" {
            return None;
        }
        let nonce = info.nonce?;

        // The queue endpoint reports how many confirmations exist but not who
        // gave them, so confirmed_owners is filled with placeholders.
        let confirmed_owners = (0..info.confirmations_submitted)
            .map(|n| format!("{}{}", PLACEHOLDER_PREFIX, n))
            .collect();

        Some(QueuedTransaction {
            nonce,
            signed_count: info.confirmations_submitted,
            confirmations_required: info.confirmations_required,
            confirmed_owners,
            missing_signers: info
                .missing_signers
                .map(|signers| signers.into_iter().map(|s| s.value).collect()),
            id: self.id,
            note: None,
            wallet_address: wallet_address.to_string(),
        })
    }
}

impl TransactionDetailsDto {
    pub fn into_note(self) -> Option<String> {
        self.note
            .map(|note| note.trim().to_string())
            .filter(|note| !note.is_empty())
    }
}
