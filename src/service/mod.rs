//! Transaction service integration module
//!
//! - **SafeService** - The narrow contract the aggregator consumes
//! - **Client** - reqwest implementation against the Safe client gateway
//! - **Retry** - Exponential backoff helpers
//! - **Dto** - Gateway response shapes

pub mod client;
pub mod dto;
pub mod retry;

pub use client::SafeClient;
pub use retry::{calculate_next_backoff, with_retry};

use crate::errors::ServiceResult;
use crate::types::{Chain, QueuedTransaction, WalletInfo};
use async_trait::async_trait;

pub const DEFAULT_APP_URL: &str = "https://app.safe.global";

/// Per-chain lookups against the multisig transaction service
#[async_trait]
pub trait SafeService: Send + Sync {
    /// Owners and confirmation threshold of a wallet
    async fn fetch_ownership(&self, address: &str, chain: Chain) -> ServiceResult<WalletInfo>;

    /// Pending transactions, empty when nothing is queued
    async fn fetch_queued_transactions(
        &self,
        address: &str,
        chain: Chain,
    ) -> ServiceResult<Vec<QueuedTransaction>>;

    /// Free-text note attached to a transaction, if any
    async fn fetch_note(&self, transaction_id: &str, chain: Chain) -> ServiceResult<Option<String>>;

    fn wallet_url(&self, address: &str, chain: Chain) -> String {
        wallet_url(DEFAULT_APP_URL, address, chain)
    }
}

/// Web-app link for a wallet; pure and deterministic
///
/// # Example
/// ```
/// use safe_queue_monitor::service::wallet_url;
/// use safe_queue_monitor::types::Chain;
///
/// assert_eq!(
///     wallet_url("https://app.safe.global", "0xabc", Chain::Mainnet),
///     "https://app.safe.global/home?safe=eth:0xabc"
/// );
/// ```
pub fn wallet_url(app_url: &str, address: &str, chain: Chain) -> String {
    format!(
        "{}/home?safe={}:{}",
        app_url.trim_end_matches('/'),
        chain.url_prefix(),
        address
    )
}
