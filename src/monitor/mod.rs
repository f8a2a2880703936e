//! Fetch-format pipeline
//!
//! - **Aggregator** - Groups wallets by chain and gathers queue/ownership/note data
//! - **Status** - Readiness tiers and signed/unsigned partitions
//! - **Formatter** - Summary lines and the global signer-deficit tally

pub mod aggregator;
pub mod formatter;
pub mod status;

pub use aggregator::{group_by_chain, Aggregator};
pub use formatter::{format_results, FormattedOutput, SignerTally};
pub use status::{partition_signers, readiness_tier, PartitionSource, ReadinessTier, SignerPartition};

use crate::errors::{AppError, AppResult};
use crate::service::SafeService;
use crate::types::{DisplayOptions, MonitorResult, MonitoredWallet, SignerAlias};
use tracing::info;

/// Inputs of one monitoring run
#[derive(Debug, Clone, Default)]
pub struct MonitorRequest {
    pub wallets: Vec<MonitoredWallet>,
    pub aliases: Vec<SignerAlias>,
    pub options: DisplayOptions,
}

pub struct Monitor<S: SafeService> {
    service: S,
}

impl<S: SafeService> Monitor<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// One fetch-format cycle
    ///
    /// An empty wallet list is the only fatal condition and is rejected before
    /// any request is issued. Every other failure only thins out the result.
    pub async fn run(&self, request: &MonitorRequest) -> AppResult<MonitorResult> {
        if request.wallets.is_empty() {
            return Err(AppError::Config(
                "No wallets configured. Add [[wallets]] entries to the config file or pass --wallet CHAIN:ADDRESS".to_string(),
            ));
        }

        let raw_data = Aggregator::new(&self.service, request.options)
            .aggregate(&request.wallets)
            .await;
        let total_transactions = raw_data.iter().map(|r| r.transactions.len()).sum();

        let FormattedOutput {
            messages,
            signer_summary,
        } = format_results(&raw_data, &request.aliases, &request.options);

        info!(
            "Found {} queued transaction(s) across {} wallet(s)",
            total_transactions,
            raw_data.len()
        );

        Ok(MonitorResult {
            total_transactions,
            messages,
            signer_summary,
            raw_data,
        })
    }
}
