//! Per-wallet data gathering
//!
//! Wallets are grouped by chain (first-seen order) and processed one at a
//! time within each group to keep the request rate against the shared public
//! API bounded. Inside one wallet the queue and ownership lookups run as a
//! joined pair. Failures degrade the result instead of aborting the run.

use crate::service::SafeService;
use crate::types::{AggregatedWalletResult, Chain, DisplayOptions, MonitoredWallet};
use tracing::{debug, info, warn};

/// Group wallets by chain, keeping first-encounter order of chains and wallets
pub fn group_by_chain(wallets: &[MonitoredWallet]) -> Vec<(Chain, Vec<&MonitoredWallet>)> {
    let mut groups: Vec<(Chain, Vec<&MonitoredWallet>)> = Vec::new();
    for wallet in wallets {
        match groups.iter_mut().find(|(chain, _)| *chain == wallet.chain) {
            Some((_, members)) => members.push(wallet),
            None => groups.push((wallet.chain, vec![wallet])),
        }
    }
    groups
}

pub struct Aggregator<'a, S: SafeService + ?Sized> {
    service: &'a S,
    options: DisplayOptions,
}

impl<'a, S: SafeService + ?Sized> Aggregator<'a, S> {
    pub fn new(service: &'a S, options: DisplayOptions) -> Self {
        Self { service, options }
    }

    /// Fetch and assemble results for every wallet with queued transactions
    pub async fn aggregate(&self, wallets: &[MonitoredWallet]) -> Vec<AggregatedWalletResult> {
        let mut results = Vec::new();

        for (chain, members) in group_by_chain(wallets) {
            info!("Processing {} wallet(s) on {}", members.len(), chain);
            for wallet in members {
                if let Some(result) = self.aggregate_wallet(wallet).await {
                    results.push(result);
                }
            }
        }

        results
    }

    /// `None` when the queue lookup fails or nothing is queued
    pub async fn aggregate_wallet(&self, wallet: &MonitoredWallet) -> Option<AggregatedWalletResult> {
        let address = wallet.address.as_str();
        let chain = wallet.chain;

        let ownership = async {
            if self.options.needs_ownership() {
                Some(self.service.fetch_ownership(address, chain).await)
            } else {
                None
            }
        };
        let (queued, ownership) = tokio::join!(
            self.service.fetch_queued_transactions(address, chain),
            ownership
        );

        let mut transactions = match queued {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!("Skipping {}: failed to fetch queued transactions: {}", wallet, e);
                return None;
            }
        };

        if transactions.is_empty() {
            debug!("No queued transactions for {}", wallet);
            return None;
        }

        let wallet_info = match ownership {
            Some(Ok(info)) => Some(info),
            Some(Err(e)) => {
                warn!(
                    "Ownership lookup failed for {}, signer breakdown skipped: {}",
                    wallet, e
                );
                None
            }
            None => None,
        };

        if self.options.show_tx_note {
            for tx in transactions.iter_mut() {
                match self.service.fetch_note(&tx.id, chain).await {
                    Ok(note) => tx.note = note,
                    Err(e) => debug!("Note lookup failed for {}: {}", tx.id, e),
                }
            }
        }

        info!("{}: {} queued transaction(s)", wallet, transactions.len());

        Some(AggregatedWalletResult {
            chain,
            address: wallet.address.clone(),
            transactions,
            wallet_info,
            wallet_url: self.service.wallet_url(address, chain),
        })
    }
}
