//! Signer status resolution
//!
//! Computes the readiness tier of a queued transaction from its counts, and
//! partitions the wallet's owners into signed and unsigned sets.

use crate::types::QueuedTransaction;
use crate::utils::address::normalise;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Share of the threshold (in tenths) at which a transaction counts as nearly ready
const NEARLY_READY_TENTHS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadinessTier {
    Ready,
    NearlyReady,
    NeedsAttention,
}

impl ReadinessTier {
    pub fn icon(&self) -> &'static str {
        match self {
            ReadinessTier::Ready => "✅",
            ReadinessTier::NearlyReady => "🟡",
            ReadinessTier::NeedsAttention => "🔴",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadinessTier::Ready => "ready",
            ReadinessTier::NearlyReady => "nearly-ready",
            ReadinessTier::NeedsAttention => "needs-attention",
        }
    }
}

/// Smallest signature count that counts as nearly ready
///
/// Computes `ceil(required * 0.7)` in integer arithmetic, widened to `u64`
/// so thresholds anywhere in the `u32` range stay exact.
///
/// # Arguments
/// * `required` - Confirmations the wallet needs before execution
///
/// # Returns
/// The nearly-ready cut-off, never larger than `required`
///
/// # Example
/// ```
/// use safe_queue_monitor::monitor::status::nearly_ready_threshold;
///
/// assert_eq!(nearly_ready_threshold(3), 3);
/// assert_eq!(nearly_ready_threshold(4), 3);
/// assert_eq!(nearly_ready_threshold(10), 7);
/// ```
pub fn nearly_ready_threshold(required: u32) -> u32 {
    let threshold = (u64::from(required) * u64::from(NEARLY_READY_TENTHS)).div_ceil(10);
    u32::try_from(threshold).unwrap_or(required)
}

/// Classify signature progress into a readiness tier
///
/// A transaction with every required signature is `Ready`, one at or above
/// 70% of the threshold (rounded up) is `NearlyReady`, anything else
/// `NeedsAttention`.
///
/// # Arguments
/// * `signed_count` - Confirmations submitted so far
/// * `confirmations_required` - The wallet threshold for this transaction
///
/// # Returns
/// The tier; counts above the threshold are still `Ready`
///
/// # Example
/// ```
/// use safe_queue_monitor::monitor::{readiness_tier, ReadinessTier};
///
/// assert_eq!(readiness_tier(3, 3), ReadinessTier::Ready);
/// assert_eq!(readiness_tier(3, 4), ReadinessTier::NearlyReady);
/// assert_eq!(readiness_tier(2, 3), ReadinessTier::NeedsAttention);
/// ```
pub fn readiness_tier(signed_count: u32, confirmations_required: u32) -> ReadinessTier {
    if signed_count >= confirmations_required {
        ReadinessTier::Ready
    } else if signed_count >= nearly_ready_threshold(confirmations_required) {
        ReadinessTier::NearlyReady
    } else {
        ReadinessTier::NeedsAttention
    }
}

/// Where the signed/unsigned split came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionSource {
    /// Authoritative missing-signer list from the service
    MissingSigners,
    /// Degraded fallback: owners matched against `confirmed_owners`
    Confirmations,
    /// Fallback attempted but the confirmations do not name owners (placeholder
    /// entries, or a non-zero `signed_count` with no owner matched). The sets
    /// are not meaningful and must not be shown as who signed. Placeholders
    /// are never mapped back to real addresses.
    Unresolved,
}

/// Owners split by signature state, all addresses lowercased
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerPartition {
    pub signed: Vec<String>,
    pub unsigned: Vec<String>,
    pub source: PartitionSource,
}

impl SignerPartition {
    /// Whether `signed`/`unsigned` identify real owners
    pub fn is_resolved(&self) -> bool {
        self.source != PartitionSource::Unresolved
    }
}

/// Split `owners` into signed and unsigned sets for `tx`
///
/// A non-empty `missing_signers` list wins: it is returned as the unsigned
/// set verbatim (lowercased, order kept) and every other owner is signed.
/// Otherwise owners are checked against `confirmed_owners`, and the result
/// is marked `Unresolved` when those entries cannot identify anyone.
///
/// # Arguments
/// * `tx` - The queued transaction
/// * `owners` - Current owner set of the wallet, any case
///
/// # Returns
/// A `SignerPartition` whose `source` tells which path produced it
///
/// # Example
/// ```
/// use safe_queue_monitor::monitor::{partition_signers, PartitionSource};
/// use safe_queue_monitor::types::QueuedTransaction;
///
/// let tx = QueuedTransaction {
///     nonce: 15,
///     signed_count: 1,
///     confirmations_required: 2,
///     confirmed_owners: vec!["confirmation-0".to_string()],
///     missing_signers: Some(vec!["0xBB".to_string()]),
///     id: "multisig_0xsafe_15".to_string(),
///     note: None,
///     wallet_address: "0xsafe".to_string(),
/// };
/// let owners = vec!["0xAA".to_string(), "0xBB".to_string()];
///
/// let partition = partition_signers(&tx, &owners);
/// assert_eq!(partition.source, PartitionSource::MissingSigners);
/// assert_eq!(partition.signed, vec!["0xaa"]);
/// assert_eq!(partition.unsigned, vec!["0xbb"]);
/// ```
pub fn partition_signers(tx: &QueuedTransaction, owners: &[String]) -> SignerPartition {
    if let Some(missing) = tx.explicit_missing_signers() {
        let unsigned: Vec<String> = missing.iter().map(|a| normalise(a)).collect();
        let missing_set: HashSet<&str> = unsigned.iter().map(String::as_str).collect();
        let signed = owners
            .iter()
            .map(|owner| normalise(owner))
            .filter(|owner| !missing_set.contains(owner.as_str()))
            .collect();
        return SignerPartition {
            signed,
            unsigned,
            source: PartitionSource::MissingSigners,
        };
    }

    let confirmed: HashSet<String> = tx.confirmed_owners.iter().map(|a| normalise(a)).collect();
    let (signed, unsigned): (Vec<String>, Vec<String>) = owners
        .iter()
        .map(|owner| normalise(owner))
        .partition(|owner| confirmed.contains(owner));

    let unresolved = tx.has_placeholder_confirmations() || (tx.signed_count > 0 && signed.is_empty());

    SignerPartition {
        signed,
        unsigned,
        source: if unresolved {
            PartitionSource::Unresolved
        } else {
            PartitionSource::Confirmations
        },
    }
}
