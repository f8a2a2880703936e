//! Message rendering
//!
//! Turns aggregated wallet results into summary text. Output is a pure
//! function of the inputs: no clocks, no hash-order iteration.

use crate::monitor::status::{partition_signers, readiness_tier};
use crate::types::{find_alias, AggregatedWalletResult, DisplayOptions, QueuedTransaction, SignerAlias};
use crate::utils::address::{normalise, shorten};
use std::collections::{HashMap, HashSet};

pub const NOTE_MARKER: &str = "📝";
pub const SIGNED_MARKER: &str = "✍️";
pub const PENDING_MARKER: &str = "⏳";
pub const LINK_MARKER: &str = "🔗";
pub const SUMMARY_MARKER: &str = "@";
pub const UNRESOLVED_MARKER: &str = "❔";

/// Rendered lines plus the global signer-deficit tally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedOutput {
    pub messages: Vec<String>,
    pub signer_summary: HashMap<String, usize>,
}

/// Outstanding signatures per signer across every wallet of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerTally {
    counts: HashMap<String, usize>,
}

impl SignerTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count each address in the transaction's missing-signer list once
    pub fn record(&mut self, tx: &QueuedTransaction) {
        let Some(missing) = tx.explicit_missing_signers() else {
            return;
        };
        let unique: HashSet<String> = missing.iter().map(|a| normalise(a)).collect();
        for address in unique {
            *self.counts.entry(address).or_insert(0) += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, address: &str) -> usize {
        self.counts.get(&normalise(address)).copied().unwrap_or(0)
    }

    /// Entries by descending count, ties broken by address
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(address, count)| (address.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// One line per signer with outstanding signatures
    ///
    /// # Arguments
    /// * `aliases` - Handles substituted for matching addresses
    ///
    /// # Returns
    /// `@{name}: N pending signature(s)` lines in `ranked()` order
    ///
    /// # Example
    /// ```
    /// use safe_queue_monitor::monitor::SignerTally;
    /// use safe_queue_monitor::types::{QueuedTransaction, SignerAlias};
    ///
    /// let tx = QueuedTransaction {
    ///     nonce: 3,
    ///     signed_count: 0,
    ///     confirmations_required: 2,
    ///     confirmed_owners: Vec::new(),
    ///     missing_signers: Some(vec!["0xAAAA000000000000000000000000000000000001".to_string()]),
    ///     id: "multisig_0xsafe_3".to_string(),
    ///     note: None,
    ///     wallet_address: "0xsafe".to_string(),
    /// };
    /// let mut tally = SignerTally::new();
    /// tally.record(&tx);
    ///
    /// assert_eq!(tally.summary_lines(&[]), vec!["@0xaaaa...0001: 1 pending signature"]);
    ///
    /// let aliases = vec![SignerAlias::new("0xaaaa000000000000000000000000000000000001", "alice")];
    /// assert_eq!(tally.summary_lines(&aliases), vec!["@alice: 1 pending signature"]);
    /// ```
    pub fn summary_lines(&self, aliases: &[SignerAlias]) -> Vec<String> {
        self.ranked()
            .into_iter()
            .map(|(address, count)| {
                format!(
                    "{}{}: {} pending signature{}",
                    SUMMARY_MARKER,
                    display_address(address, aliases),
                    count,
                    if count == 1 { "" } else { "s" }
                )
            })
            .collect()
    }

    pub fn into_map(self) -> HashMap<String, usize> {
        self.counts
    }
}

/// Alias handle when one matches, otherwise the shortened address
pub fn display_address(address: &str, aliases: &[SignerAlias]) -> String {
    match find_alias(aliases, address) {
        Some(alias) => alias.bare_handle().to_string(),
        None => shorten(address),
    }
}

fn display_list(addresses: &[String], aliases: &[SignerAlias]) -> String {
    addresses
        .iter()
        .map(|address| display_address(address, aliases))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Header, optional note and optional signer lines for one transaction
///
/// Signer lines need ownership data. When the confirmations cannot be tied
/// to owners a single `UNRESOLVED_MARKER` line replaces them.
pub fn format_transaction(
    result: &AggregatedWalletResult,
    tx: &QueuedTransaction,
    aliases: &[SignerAlias],
    options: &DisplayOptions,
) -> String {
    let mut header = Vec::new();
    if options.show_chain_icon {
        header.push(result.chain.icon().to_string());
    }
    header.push(result.chain.name().to_uppercase());
    header.push(format!("#{}", tx.nonce));
    if options.show_status_icon {
        header.push(
            readiness_tier(tx.signed_count, tx.confirmations_required)
                .icon()
                .to_string(),
        );
    }
    header.push(format!("`{}/{}`", tx.signed_count, tx.confirmations_required));

    let mut lines = vec![header.join(" ")];

    if options.show_tx_note {
        if let Some(note) = &tx.note {
            lines.push(format!("{} {}", NOTE_MARKER, note));
        }
    }

    // Without ownership data the signer split is skipped, not estimated
    if let Some(info) = &result.wallet_info {
        let partition = partition_signers(tx, &info.owners);
        if !partition.is_resolved() {
            if options.needs_ownership() {
                lines.push(format!("{} Signer identities unavailable", UNRESOLVED_MARKER));
            }
            return lines.join("\n");
        }
        if options.show_confirmed_signer && !partition.signed.is_empty() {
            lines.push(format!(
                "{} Signed: {}",
                SIGNED_MARKER,
                display_list(&partition.signed, aliases)
            ));
        }
        if options.show_pending_signer && !partition.unsigned.is_empty() {
            lines.push(format!(
                "{} Pending: {}",
                PENDING_MARKER,
                display_list(&partition.unsigned, aliases)
            ));
        }
    }

    lines.join("\n")
}

/// Render every wallet section into `messages`, feeding `tally` as it goes
pub fn format_wallet(
    result: &AggregatedWalletResult,
    aliases: &[SignerAlias],
    options: &DisplayOptions,
    tally: &mut SignerTally,
    messages: &mut Vec<String>,
) {
    for tx in &result.transactions {
        messages.push(format_transaction(result, tx, aliases, options));
        tally.record(tx);
    }
    messages.push(format!("{} {}", LINK_MARKER, result.wallet_url));
}

/// Render every wallet and append the signer-deficit summary
///
/// # Arguments
/// * `results` - Aggregated wallets, in output order
/// * `aliases` - Handles substituted for matching addresses
/// * `options` - Which parts of each transaction block to render
///
/// # Returns
/// Messages (transaction blocks, then each wallet's link, then summary lines)
/// and the per-signer counts keyed by lowercased address
///
/// # Example
/// ```
/// use safe_queue_monitor::monitor::format_results;
/// use safe_queue_monitor::types::DisplayOptions;
///
/// let output = format_results(&[], &[], &DisplayOptions::default());
/// assert!(output.messages.is_empty());
/// assert!(output.signer_summary.is_empty());
/// ```
pub fn format_results(
    results: &[AggregatedWalletResult],
    aliases: &[SignerAlias],
    options: &DisplayOptions,
) -> FormattedOutput {
    let mut tally = SignerTally::new();
    let mut messages = Vec::new();

    for result in results {
        format_wallet(result, aliases, options, &mut tally, &mut messages);
    }

    if !tally.is_empty() {
        messages.extend(tally.summary_lines(aliases));
    }

    FormattedOutput {
        messages,
        signer_summary: tally.into_map(),
    }
}
