use serde::{Deserialize, Serialize};

/// Prefix of the synthetic entries used for `confirmed_owners` when the
/// service does not name who confirmed
pub const PLACEHOLDER_PREFIX: &str = "confirmation-";

/// A pending multisig transaction as reported by the transaction service
///
/// `signed_count` is the authoritative number of submitted confirmations.
/// `confirmed_owners` may hold placeholder entries rather than real signer
/// addresses when the service does not expose confirmation identities, so its
/// length is not guaranteed to match `signed_count`'s meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedTransaction {
    pub nonce: u64,
    pub signed_count: u32,
    pub confirmations_required: u32,
    pub confirmed_owners: Vec<String>,
    pub missing_signers: Option<Vec<String>>,
    pub id: String,
    pub note: Option<String>,
    pub wallet_address: String,
}

impl QueuedTransaction {
    /// Explicit missing-signer list, if the service supplied a non-empty one
    pub fn explicit_missing_signers(&self) -> Option<&[String]> {
        self.missing_signers
            .as_deref()
            .filter(|signers| !signers.is_empty())
    }

    /// `confirmed_owners` holds synthetic entries instead of signer addresses
    pub fn has_placeholder_confirmations(&self) -> bool {
        self.confirmed_owners
            .iter()
            .any(|entry| entry.starts_with(PLACEHOLDER_PREFIX))
    }
}
