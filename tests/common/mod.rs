//! Common Test Utilities
//!
//! Shared fixtures and an in-memory transaction service used across the unit
//! and integration suites so tests never touch the network unless they run a
//! local mock server.

#![allow(dead_code)]


pub use mock_service::MockSafeService;

/// Well-formed addresses used across tests
pub mod addresses {
    pub const SAFE_A: &str = "0x52908400098527886E0F7030069857D2E4169EE7";
    pub const SAFE_B: &str = "0x8617E340B3D01FA5F11F306F4090FD50E238070D";
    pub const SAFE_C: &str = "0xde709f2102306220921060314715629080e2fb77";

    pub const ALICE: &str = "0xAAAA000000000000000000000000000000000001";
    pub const BOB: &str = "0xBBBB000000000000000000000000000000000002";
    pub const CAROL: &str = "0xCCCC000000000000000000000000000000000003";
}

/// Test fixture utilities
pub mod fixtures {
    use super::addresses::{ALICE, BOB, CAROL};
    use safe_queue_monitor::types::{QueuedTransaction, SignerAlias, WalletInfo};

    /// Queued transaction with an explicit missing-signer list
    pub fn pending_tx(
        wallet: &str,
        nonce: u64,
        signed: u32,
        required: u32,
        missing: &[&str],
    ) -> QueuedTransaction {
        QueuedTransaction {
            nonce,
            signed_count: signed,
            confirmations_required: required,
            confirmed_owners: (0..signed).map(|n| format!("confirmation-{}", n)).collect(),
            missing_signers: Some(missing.iter().map(|s| s.to_string()).collect()),
            id: format!("multisig_{}_{}", wallet, nonce),
            note: None,
            wallet_address: wallet.to_string(),
        }
    }

    /// Queued transaction whose confirmations name real owners
    pub fn confirmed_tx(
        wallet: &str,
        nonce: u64,
        required: u32,
        confirmed: &[&str],
    ) -> QueuedTransaction {
        QueuedTransaction {
            nonce,
            signed_count: confirmed.len() as u32,
            confirmations_required: required,
            confirmed_owners: confirmed.iter().map(|s| s.to_string()).collect(),
            missing_signers: Some(Vec::new()),
            id: format!("multisig_{}_{}", wallet, nonce),
            note: None,
            wallet_address: wallet.to_string(),
        }
    }

    /// Alice, Bob and Carol with a 2-of-3 threshold
    pub fn three_owners() -> WalletInfo {
        WalletInfo {
            owners: vec![ALICE.to_string(), BOB.to_string(), CAROL.to_string()],
            threshold: 2,
        }
    }

    pub fn aliases() -> Vec<SignerAlias> {
        vec![
            SignerAlias::new(ALICE.to_lowercase(), "alice"),
            SignerAlias::new(BOB, "@bob"),
        ]
    }
}
