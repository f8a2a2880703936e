//! Status Resolver Tests
//!
//! Readiness tier boundaries across thresholds and the two signer
//! partition paths (explicit missing signers vs confirmation fallback).

use safe_queue_monitor::monitor::{partition_signers, readiness_tier, PartitionSource, ReadinessTier};
use std::collections::HashSet;

use crate::common::addresses::{ALICE, BOB, CAROL, SAFE_A};
use crate::common::fixtures::{confirmed_tx, pending_tx, three_owners};

#[test]
fn test_full_signatures_always_ready() {
    for required in 0..=25 {
        assert_eq!(readiness_tier(required, required), ReadinessTier::Ready);
    }
}

#[test]
fn test_tiers_match_seventy_percent_ceiling() {
    for required in 1..=30u32 {
        let nearly = (required as f64 * 0.7).ceil() as u32;
        for signed in 0..required {
            let expected = if signed >= nearly {
                ReadinessTier::NearlyReady
            } else {
                ReadinessTier::NeedsAttention
            };
            assert_eq!(
                readiness_tier(signed, required),
                expected,
                "signed={} required={}",
                signed,
                required
            );
        }
    }
}

#[test]
fn test_off_by_one_boundaries() {
    // T=3: ceil(2.1) = 3, so nearly-ready is unreachable below the threshold
    assert_eq!(readiness_tier(2, 3), ReadinessTier::NeedsAttention);
    assert_eq!(readiness_tier(3, 3), ReadinessTier::Ready);

    // T=4: ceil(2.8) = 3
    assert_eq!(readiness_tier(3, 4), ReadinessTier::NearlyReady);
    assert_eq!(readiness_tier(2, 4), ReadinessTier::NeedsAttention);

    // T=5: ceil(3.5) = 4
    assert_eq!(readiness_tier(4, 5), ReadinessTier::NearlyReady);
    assert_eq!(readiness_tier(3, 5), ReadinessTier::NeedsAttention);

    // T=10: ceil(7.0) = 7
    assert_eq!(readiness_tier(7, 10), ReadinessTier::NearlyReady);
    assert_eq!(readiness_tier(6, 10), ReadinessTier::NeedsAttention);
}

#[test]
fn test_tier_labels() {
    assert_eq!(ReadinessTier::Ready.label(), "ready");
    assert_eq!(ReadinessTier::NearlyReady.label(), "nearly-ready");
    assert_eq!(ReadinessTier::NeedsAttention.label(), "needs-attention");
}

#[test]
fn test_missing_signers_returned_exactly() {
    let tx = pending_tx(SAFE_A, 15, 1, 3, &[CAROL, BOB]);
    let partition = partition_signers(&tx, &three_owners().owners);

    assert_eq!(partition.source, PartitionSource::MissingSigners);
    assert_eq!(
        partition.unsigned,
        vec![CAROL.to_lowercase(), BOB.to_lowercase()]
    );
    assert_eq!(partition.signed, vec![ALICE.to_lowercase()]);
}

#[test]
fn test_missing_signers_not_in_owner_list_still_reported() {
    let outsider = "0xDDDD000000000000000000000000000000000004";
    let tx = pending_tx(SAFE_A, 1, 2, 3, &[outsider]);
    let partition = partition_signers(&tx, &three_owners().owners);

    assert_eq!(partition.unsigned, vec![outsider.to_lowercase()]);
    assert_eq!(partition.signed.len(), 3);
}

#[test]
fn test_confirmation_fallback_partitions_owner_set() {
    let owners = three_owners().owners;
    let confirmations: [&[&str]; 4] = [&[], &[ALICE], &[ALICE, CAROL], &[ALICE, BOB, CAROL]];

    for confirmed in confirmations {
        let lowered: Vec<String> = confirmed.iter().map(|a| a.to_lowercase()).collect();
        let as_refs: Vec<&str> = lowered.iter().map(String::as_str).collect();
        let tx = confirmed_tx(SAFE_A, 1, 2, &as_refs);
        let partition = partition_signers(&tx, &owners);

        assert_eq!(partition.source, PartitionSource::Confirmations);

        let signed: HashSet<&String> = partition.signed.iter().collect();
        let unsigned: HashSet<&String> = partition.unsigned.iter().collect();
        assert!(signed.is_disjoint(&unsigned));

        let union: HashSet<String> = partition
            .signed
            .iter()
            .chain(partition.unsigned.iter())
            .cloned()
            .collect();
        let all: HashSet<String> = owners.iter().map(|o| o.to_lowercase()).collect();
        assert_eq!(union, all);
        assert_eq!(partition.signed.len(), confirmed.len());
    }
}

#[test]
fn test_absent_missing_list_uses_fallback() {
    let mut tx = confirmed_tx(SAFE_A, 1, 2, &[BOB]);
    tx.missing_signers = None;
    let partition = partition_signers(&tx, &three_owners().owners);

    assert_eq!(partition.source, PartitionSource::Confirmations);
    assert_eq!(partition.signed, vec![BOB.to_lowercase()]);
}
