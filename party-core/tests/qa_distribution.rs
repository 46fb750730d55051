//! QA tests for coin and experience distribution.
//!
//! These exercise the session end to end over an in-memory store and check
//! the conservation, fairness and rotation properties across many random
//! distributions.
//! Run with: `cargo test -p party-core --test qa_distribution`

use party_core::testing::{assert_fair_split, assert_priorities_permutation, TestHarness};
use party_core::{Denomination, Purse, RulesError, SessionError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_purse(rng: &mut StdRng) -> Purse {
    Denomination::ALL
        .into_iter()
        .map(|d| (d, rng.gen_range(0..50u32)))
        .collect()
}

// =============================================================================
// TEST 1: Reference scenario
// =============================================================================

#[test]
fn test_reference_scenario_three_members() {
    let mut harness = TestHarness::sample();
    harness.coins([10, 8, 7, 5, 3]).expect("distribution should succeed");

    assert_eq!(harness.coins_of("Keg"), [4, 3, 2, 2, 1]);
    assert_eq!(harness.coins_of("Rowan"), [3, 2, 3, 2, 1]);
    assert_eq!(harness.coins_of("Fred"), [3, 3, 2, 1, 1]);
}

// =============================================================================
// TEST 2: Conservation, fairness and rotation over random rounds
// =============================================================================

#[test]
fn test_random_rounds_conserve_and_stay_fair() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for party_size in 1..=6 {
        let mut harness = TestHarness::new();
        for idx in 0..party_size {
            harness.add(&format!("Member {idx}"));
        }

        for _ in 0..40 {
            let before = harness.party().clone();
            let purse = random_purse(&mut rng);

            harness.session.distribute_coins(&purse).unwrap();

            assert_fair_split(&before, harness.party(), &purse);
            assert_priorities_permutation(harness.party());
        }
    }
}

// =============================================================================
// TEST 3: Rotation spreads remainders evenly over time
// =============================================================================

#[test]
fn test_single_coins_rotate_through_everyone() {
    let mut harness = TestHarness::new();
    harness.add("A").add("B").add("C").add("D");

    // One copper per call; each call rotates five times.
    for _ in 0..40 {
        harness.coins([0, 0, 0, 0, 1]).unwrap();
    }

    let totals: Vec<u32> = ["A", "B", "C", "D"]
        .iter()
        .map(|name| harness.coins_of(name)[4])
        .collect();
    assert_eq!(totals.iter().sum::<u32>(), 40);
    for total in &totals {
        assert_eq!(*total, 10, "uneven rotation: {totals:?}");
    }
}

#[test]
fn test_omitted_denominations_still_rotate() {
    let mut harness = TestHarness::sample();
    let gold_only = Purse::new().with(Denomination::Gold, 1);
    harness.session.distribute_coins(&gold_only).unwrap();

    // Five rotations over three members.
    assert_eq!(harness.member("Keg").coin_priority, 2);
    assert_eq!(harness.member("Rowan").coin_priority, 0);
    assert_eq!(harness.member("Fred").coin_priority, 1);
    // Gold is the second denomination, handled after one rotation.
    assert_eq!(harness.coins_of("Fred")[1], 1);
}

// =============================================================================
// TEST 4: Empty roster is an idempotent no-op
// =============================================================================

#[test]
fn test_empty_roster_is_noop() {
    let mut harness = TestHarness::new();
    let saved_before = harness.store.saved();

    let coins = harness.coins([1, 2, 3, 4, 5]).unwrap_err();
    let xp = harness.xp(100).unwrap_err();

    assert!(matches!(coins, SessionError::Rules(RulesError::NoActiveMembers)));
    assert!(matches!(xp, SessionError::Rules(RulesError::NoActiveMembers)));
    assert!(harness.party().is_empty());
    assert_eq!(harness.store.saved(), saved_before);
    assert_eq!(harness.store.save_count(), 0);
}

#[test]
fn test_all_members_inactive_is_noop() {
    let mut harness = TestHarness::sample();
    for name in ["Keg", "Rowan", "Fred"] {
        harness.session.toggle_member(name).unwrap();
    }
    let before = harness.party().clone();

    assert!(harness.coins([5, 5, 5, 5, 5]).is_err());
    assert_eq!(harness.party(), &before);
}

// =============================================================================
// TEST 5: Experience
// =============================================================================

#[test]
fn test_two_members_split_xp_evenly() {
    let mut harness = TestHarness::new();
    harness.add("Alice").add("Bob");
    harness.xp(100).unwrap();

    assert_eq!(harness.member("Alice").xp, 50);
    assert_eq!(harness.member("Bob").xp, 50);
}

#[test]
fn test_xp_remainder_dropped() {
    let mut harness = TestHarness::sample();
    harness.xp(11).unwrap();

    for name in ["Keg", "Rowan", "Fred"] {
        assert_eq!(harness.member(name).xp, 3);
    }
}

#[test]
fn test_levels_never_decrease_or_exceed_max() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut harness = TestHarness::sample();
    let mut last_levels = [1u8; 3];

    for _ in 0..200 {
        let award = rng.gen_range(0..20_000);
        harness.xp(award).unwrap();

        for (idx, name) in ["Keg", "Rowan", "Fred"].iter().enumerate() {
            let member = harness.member(name);
            assert!(member.level >= last_levels[idx]);
            assert!(member.level <= party_core::progression::MAX_LEVEL);
            assert_eq!(
                member.level,
                party_core::progression::level_for_xp(member.xp)
            );
            last_levels[idx] = member.level;
        }
    }
}

#[test]
fn test_single_award_multi_level_notifications() {
    let mut harness = TestHarness::new();
    harness.add("Solo");

    let response = harness.xp(7000).unwrap();
    let reached: Vec<u8> = response
        .level_ups()
        .map(|(name, level)| {
            assert_eq!(name, "Solo");
            level
        })
        .collect();

    assert_eq!(reached, vec![2, 3, 4, 5]);
    assert_eq!(harness.member("Solo").level, 5);
}
