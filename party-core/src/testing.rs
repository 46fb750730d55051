//! Testing utilities for the roster engine.
//!
//! - `TestHarness` wraps a session over an in-memory store
//! - `create_sample_party` builds the three-member party used across tests
//! - Assertion helpers check the distribution invariants

use crate::coins::{Denomination, Purse};
use crate::party::{Member, Party};
use crate::persist::MemoryStore;
use crate::session::{PartySession, Response, SessionError};

/// Three active level-1 members with priorities 0, 1, 2.
pub fn create_sample_party() -> Party {
    Party {
        active: ["Keg", "Rowan", "Fred"]
            .iter()
            .enumerate()
            .map(|(idx, name)| Member::new(*name).with_level(1).with_priority(idx as u32))
            .collect(),
        inactive: Vec::new(),
    }
}

/// Test harness for running roster scenarios.
pub struct TestHarness {
    /// The session under test.
    pub session: PartySession,
    /// Shared handle to what the session has saved.
    pub store: MemoryStore,
}

impl TestHarness {
    /// Create a harness with an empty party.
    pub fn new() -> Self {
        Self::with_party(Party::new())
    }

    /// Create a harness whose store already holds `party`.
    pub fn with_party(party: Party) -> Self {
        let store = MemoryStore::with_party(party);
        let (session, _) = PartySession::with_store(store.clone(), true);
        Self { session, store }
    }

    /// Create a harness with the sample party.
    pub fn sample() -> Self {
        Self::with_party(create_sample_party())
    }

    /// Add a member with no experience or coins.
    pub fn add(&mut self, name: &str) -> &mut Self {
        self.session
            .add_member(name, 0, Purse::new())
            .unwrap_or_else(|e| panic!("adding {name} failed: {e}"));
        self
    }

    /// Distribute coins given in canonical order.
    pub fn coins(&mut self, amounts: [u32; 5]) -> Result<Response, SessionError> {
        let purse: Purse = Denomination::ALL.into_iter().zip(amounts).collect();
        self.session.distribute_coins(&purse)
    }

    /// Distribute experience.
    pub fn xp(&mut self, amount: u32) -> Result<Response, SessionError> {
        self.session.distribute_experience(amount)
    }

    /// Look up a member in either group.
    pub fn member(&self, name: &str) -> &Member {
        self.session
            .party()
            .find(name)
            .unwrap_or_else(|| panic!("no member named {name}"))
    }

    /// A member's balances in canonical order.
    pub fn coins_of(&self, name: &str) -> [u32; 5] {
        let member = self.member(name);
        Denomination::ALL.map(|d| member.coins.get(d))
    }

    pub fn party(&self) -> &Party {
        self.session.party()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert active priorities form a permutation of `0..n`.
#[track_caller]
pub fn assert_priorities_permutation(party: &Party) {
    let priorities: Vec<u32> = party.active.iter().map(|m| m.coin_priority).collect();
    assert!(
        party.priorities_are_permutation(),
        "Expected active priorities to be a permutation of 0..{}, got {priorities:?}",
        party.active.len()
    );
}

/// Assert one distribution added exactly `distributed` and split it fairly.
///
/// `before` and `after` must list the same active members in the same order.
#[track_caller]
pub fn assert_fair_split(before: &Party, after: &Party, distributed: &Purse) {
    for denomination in Denomination::ALL {
        let gains: Vec<u32> = before
            .active
            .iter()
            .zip(&after.active)
            .map(|(b, a)| a.coins.get(denomination) - b.coins.get(denomination))
            .collect();

        let total: u64 = gains.iter().map(|&g| u64::from(g)).sum();
        assert_eq!(
            total,
            u64::from(distributed.get(denomination)),
            "{denomination}: expected {} distributed, gains were {gains:?}",
            distributed.get(denomination)
        );

        let min = gains.iter().min().copied().unwrap_or(0);
        let max = gains.iter().max().copied().unwrap_or(0);
        assert!(
            max - min <= 1,
            "{denomination}: gains differ by more than one: {gains:?}"
        );
    }
}

/// Assert a member's level.
#[track_caller]
pub fn assert_level(harness: &TestHarness, name: &str, level: u8) {
    let actual = harness.member(name).level;
    assert_eq!(actual, level, "Expected {name} at level {level}, got {actual}");
}
