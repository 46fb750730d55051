//! Party roster types.
//!
//! A [`Party`] holds two disjoint ordered groups of [`Member`]s. Only active
//! members take part in distributions; inactive members keep their purse and
//! experience until they rejoin.

use crate::coins::{Denomination, Purse};
use crate::progression;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Member
// ============================================================================

/// A party member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub coins: Purse,
    /// Position in the remainder queue; 0 receives the next extra coin.
    #[serde(default)]
    pub coin_priority: u32,
}

impl Member {
    /// Create a member at level 0 with no experience or coins.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 0,
            xp: 0,
            coins: Purse::new(),
            coin_priority: 0,
        }
    }

    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp = xp;
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_coins(mut self, coins: Purse) -> Self {
        self.coins = coins;
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.coin_priority = priority;
        self
    }

    /// XP still needed for the next level, `None` at max level.
    pub fn xp_to_next_level(&self) -> Option<u32> {
        progression::xp_to_next_level(self.level, self.xp)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Level {}) - XP: {}, Wallet: {}",
            self.name, self.level, self.xp, self.coins
        )
    }
}

// ============================================================================
// Group
// ============================================================================

/// Which roster collection a member lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Active,
    Inactive,
}

impl Group {
    /// The group a member moves to when toggled out of this one.
    pub fn other(&self) -> Group {
        match self {
            Group::Active => Group::Inactive,
            Group::Inactive => Group::Active,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Active => write!(f, "Active"),
            Group::Inactive => write!(f, "Inactive"),
        }
    }
}

// ============================================================================
// Party
// ============================================================================

/// The complete roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    #[serde(default)]
    pub active: Vec<Member>,
    #[serde(default)]
    pub inactive: Vec<Member>,
}

impl Party {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, group: Group) -> &[Member] {
        match group {
            Group::Active => &self.active,
            Group::Inactive => &self.inactive,
        }
    }

    pub fn group_mut(&mut self, group: Group) -> &mut Vec<Member> {
        match group {
            Group::Active => &mut self.active,
            Group::Inactive => &mut self.inactive,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.inactive.is_empty()
    }

    /// Every member, active first.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.active.iter().chain(self.inactive.iter())
    }

    pub fn find(&self, name: &str) -> Option<&Member> {
        self.members().find(|m| m.name == name)
    }

    pub fn find_active_mut(&mut self, name: &str) -> Option<&mut Member> {
        self.active.iter_mut().find(|m| m.name == name)
    }

    /// The group holding a member with this name.
    pub fn group_of(&self, name: &str) -> Option<Group> {
        if self.active.iter().any(|m| m.name == name) {
            Some(Group::Active)
        } else if self.inactive.iter().any(|m| m.name == name) {
            Some(Group::Inactive)
        } else {
            None
        }
    }

    /// Indices into `active` ordered by ascending coin priority.
    ///
    /// Ties keep roster order.
    pub fn priority_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.active.len()).collect();
        order.sort_by_key(|&idx| self.active[idx].coin_priority);
        order
    }

    /// The active member who receives the next remainder coin.
    pub fn next_in_line(&self) -> Option<&Member> {
        self.priority_order().first().map(|&idx| &self.active[idx])
    }

    /// Re-rank active priorities to `0..n`, keeping their relative order.
    pub fn normalize_priorities(&mut self) {
        for (rank, idx) in self.priority_order().into_iter().enumerate() {
            self.active[idx].coin_priority = rank as u32;
        }
    }

    /// Whether active priorities are exactly a permutation of `0..n`.
    pub fn priorities_are_permutation(&self) -> bool {
        let mut seen: Vec<u32> = self.active.iter().map(|m| m.coin_priority).collect();
        seen.sort_unstable();
        seen.iter().enumerate().all(|(idx, &p)| p == idx as u32)
    }

    /// Per-denomination totals across active members.
    pub fn active_totals(&self) -> Purse {
        let mut totals = Purse::new();
        for member in &self.active {
            for denomination in Denomination::ALL {
                totals.add(denomination, member.coins.get(denomination));
            }
        }
        totals
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Party Members ===")?;
        if self.active.is_empty() {
            writeln!(f, "(no active members)")?;
        }
        for member in &self.active {
            writeln!(f, "{member}")?;
        }
        if !self.inactive.is_empty() {
            writeln!(f, "--- Inactive ---")?;
            for member in &self.inactive {
                writeln!(f, "{member}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_member_party() -> Party {
        Party {
            active: vec![
                Member::new("Keg").with_priority(2),
                Member::new("Rowan").with_priority(0),
                Member::new("Fred").with_priority(1),
            ],
            inactive: vec![Member::new("Ghost")],
        }
    }

    #[test]
    fn test_priority_order_and_next_in_line() {
        let party = three_member_party();
        assert_eq!(party.priority_order(), vec![1, 2, 0]);
        assert_eq!(party.next_in_line().map(|m| m.name.as_str()), Some("Rowan"));
    }

    #[test]
    fn test_next_in_line_empty() {
        assert!(Party::new().next_in_line().is_none());
    }

    #[test]
    fn test_group_of() {
        let party = three_member_party();
        assert_eq!(party.group_of("Fred"), Some(Group::Active));
        assert_eq!(party.group_of("Ghost"), Some(Group::Inactive));
        assert_eq!(party.group_of("Nobody"), None);
    }

    #[test]
    fn test_normalize_priorities_closes_gaps() {
        let mut party = Party {
            active: vec![
                Member::new("A").with_priority(7),
                Member::new("B").with_priority(2),
                Member::new("C").with_priority(2),
            ],
            inactive: vec![],
        };
        assert!(!party.priorities_are_permutation());

        party.normalize_priorities();

        assert!(party.priorities_are_permutation());
        // B and C tie; roster order breaks the tie.
        assert_eq!(party.active[1].coin_priority, 0);
        assert_eq!(party.active[2].coin_priority, 1);
        assert_eq!(party.active[0].coin_priority, 2);
    }

    #[test]
    fn test_active_totals_ignores_inactive() {
        let mut party = three_member_party();
        party.active[0].coins.add(Denomination::Gold, 4);
        party.active[2].coins.add(Denomination::Gold, 1);
        party.inactive[0].coins.add(Denomination::Gold, 100);

        assert_eq!(party.active_totals().get(Denomination::Gold), 5);
    }

    #[test]
    fn test_member_deserializes_with_missing_fields() {
        let member: Member = serde_json::from_str(r#"{"name":"Lia"}"#).unwrap();
        assert_eq!(member.name, "Lia");
        assert_eq!(member.level, 0);
        assert!(member.coins.is_empty());
    }
}
