//! Distribution rules with an Intent/Effect pipeline.
//!
//! 1. The shell builds an [`Intent`] (what the table wants to happen)
//! 2. [`RulesEngine`] resolves it against the current [`Party`]
//! 3. The [`Resolution`] lists [`Effect`]s describing every state change
//! 4. [`apply_effects`] writes those effects into the party
//!
//! Resolving never mutates, so a rejected intent leaves the roster untouched
//! and the effect list doubles as the notification feed for the UI.

use crate::coins::{Denomination, Purse};
use crate::party::{Group, Member, Party};
use crate::progression;
use thiserror::Error;
use tracing::debug;

/// Reasons an intent is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("No active members to distribute to")]
    NoActiveMembers,

    #[error("Member name cannot be empty")]
    EmptyName,

    #[error("A member named {0} is already in the party")]
    DuplicateName(String),

    #[error("No member named {name} in the {group} group")]
    MemberNotFound { name: String, group: Group },

    #[error("{member} cannot hold that much {denomination}")]
    CoinOverflow {
        member: String,
        denomination: Denomination,
    },

    #[error("{member} cannot hold that much experience")]
    ExperienceOverflow { member: String },
}

/// Something the party wants to do.
#[derive(Debug, Clone)]
pub enum Intent {
    /// Add a new member to the active group
    AddMember {
        name: String,
        experience: u32,
        coins: Purse,
    },

    /// Split coins among active members
    DistributeCoins { coins: Purse },

    /// Split experience among active members
    DistributeExperience { amount: u32 },

    /// Move a member out of `from` into the other group
    ChangeGroup { name: String, from: Group },
}

/// The result of resolving an intent.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub effects: Vec<Effect>,
    pub narrative: String,
}

impl Resolution {
    pub fn new(narrative: impl Into<String>) -> Self {
        Self {
            effects: Vec::new(),
            narrative: narrative.into(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Concrete state changes produced by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A member joined the active group
    MemberJoined { member: Member },

    /// A member moved between groups
    MemberMoved {
        member: String,
        from: Group,
        to: Group,
        coin_priority: u32,
    },

    /// A member received coins of one denomination
    CoinsAwarded {
        member: String,
        denomination: Denomination,
        amount: u32,
    },

    /// Every active member's coin priority advanced by one
    PrioritiesRotated { denomination: Denomination },

    /// A member gained experience
    ExperienceGained {
        member: String,
        amount: u32,
        new_total: u32,
    },

    /// A member reached a new level
    LevelUp { member: String, new_level: u8 },
}

/// The rules engine resolves intents into effects.
pub struct RulesEngine;

impl RulesEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resolve an intent and produce effects.
    pub fn resolve(&self, party: &Party, intent: Intent) -> Result<Resolution, RulesError> {
        match intent {
            Intent::AddMember {
                name,
                experience,
                coins,
            } => self.resolve_add_member(party, &name, experience, coins),
            Intent::DistributeCoins { coins } => self.resolve_distribute_coins(party, &coins),
            Intent::DistributeExperience { amount } => {
                self.resolve_distribute_experience(party, amount)
            }
            Intent::ChangeGroup { name, from } => self.resolve_change_group(party, &name, from),
        }
    }

    fn resolve_add_member(
        &self,
        party: &Party,
        name: &str,
        experience: u32,
        coins: Purse,
    ) -> Result<Resolution, RulesError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RulesError::EmptyName);
        }
        if party.find(name).is_some() {
            return Err(RulesError::DuplicateName(name.to_string()));
        }

        let member = Member {
            name: name.to_string(),
            level: progression::level_for_xp(experience),
            xp: experience,
            coins,
            coin_priority: party.active.len() as u32,
        };

        Ok(Resolution::new(format!("Welcome to the party {name}!"))
            .with_effect(Effect::MemberJoined { member }))
    }

    fn resolve_distribute_coins(
        &self,
        party: &Party,
        coins: &Purse,
    ) -> Result<Resolution, RulesError> {
        let n = party.active.len();
        if n == 0 {
            return Err(RulesError::NoActiveMembers);
        }

        // Simulate the rotation locally so each denomination sees the
        // priorities left behind by the previous one.
        let mut priorities: Vec<u32> = party.active.iter().map(|m| m.coin_priority).collect();
        let mut effects = Vec::new();

        for denomination in Denomination::ALL {
            let amount = coins.get(denomination);
            let share = amount / n as u32;
            let remainder = (amount % n as u32) as usize;

            let mut order: Vec<usize> = (0..n).collect();
            order.sort_by_key(|&idx| priorities[idx]);

            let mut awarded = vec![share; n];
            for &idx in order.iter().take(remainder) {
                awarded[idx] += 1;
            }

            debug!(
                %denomination,
                amount, share, remainder, "Splitting coins"
            );

            for (idx, &amount) in awarded.iter().enumerate() {
                let member = &party.active[idx];
                if member.coins.get(denomination).checked_add(amount).is_none() {
                    return Err(RulesError::CoinOverflow {
                        member: member.name.clone(),
                        denomination,
                    });
                }
                if amount > 0 {
                    effects.push(Effect::CoinsAwarded {
                        member: member.name.clone(),
                        denomination,
                        amount,
                    });
                }
            }

            for priority in priorities.iter_mut() {
                *priority = (*priority + 1) % n as u32;
            }
            effects.push(Effect::PrioritiesRotated { denomination });
        }

        let total = coins.coin_count();
        Ok(Resolution::new(format!(
            "Distributed {total} coin{} ({coins}) among {n} member{}.",
            if total == 1 { "" } else { "s" },
            if n == 1 { "" } else { "s" }
        ))
        .with_effects(effects))
    }

    fn resolve_distribute_experience(
        &self,
        party: &Party,
        amount: u32,
    ) -> Result<Resolution, RulesError> {
        let n = party.active.len();
        if n == 0 {
            return Err(RulesError::NoActiveMembers);
        }

        // The remainder is dropped; XP is not split to the last point.
        let each = amount / n as u32;
        let mut effects = Vec::new();

        for member in &party.active {
            let new_total =
                member
                    .xp
                    .checked_add(each)
                    .ok_or_else(|| RulesError::ExperienceOverflow {
                        member: member.name.clone(),
                    })?;
            if each > 0 {
                effects.push(Effect::ExperienceGained {
                    member: member.name.clone(),
                    amount: each,
                    new_total,
                });
            }
            effects.extend(
                progression::level_ups(member.level, new_total)
                    .into_iter()
                    .map(|new_level| Effect::LevelUp {
                        member: member.name.clone(),
                        new_level,
                    }),
            );
        }

        Ok(
            Resolution::new(format!("Each active member gains {each} XP."))
                .with_effects(effects),
        )
    }

    fn resolve_change_group(
        &self,
        party: &Party,
        name: &str,
        from: Group,
    ) -> Result<Resolution, RulesError> {
        if !party.group(from).iter().any(|m| m.name == name) {
            return Err(RulesError::MemberNotFound {
                name: name.to_string(),
                group: from,
            });
        }

        let to = from.other();
        // Tail of the destination after the append.
        let coin_priority = party.group(to).len() as u32;

        Ok(
            Resolution::new(format!("Moving {name} from {from} to {to}."))
                .with_effect(Effect::MemberMoved {
                    member: name.to_string(),
                    from,
                    to,
                    coin_priority,
                }),
        )
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply effects to the party.
pub fn apply_effects(party: &mut Party, effects: &[Effect]) {
    for effect in effects {
        apply_effect(party, effect);
    }
}

/// Apply a single effect to the party.
pub fn apply_effect(party: &mut Party, effect: &Effect) {
    match effect {
        Effect::MemberJoined { member } => {
            party.active.push(member.clone());
        }
        Effect::MemberMoved {
            member,
            from,
            to,
            coin_priority,
        } => {
            let source = party.group_mut(*from);
            let Some(idx) = source.iter().position(|m| m.name == *member) else {
                return;
            };
            let mut moved = source.remove(idx);
            moved.coin_priority = *coin_priority;
            party.group_mut(*to).push(moved);

            if *from == Group::Active {
                party.normalize_priorities();
            }
        }
        Effect::CoinsAwarded {
            member,
            denomination,
            amount,
        } => {
            if let Some(m) = party.find_active_mut(member) {
                m.coins.add(*denomination, *amount);
            }
        }
        Effect::PrioritiesRotated { .. } => {
            let n = party.active.len() as u32;
            if n > 0 {
                for m in party.active.iter_mut() {
                    m.coin_priority = (m.coin_priority + 1) % n;
                }
            }
        }
        Effect::ExperienceGained { member, amount, .. } => {
            if let Some(m) = party.find_active_mut(member) {
                m.xp = m.xp.saturating_add(*amount);
            }
        }
        Effect::LevelUp { member, new_level } => {
            if let Some(m) = party.find_active_mut(member) {
                m.level = m.level.max(*new_level);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party_of(names: &[&str]) -> Party {
        Party {
            active: names
                .iter()
                .enumerate()
                .map(|(idx, name)| Member::new(*name).with_level(1).with_priority(idx as u32))
                .collect(),
            inactive: Vec::new(),
        }
    }

    fn resolve_and_apply(party: &mut Party, intent: Intent) -> Resolution {
        let resolution = RulesEngine::new()
            .resolve(party, intent)
            .expect("intent should resolve");
        apply_effects(party, &resolution.effects);
        resolution
    }

    fn coins_of(party: &Party, name: &str) -> [u32; 5] {
        let member = party.find(name).unwrap();
        Denomination::ALL.map(|d| member.coins.get(d))
    }

    #[test]
    fn test_distribute_coins_reference_scenario() {
        let mut party = party_of(&["Keg", "Rowan", "Fred"]);
        let coins = Purse::new()
            .with(Denomination::Platinum, 10)
            .with(Denomination::Gold, 8)
            .with(Denomination::Electrum, 7)
            .with(Denomination::Silver, 5)
            .with(Denomination::Copper, 3);

        resolve_and_apply(&mut party, Intent::DistributeCoins { coins });

        assert_eq!(coins_of(&party, "Keg"), [4, 3, 2, 2, 1]);
        assert_eq!(coins_of(&party, "Rowan"), [3, 2, 3, 2, 1]);
        assert_eq!(coins_of(&party, "Fred"), [3, 3, 2, 1, 1]);
    }

    #[test]
    fn test_priorities_rotate_once_per_denomination() {
        let mut party = party_of(&["Keg", "Rowan", "Fred"]);
        let resolution = resolve_and_apply(
            &mut party,
            Intent::DistributeCoins {
                coins: Purse::new().with(Denomination::Gold, 1),
            },
        );

        let rotations = resolution
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::PrioritiesRotated { .. }))
            .count();
        assert_eq!(rotations, 5);
        // Five rotations mod 3 is two steps.
        assert_eq!(party.active[0].coin_priority, 2);
        assert_eq!(party.active[1].coin_priority, 0);
        assert_eq!(party.active[2].coin_priority, 1);
        assert!(party.priorities_are_permutation());
    }

    #[test]
    fn test_remainder_follows_priority_not_roster_order() {
        let mut party = party_of(&["A", "B", "C"]);
        party.active[0].coin_priority = 2;
        party.active[1].coin_priority = 1;
        party.active[2].coin_priority = 0;

        resolve_and_apply(
            &mut party,
            Intent::DistributeCoins {
                coins: Purse::new().with(Denomination::Platinum, 1),
            },
        );

        assert_eq!(party.find("C").unwrap().coins.get(Denomination::Platinum), 1);
        assert_eq!(party.find("A").unwrap().coins.get(Denomination::Platinum), 0);
    }

    #[test]
    fn test_distribute_coins_empty_party_rejected() {
        let party = Party::new();
        let result = RulesEngine::new().resolve(
            &party,
            Intent::DistributeCoins {
                coins: Purse::new().with(Denomination::Gold, 10),
            },
        );
        assert_eq!(result.unwrap_err(), RulesError::NoActiveMembers);
    }

    #[test]
    fn test_zero_coins_emit_no_awards() {
        let party = party_of(&["A", "B"]);
        let resolution = RulesEngine::new()
            .resolve(&party, Intent::DistributeCoins { coins: Purse::new() })
            .unwrap();
        assert!(!resolution
            .effects
            .iter()
            .any(|e| matches!(e, Effect::CoinsAwarded { .. })));
    }

    #[test]
    fn test_distribute_experience_even_split() {
        let mut party = party_of(&["Alice", "Bob"]);
        resolve_and_apply(&mut party, Intent::DistributeExperience { amount: 100 });

        for member in &party.active {
            assert_eq!(member.xp, 50);
        }
    }

    #[test]
    fn test_distribute_experience_drops_remainder() {
        let mut party = party_of(&["A", "B", "C"]);
        resolve_and_apply(&mut party, Intent::DistributeExperience { amount: 100 });

        let total: u32 = party.active.iter().map(|m| m.xp).sum();
        assert_eq!(total, 99);
    }

    #[test]
    fn test_experience_triggers_multi_level_up() {
        let mut party = Party {
            active: vec![Member::new("Solo").with_priority(0)],
            inactive: vec![],
        };
        let resolution =
            resolve_and_apply(&mut party, Intent::DistributeExperience { amount: 350 });

        assert_eq!(party.active[0].level, 2);
        let levels: Vec<u8> = resolution
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::LevelUp { new_level, .. } => Some(*new_level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![1, 2]);
    }

    #[test]
    fn test_experience_skips_inactive() {
        let mut party = party_of(&["A"]);
        party.inactive.push(Member::new("Benched").with_level(1));
        resolve_and_apply(&mut party, Intent::DistributeExperience { amount: 500 });

        assert_eq!(party.find("Benched").unwrap().xp, 0);
        assert_eq!(party.find("A").unwrap().xp, 500);
    }

    #[test]
    fn test_add_member_sets_level_and_priority() {
        let mut party = party_of(&["A", "B"]);
        resolve_and_apply(
            &mut party,
            Intent::AddMember {
                name: "  Cara ".to_string(),
                experience: 2700,
                coins: Purse::new().with(Denomination::Gold, 15),
            },
        );

        let cara = party.find("Cara").unwrap();
        assert_eq!(cara.level, 4);
        assert_eq!(cara.coin_priority, 2);
        assert_eq!(cara.coins.get(Denomination::Gold), 15);
        assert!(party.priorities_are_permutation());
    }

    #[test]
    fn test_add_member_rejects_duplicates_and_empty() {
        let mut party = party_of(&["A"]);
        party.inactive.push(Member::new("Benched"));
        let engine = RulesEngine::new();

        let dup = engine.resolve(
            &party,
            Intent::AddMember {
                name: "Benched".to_string(),
                experience: 0,
                coins: Purse::new(),
            },
        );
        assert_eq!(dup.unwrap_err(), RulesError::DuplicateName("Benched".to_string()));

        let empty = engine.resolve(
            &party,
            Intent::AddMember {
                name: "   ".to_string(),
                experience: 0,
                coins: Purse::new(),
            },
        );
        assert_eq!(empty.unwrap_err(), RulesError::EmptyName);
    }

    #[test]
    fn test_coin_overflow_rejects_whole_distribution() {
        let mut party = party_of(&["Rich", "Poor"]);
        party.active[0].coins.set(Denomination::Gold, u32::MAX - 1);
        let before = party.clone();

        let result = RulesEngine::new().resolve(
            &party,
            Intent::DistributeCoins {
                coins: Purse::new()
                    .with(Denomination::Platinum, 2)
                    .with(Denomination::Gold, 4),
            },
        );
        assert_eq!(
            result.unwrap_err(),
            RulesError::CoinOverflow {
                member: "Rich".to_string(),
                denomination: Denomination::Gold
            }
        );
        assert_eq!(party, before);

        // A share that still fits is accepted and conserved.
        resolve_and_apply(
            &mut party,
            Intent::DistributeCoins {
                coins: Purse::new().with(Denomination::Gold, 2),
            },
        );
        assert_eq!(party.find("Rich").unwrap().coins.get(Denomination::Gold), u32::MAX);
        assert_eq!(party.find("Poor").unwrap().coins.get(Denomination::Gold), 1);
    }

    #[test]
    fn test_experience_overflow_is_rejected() {
        let mut party = party_of(&["Veteran", "Novice"]);
        party.active[0].xp = u32::MAX - 10;

        let result =
            RulesEngine::new().resolve(&party, Intent::DistributeExperience { amount: 100 });
        assert_eq!(
            result.unwrap_err(),
            RulesError::ExperienceOverflow {
                member: "Veteran".to_string()
            }
        );
    }

    #[test]
    fn test_change_group_moves_to_tail() {
        let mut party = party_of(&["A", "B", "C"]);
        resolve_and_apply(
            &mut party,
            Intent::ChangeGroup {
                name: "A".to_string(),
                from: Group::Active,
            },
        );

        assert_eq!(party.group_of("A"), Some(Group::Inactive));
        assert_eq!(party.find("A").unwrap().coin_priority, 0);
        assert!(party.priorities_are_permutation());
        assert_eq!(party.find("B").unwrap().coin_priority, 0);
        assert_eq!(party.find("C").unwrap().coin_priority, 1);

        resolve_and_apply(
            &mut party,
            Intent::ChangeGroup {
                name: "A".to_string(),
                from: Group::Inactive,
            },
        );
        assert_eq!(party.group_of("A"), Some(Group::Active));
        assert_eq!(party.find("A").unwrap().coin_priority, 2);
        assert!(party.priorities_are_permutation());
    }

    #[test]
    fn test_change_group_missing_member() {
        let party = party_of(&["A"]);
        let result = RulesEngine::new().resolve(
            &party,
            Intent::ChangeGroup {
                name: "A".to_string(),
                from: Group::Inactive,
            },
        );
        assert_eq!(
            result.unwrap_err(),
            RulesError::MemberNotFound {
                name: "A".to_string(),
                group: Group::Inactive
            }
        );
    }
}
