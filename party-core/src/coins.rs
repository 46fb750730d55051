//! Coin denominations and member purses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A coin type.
///
/// Variants are declared from highest to lowest value, which is also the
/// order coins are distributed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Denomination {
    Platinum,
    Gold,
    Electrum,
    Silver,
    Copper,
}

impl Denomination {
    /// Canonical distribution order.
    pub const ALL: [Denomination; 5] = [
        Denomination::Platinum,
        Denomination::Gold,
        Denomination::Electrum,
        Denomination::Silver,
        Denomination::Copper,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Denomination::Platinum => "Platinum",
            Denomination::Gold => "Gold",
            Denomination::Electrum => "Electrum",
            Denomination::Silver => "Silver",
            Denomination::Copper => "Copper",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Denomination::Platinum => "PP",
            Denomination::Gold => "GP",
            Denomination::Electrum => "EP",
            Denomination::Silver => "SP",
            Denomination::Copper => "CP",
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Coin counts keyed by denomination. Missing entries count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Purse(BTreeMap<Denomination, u32>);

impl Purse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy for literals in tests and prompts.
    pub fn with(mut self, denomination: Denomination, amount: u32) -> Self {
        self.set(denomination, amount);
        self
    }

    pub fn get(&self, denomination: Denomination) -> u32 {
        self.0.get(&denomination).copied().unwrap_or(0)
    }

    pub fn set(&mut self, denomination: Denomination, amount: u32) {
        self.0.insert(denomination, amount);
    }

    /// Add coins, saturating at `u32::MAX`. The rules engine rejects
    /// distributions that would get here.
    pub fn add(&mut self, denomination: Denomination, amount: u32) {
        let entry = self.0.entry(denomination).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Total number of coins regardless of denomination.
    pub fn coin_count(&self) -> u64 {
        self.0.values().map(|&v| u64::from(v)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.coin_count() == 0
    }

    /// All denominations in canonical order, including zero entries.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        Denomination::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

impl FromIterator<(Denomination, u32)> for Purse {
    fn from_iter<I: IntoIterator<Item = (Denomination, u32)>>(iter: I) -> Self {
        let mut purse = Purse::new();
        for (denomination, amount) in iter {
            purse.add(denomination, amount);
        }
        purse
    }
}

impl fmt::Display for Purse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(d, amount)| format!("{amount}{}", d.abbreviation()))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
