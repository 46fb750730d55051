//! Lenient parsing for numeric prompts.
//!
//! Prompts never abort a command: anything that is not a non-negative
//! integer counts as zero and carries a warning for the shell to show.

use crate::coins::{Denomination, Purse};

/// Warning shown when a numeric field could not be read.
pub const INVALID_NUMBER_WARNING: &str = "Invalid number, defaulting to 0.";

/// A parsed numeric field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAmount {
    pub value: u32,
    pub warning: Option<String>,
}

/// Parse one numeric field.
///
/// Blank input is a silent zero. Negative, fractional, overflowing or
/// non-numeric input is zero with a warning.
pub fn parse_amount(raw: &str) -> ParsedAmount {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedAmount {
            value: 0,
            warning: None,
        };
    }

    match trimmed.parse::<u32>() {
        Ok(value) => ParsedAmount {
            value,
            warning: None,
        },
        Err(_) => ParsedAmount {
            value: 0,
            warning: Some(INVALID_NUMBER_WARNING.to_string()),
        },
    }
}

/// Parse one field per denomination, in canonical order.
///
/// Returns the purse and a warning line for every field that defaulted.
pub fn parse_purse(fields: &[&str; 5]) -> (Purse, Vec<String>) {
    let mut purse = Purse::new();
    let mut warnings = Vec::new();

    for (denomination, raw) in Denomination::ALL.into_iter().zip(fields.iter()) {
        let parsed = parse_amount(raw);
        if let Some(warning) = parsed.warning {
            warnings.push(format!("{denomination}: {warning}"));
        }
        purse.set(denomination, parsed.value);
    }

    (purse, warnings)
}
