//! Turning engine responses into user-facing lines.

use std::collections::BTreeMap;

use party_core::{Effect, Purse, Response};

/// What kind of line a notice is, for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Loot,
    LevelUp,
    Warning,
    Error,
}

/// A single line in the notification feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub content: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(content: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            content: content.into(),
            kind,
        }
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::new(content, NoticeKind::Info)
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self::new(content, NoticeKind::Warning)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(content, NoticeKind::Error)
    }
}

/// Build the notices for a command response.
///
/// Coin awards are folded into one line per member.
pub fn notices_for(response: &Response) -> Vec<Notice> {
    let mut notices = vec![Notice::info(response.narrative.clone())];

    let mut loot: BTreeMap<&str, Purse> = BTreeMap::new();
    let mut loot_order: Vec<&str> = Vec::new();

    for effect in &response.effects {
        match effect {
            Effect::CoinsAwarded {
                member,
                denomination,
                amount,
            } => {
                if !loot.contains_key(member.as_str()) {
                    loot_order.push(member);
                }
                loot.entry(member).or_default().add(*denomination, *amount);
            }
            Effect::ExperienceGained {
                member,
                amount,
                new_total,
            } => notices.push(Notice::new(
                format!("{member} gains {amount} XP (total {new_total})"),
                NoticeKind::Info,
            )),
            Effect::LevelUp { member, new_level } => notices.push(Notice::new(
                format!("{member} leveled up to Level {new_level}!"),
                NoticeKind::LevelUp,
            )),
            _ => {}
        }
    }

    for member in loot_order {
        if let Some(purse) = loot.get(member) {
            notices.push(Notice::new(
                format!("{member} receives {purse}"),
                NoticeKind::Loot,
            ));
        }
    }

    if let Some(err) = &response.save_error {
        notices.push(Notice::error(format!("Save failed: {err}")));
    }

    notices
}
