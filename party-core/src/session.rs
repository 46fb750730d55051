//! PartySession - the primary public API for roster management.
//!
//! Wraps the [`Party`], the [`RulesEngine`] and a [`RosterStore`] behind one
//! interface. Every command resolves and applies atomically, then the party
//! is written to storage when autosave is on.

use crate::coins::Purse;
use crate::party::{Group, Party};
use crate::persist::{JsonFileStore, PersistError, RosterStore, DEFAULT_SAVE_FILE};
use crate::rules::{apply_effects, Effect, Intent, RulesEngine, RulesError};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from PartySession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    Rules(#[from] RulesError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("No member named {0} in the party")]
    UnknownMember(String),
}

/// Configuration for opening a session.
#[derive(Debug, Clone)]
pub struct PartyConfig {
    /// Where the roster is saved.
    pub save_path: PathBuf,

    /// Save after every successful command.
    pub autosave: bool,
}

impl PartyConfig {
    pub fn new() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
            autosave: true,
        }
    }

    /// Set the save file path.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// Enable or disable saving after each command.
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What happened when the session read its store at startup.
#[derive(Debug)]
pub enum LoadOutcome {
    /// An existing roster was loaded.
    Loaded { members: usize },
    /// Nothing was saved yet.
    Fresh,
    /// The store could not be read; the session started empty.
    Failed(PersistError),
}

/// Response from a roster command.
#[derive(Debug, Clone)]
pub struct Response {
    /// One-line summary from the rules engine.
    pub narrative: String,

    /// Effects that were applied to the party.
    pub effects: Vec<Effect>,

    /// Set when the autosave after this command failed. The command itself
    /// still took effect in memory.
    pub save_error: Option<String>,
}

impl Response {
    /// Level-ups contained in this response, in order.
    pub fn level_ups(&self) -> impl Iterator<Item = (&str, u8)> {
        self.effects.iter().filter_map(|e| match e {
            Effect::LevelUp { member, new_level } => Some((member.as_str(), *new_level)),
            _ => None,
        })
    }
}

/// A roster session.
pub struct PartySession {
    party: Party,
    store: Box<dyn RosterStore>,
    rules: RulesEngine,
    autosave: bool,
    dirty: bool,
    /// The store held a roster that failed to load.
    unreadable: bool,
}

impl PartySession {
    /// Open the session described by `config`, backed by a JSON file.
    pub fn open(config: &PartyConfig) -> (Self, LoadOutcome) {
        Self::with_store(JsonFileStore::new(&config.save_path), config.autosave)
    }

    /// Open a session over any store.
    ///
    /// A load failure never aborts startup: the session begins with an empty
    /// party and the failure is returned for the shell to report. The
    /// unreadable roster is set aside by the first save.
    pub fn with_store(store: impl RosterStore + 'static, autosave: bool) -> (Self, LoadOutcome) {
        let (party, outcome) = match store.load() {
            Ok(Some(mut party)) => {
                party.normalize_priorities();
                let members = party.active.len() + party.inactive.len();
                info!(members, source = %store.describe(), "Loaded party");
                (party, LoadOutcome::Loaded { members })
            }
            Ok(None) => {
                info!(source = %store.describe(), "No saved party, starting fresh");
                (Party::new(), LoadOutcome::Fresh)
            }
            Err(e) => {
                warn!(error = %e, source = %store.describe(), "Failed to load party, starting fresh");
                (Party::new(), LoadOutcome::Failed(e))
            }
        };

        let session = Self {
            party,
            store: Box::new(store),
            rules: RulesEngine::new(),
            autosave,
            dirty: false,
            unreadable: matches!(outcome, LoadOutcome::Failed(_)),
        };
        (session, outcome)
    }

    /// Get the current party.
    pub fn party(&self) -> &Party {
        &self.party
    }

    /// Whether there are changes that have not reached storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Where the party is stored, for status messages.
    pub fn store_description(&self) -> String {
        self.store.describe()
    }

    /// Resolve an intent, apply its effects and autosave.
    pub fn execute(&mut self, intent: Intent) -> Result<Response, SessionError> {
        let resolution = self.rules.resolve(&self.party, intent)?;
        apply_effects(&mut self.party, &resolution.effects);
        self.dirty = true;

        for effect in &resolution.effects {
            log_effect(effect);
        }

        let save_error = if self.autosave {
            self.save().err().map(|e| e.to_string())
        } else {
            None
        };

        Ok(Response {
            narrative: resolution.narrative,
            effects: resolution.effects,
            save_error,
        })
    }

    /// Add a member to the active group.
    pub fn add_member(
        &mut self,
        name: &str,
        experience: u32,
        coins: Purse,
    ) -> Result<Response, SessionError> {
        self.execute(Intent::AddMember {
            name: name.to_string(),
            experience,
            coins,
        })
    }

    /// Split coins among active members.
    pub fn distribute_coins(&mut self, coins: &Purse) -> Result<Response, SessionError> {
        self.execute(Intent::DistributeCoins {
            coins: coins.clone(),
        })
    }

    /// Split experience among active members.
    pub fn distribute_experience(&mut self, amount: u32) -> Result<Response, SessionError> {
        self.execute(Intent::DistributeExperience { amount })
    }

    /// Move a member out of `from` into the other group.
    pub fn change_member_group(&mut self, name: &str, from: Group) -> Result<Response, SessionError> {
        self.execute(Intent::ChangeGroup {
            name: name.to_string(),
            from,
        })
    }

    /// Activate an inactive member or deactivate an active one.
    pub fn toggle_member(&mut self, name: &str) -> Result<Response, SessionError> {
        let from = self
            .party
            .group_of(name)
            .ok_or_else(|| SessionError::UnknownMember(name.to_string()))?;
        self.change_member_group(name, from)
    }

    /// Save only when there are unsaved changes. Returns whether a save
    /// happened.
    pub fn save_if_dirty(&mut self) -> Result<bool, SessionError> {
        if !self.dirty {
            return Ok(false);
        }
        self.save().map(|()| true)
    }

    /// Write the party to storage.
    ///
    /// On failure the in-memory party is kept as is and stays dirty.
    pub fn save(&mut self) -> Result<(), SessionError> {
        if self.unreadable {
            match self.store.set_aside() {
                Ok(Some(backup)) => {
                    info!(%backup, "Kept unreadable party file");
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "Could not set aside unreadable party file");
                    return Err(e.into());
                }
            }
            self.unreadable = false;
        }

        match self.store.save(&self.party) {
            Ok(()) => {
                self.dirty = false;
                info!(target_path = %self.store.describe(), "Party saved");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, target_path = %self.store.describe(), "Save failed");
                Err(e.into())
            }
        }
    }
}

fn log_effect(effect: &Effect) {
    match effect {
        Effect::MemberJoined { member } => {
            info!(member = %member.name, level = member.level, "Member joined");
        }
        Effect::MemberMoved { member, from, to, .. } => {
            info!(%member, %from, %to, "Member moved");
        }
        Effect::LevelUp { member, new_level } => {
            info!(%member, new_level, "Level up");
        }
        _ => {}
    }
}
