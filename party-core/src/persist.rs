//! Roster persistence.
//!
//! The party is stored as a single pretty-printed JSON document that is
//! fully rewritten on every save.

use crate::party::Party;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Default save file name, relative to the working directory.
pub const DEFAULT_SAVE_FILE: &str = "party.json";

/// Appended to the save file name when an unreadable roster is kept.
const BACKUP_SUFFIX: &str = ".bak";

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage collaborator for the roster.
pub trait RosterStore {
    /// Load the saved party. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<Party>, PersistError>;

    /// Overwrite the saved party.
    fn save(&self, party: &Party) -> Result<(), PersistError>;

    /// Human-readable location for status messages.
    fn describe(&self) -> String;

    /// Move an unreadable roster out of the way before it is overwritten.
    /// Returns where it went, or `None` when there was nothing to keep.
    fn set_aside(&self) -> Result<Option<String>, PersistError> {
        Ok(None)
    }
}

/// Stores the roster in a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `party.json` becomes `party.json.bak`.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_FILE)
    }
}

impl RosterStore for JsonFileStore {
    fn load(&self) -> Result<Option<Party>, PersistError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let party: Party = serde_json::from_str(&content)?;
        Ok(Some(party))
    }

    fn save(&self, party: &Party) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(party)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path().display().to_string()
    }

    fn set_aside(&self) -> Result<Option<String>, PersistError> {
        if !self.path().is_file() {
            return Ok(None);
        }
        let backup = self.backup_path();
        fs::rename(self.path(), &backup)?;
        Ok(Some(backup.display().to_string()))
    }
}

/// In-memory store, shared between clones.
///
/// Tests hold one clone to inspect what the session saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    saved: Option<Party>,
    saves: usize,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `party`.
    pub fn with_party(party: Party) -> Self {
        let store = Self::new();
        store.lock().saved = Some(party);
        store
    }

    /// Make subsequent saves fail with [`PersistError::Unavailable`].
    pub fn fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    /// The last successfully saved party.
    pub fn saved(&self) -> Option<Party> {
        self.lock().saved.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A poisoned lock only means a test panicked mid-save; the data is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RosterStore for MemoryStore {
    fn load(&self) -> Result<Option<Party>, PersistError> {
        Ok(self.lock().saved.clone())
    }

    fn save(&self, party: &Party) -> Result<(), PersistError> {
        let mut state = self.lock();
        if state.fail_saves {
            return Err(PersistError::Unavailable("memory store is read-only".to_string()));
        }
        state.saved = Some(party.clone());
        state.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
