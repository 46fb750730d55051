//! Party roster engine for tabletop campaigns.
//!
//! This crate provides:
//! - Fair coin splitting with a rotating remainder priority
//! - Experience splitting with level progression on the 5e XP table
//! - Active/inactive membership with an Intent/Effect rules pipeline
//! - JSON persistence of the roster
//!
//! # Quick Start
//!
//! ```no_run
//! use party_core::{Denomination, PartyConfig, PartySession, Purse};
//!
//! let config = PartyConfig::new().with_save_path("party.json");
//! let (mut session, _outcome) = PartySession::open(&config);
//!
//! session.add_member("Keg", 0, Purse::new())?;
//! session.add_member("Rowan", 0, Purse::new())?;
//!
//! let loot = Purse::new().with(Denomination::Gold, 25);
//! let response = session.distribute_coins(&loot)?;
//! println!("{}", response.narrative);
//! # Ok::<(), party_core::SessionError>(())
//! ```

pub mod coins;
pub mod input;
pub mod party;
pub mod persist;
pub mod progression;
pub mod rules;
pub mod session;
pub mod testing;

// Primary public API
pub use coins::{Denomination, Purse};
pub use party::{Group, Member, Party};
pub use persist::{JsonFileStore, MemoryStore, PersistError, RosterStore};
pub use rules::{Effect, Intent, Resolution, RulesEngine, RulesError};
pub use session::{LoadOutcome, PartyConfig, PartySession, Response, SessionError};
pub use testing::TestHarness;
