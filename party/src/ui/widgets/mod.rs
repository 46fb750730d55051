//! TUI widgets for the roster manager

pub mod form;
pub mod menu;
pub mod notifications;
pub mod roster_table;
pub mod status_bar;

pub use form::FormWidget;
pub use menu::MenuWidget;
pub use notifications::NotificationsWidget;
pub use roster_table::RosterTableWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
