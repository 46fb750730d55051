//! UI module for the roster TUI

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;
