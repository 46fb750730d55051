//! Layout calculations for the roster TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Calculate the main layout areas
pub struct AppLayout {
    pub title_area: Rect,
    pub main_area: Rect,
    pub side_area: Rect,
    pub notice_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(8),    // Roster and side panel
                Constraint::Length(8), // Notifications
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[1]);

        Self {
            title_area: main_chunks[0],
            main_area: content_chunks[0],
            side_area: content_chunks[1],
            notice_area: main_chunks[2],
            status_bar: main_chunks[3],
            hotkey_bar: main_chunks[4],
        }
    }

    /// Split the content row into the two group tables
    pub fn groups(&self) -> GroupsLayout {
        let content = self.main_area.union(self.side_area);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(content);

        GroupsLayout {
            active_area: chunks[0],
            inactive_area: chunks[1],
        }
    }
}

/// Side-by-side group tables
pub struct GroupsLayout {
    pub active_area: Rect,
    pub inactive_area: Rect,
}
