//! Color theme and styling for the roster TUI

use party_core::Denomination;
use ratatui::style::{Color, Modifier, Style};

use crate::notices::NoticeKind;

/// Roster UI color theme
#[derive(Debug, Clone)]
pub struct RosterTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,
    pub highlight: Color,

    // Coin colors
    pub platinum: Color,
    pub gold: Color,
    pub electrum: Color,
    pub silver: Color,
    pub copper: Color,

    // Notice colors
    pub info_text: Color,
    pub loot_text: Color,
    pub level_up_text: Color,
    pub warning_text: Color,
    pub error_text: Color,
    pub system_text: Color,
}

impl Default for RosterTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            highlight: Color::Magenta,

            platinum: Color::LightCyan,
            gold: Color::Yellow,
            electrum: Color::LightBlue,
            silver: Color::Gray,
            copper: Color::LightRed,

            info_text: Color::White,
            loot_text: Color::Yellow,
            level_up_text: Color::LightGreen,
            warning_text: Color::LightYellow,
            error_text: Color::Red,
            system_text: Color::DarkGray,
        }
    }
}

impl RosterTheme {
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    /// Get style for hints and dimmed labels
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get color for a coin column
    pub fn coin_color(&self, denomination: Denomination) -> Color {
        match denomination {
            Denomination::Platinum => self.platinum,
            Denomination::Gold => self.gold,
            Denomination::Electrum => self.electrum,
            Denomination::Silver => self.silver,
            Denomination::Copper => self.copper,
        }
    }

    /// Get style for a notification line
    pub fn notice_style(&self, kind: NoticeKind) -> Style {
        match kind {
            NoticeKind::Info => Style::default().fg(self.info_text),
            NoticeKind::Loot => Style::default().fg(self.loot_text),
            NoticeKind::LevelUp => Style::default()
                .fg(self.level_up_text)
                .add_modifier(Modifier::BOLD),
            NoticeKind::Warning => Style::default().fg(self.warning_text),
            NoticeKind::Error => Style::default()
                .fg(self.error_text)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get title style
    pub fn title_style(&self, focused: bool) -> Style {
        let style = Style::default().fg(if focused {
            self.border_focused
        } else {
            self.foreground
        });

        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Get style for the selected row or focused field
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }
}
