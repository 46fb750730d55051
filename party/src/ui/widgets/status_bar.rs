//! Status bar widget

use party_core::Party;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::Screen;
use crate::ui::theme::RosterTheme;

/// Status bar widget showing roster counts and the last message
pub struct StatusBarWidget<'a> {
    party: &'a Party,
    screen: Screen,
    theme: &'a RosterTheme,
    dirty: bool,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(party: &'a Party, screen: Screen, theme: &'a RosterTheme) -> Self {
        Self {
            party,
            screen,
            theme,
            dirty: false,
            message: None,
        }
    }

    pub fn dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (screen_text, screen_color) = match self.screen {
            Screen::Menu => ("MENU", Color::Blue),
            Screen::Coins => ("COINS", self.theme.gold),
            Screen::Experience => ("XP", Color::Green),
            Screen::AddMember => ("ADD", Color::Cyan),
            Screen::Groups => ("GROUPS", self.theme.highlight),
        };

        let mut spans = vec![
            Span::styled(
                format!("-- {screen_text} --"),
                Style::default()
                    .fg(screen_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                format!(
                    "Active: {}  Inactive: {}",
                    self.party.active.len(),
                    self.party.inactive.len()
                ),
                self.theme.text_style(),
            ),
        ];

        if self.dirty {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                "UNSAVED",
                Style::default()
                    .fg(self.theme.warning_text)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        if let Some(msg) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                msg,
                Style::default().add_modifier(Modifier::DIM),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey bar widget
pub struct HotkeyBarWidget<'a> {
    screen: Screen,
    theme: &'a RosterTheme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(screen: Screen, theme: &'a RosterTheme) -> Self {
        Self { screen, theme }
    }

    fn hotkeys(&self) -> Vec<(&'static str, bool)> {
        match self.screen {
            Screen::Menu => vec![
                ("↑↓:select", true),
                ("Enter:open", true),
                ("1-5:jump", true),
                ("q:save & quit", false),
            ],
            Screen::Coins | Screen::Experience | Screen::AddMember => vec![
                ("↑↓/Tab:field", true),
                ("Enter:next/submit", true),
                ("Esc:back", false),
            ],
            Screen::Groups => vec![
                ("Tab:switch table", true),
                ("↑↓:select", true),
                ("Enter:move", true),
                ("s:save & back", true),
                ("Esc:back", false),
            ],
        }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = self
            .hotkeys()
            .into_iter()
            .flat_map(|(text, primary)| {
                let style = if primary {
                    self.theme.text_style()
                } else {
                    self.theme.system_style()
                };
                [Span::styled(text, style), Span::raw("  ")]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
