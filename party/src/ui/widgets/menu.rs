//! Main menu widget

use party_core::Party;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::MenuChoice;
use crate::ui::theme::RosterTheme;

/// Numbered list of menu choices plus who is next in line for coins
pub struct MenuWidget<'a> {
    party: &'a Party,
    selected: usize,
    theme: &'a RosterTheme,
}

impl<'a> MenuWidget<'a> {
    pub fn new(party: &'a Party, selected: usize, theme: &'a RosterTheme) -> Self {
        Self {
            party,
            selected,
            theme,
        }
    }
}

impl Widget for MenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(" Menu ", self.theme.title_style(true)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let mut lines: Vec<Line> = MenuChoice::ALL
            .iter()
            .enumerate()
            .map(|(idx, choice)| {
                let (marker, style) = if idx == self.selected {
                    ("> ", self.theme.selected_style())
                } else {
                    ("  ", self.theme.text_style())
                };
                Line::from(Span::styled(
                    format!("{marker}{}. {}", idx + 1, choice.label()),
                    style,
                ))
            })
            .collect();

        lines.push(Line::from(""));
        let next = match self.party.next_in_line() {
            Some(member) => format!("Next in line for coins: {}", member.name),
            None => "No active members".to_string(),
        };
        lines.push(Line::from(Span::styled(next, self.theme.system_style())));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
