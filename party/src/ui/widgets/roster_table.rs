//! Roster table widget

use party_core::{Denomination, Member};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::ui::theme::RosterTheme;

/// Table of members with level, experience and coins
pub struct RosterTableWidget<'a> {
    members: &'a [Member],
    theme: &'a RosterTheme,
    title: &'a str,
    focused: bool,
    selected: Option<usize>,
    show_priority: bool,
}

impl<'a> RosterTableWidget<'a> {
    pub fn new(members: &'a [Member], theme: &'a RosterTheme) -> Self {
        Self {
            members,
            theme,
            title: " Party ",
            focused: false,
            selected: None,
            show_priority: true,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    /// Show the coin priority column.
    pub fn show_priority(mut self, show: bool) -> Self {
        self.show_priority = show;
        self
    }

    fn header(&self) -> Row<'a> {
        let mut cells = vec![
            Cell::from("Name"),
            Cell::from("Lvl"),
            Cell::from("XP"),
            Cell::from("Next"),
        ];
        cells.extend(Denomination::ALL.into_iter().map(|d| {
            Cell::from(Span::styled(
                d.abbreviation(),
                Style::default().fg(self.theme.coin_color(d)),
            ))
        }));
        if self.show_priority {
            cells.push(Cell::from("Prio"));
        }
        Row::new(cells).style(Style::default().add_modifier(Modifier::BOLD))
    }

    fn row(&self, member: &'a Member) -> Row<'a> {
        let next = member
            .xp_to_next_level()
            .map(|xp| xp.to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut cells = vec![
            Cell::from(member.name.as_str()),
            Cell::from(member.level.to_string()),
            Cell::from(member.xp.to_string()),
            Cell::from(Span::styled(next, self.theme.system_style())),
        ];
        cells.extend(Denomination::ALL.into_iter().map(|d| {
            Cell::from(Span::styled(
                member.coins.get(d).to_string(),
                Style::default().fg(self.theme.coin_color(d)),
            ))
        }));
        if self.show_priority {
            cells.push(Cell::from(member.coin_priority.to_string()));
        }
        Row::new(cells)
    }

    fn widths(&self) -> Vec<Constraint> {
        let mut widths = vec![
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(7),
        ];
        widths.extend([Constraint::Length(6); 5]);
        if self.show_priority {
            widths.push(Constraint::Length(4));
        }
        widths
    }
}

impl Widget for RosterTableWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(self.title, self.theme.title_style(self.focused)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        if self.members.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Span::styled("No members", self.theme.system_style())).render(inner, buf);
            return;
        }

        let rows: Vec<Row> = self.members.iter().map(|m| self.row(m)).collect();
        let table = Table::new(rows, self.widths())
            .header(self.header())
            .block(block)
            .row_highlight_style(self.theme.selected_style())
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(self.selected);
        StatefulWidget::render(table, area, buf, &mut state);
    }
}
