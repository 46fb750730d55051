//! Notification feed widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::notices::Notice;
use crate::ui::theme::RosterTheme;

/// Shows the most recent notices, newest at the bottom
pub struct NotificationsWidget<'a> {
    notices: &'a [Notice],
    theme: &'a RosterTheme,
}

impl<'a> NotificationsWidget<'a> {
    pub fn new(notices: &'a [Notice], theme: &'a RosterTheme) -> Self {
        Self { notices, theme }
    }
}

impl Widget for NotificationsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Notifications ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let visible = block.inner(area).height as usize;
        let skip = self.notices.len().saturating_sub(visible);

        let lines: Vec<Line> = self.notices[skip..]
            .iter()
            .map(|notice| {
                Line::from(Span::styled(
                    notice.content.as_str(),
                    self.theme.notice_style(notice.kind),
                ))
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
