//! Form widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::forms::Form;
use crate::ui::theme::RosterTheme;

/// Renders a [`Form`] with a cursor on the focused field
pub struct FormWidget<'a> {
    form: &'a Form,
    theme: &'a RosterTheme,
}

impl<'a> FormWidget<'a> {
    pub fn new(form: &'a Form, theme: &'a RosterTheme) -> Self {
        Self { form, theme }
    }
}

impl Widget for FormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(self.form.kind.title(), self.theme.title_style(true)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let label_width = self
            .form
            .fields
            .iter()
            .map(|f| f.label.len())
            .max()
            .unwrap_or(0);

        let mut lines: Vec<Line> = self
            .form
            .fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let focused = idx == self.form.focus;
                let label_style = if focused {
                    self.theme.selected_style()
                } else {
                    self.theme.text_style()
                };

                let mut spans = vec![
                    Span::styled(if focused { "> " } else { "  " }, label_style),
                    Span::styled(format!("{:<label_width$} : ", field.label), label_style),
                    Span::raw(field.value.as_str()),
                ];
                if focused {
                    spans.push(Span::styled(
                        " ",
                        Style::default().add_modifier(Modifier::UNDERLINED | Modifier::REVERSED),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        lines.push(Line::from(""));
        let submit_style = if self.form.on_submit() {
            self.theme.selected_style().add_modifier(Modifier::REVERSED)
        } else {
            self.theme.system_style()
        };
        lines.push(Line::from(Span::styled("  [ Submit ]", submit_style)));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
