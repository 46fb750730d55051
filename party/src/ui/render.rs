//! Render orchestration for the roster TUI

use party_core::Group;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Screen};
use crate::ui::layout::AppLayout;
use crate::ui::widgets::{
    FormWidget, HotkeyBarWidget, MenuWidget, NotificationsWidget, RosterTableWidget,
    StatusBarWidget,
};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::calculate(frame.area());

    render_title_bar(frame, app, layout.title_area);

    match app.screen {
        Screen::Groups => render_groups(frame, app, &layout),
        _ => {
            let party = app.session.party();
            let title = match (app.screen, party.next_in_line()) {
                (Screen::Coins, Some(next)) => format!(" Active Party (next in line: {}) ", next.name),
                _ => " Active Party ".to_string(),
            };
            let roster = RosterTableWidget::new(&party.active, &app.theme).title(&title);
            frame.render_widget(roster, layout.main_area);

            if app.screen == Screen::Menu {
                let menu = MenuWidget::new(app.session.party(), app.menu_selected, &app.theme);
                frame.render_widget(menu, layout.side_area);
            } else {
                frame.render_widget(FormWidget::new(&app.form, &app.theme), layout.side_area);
            }
        }
    }

    frame.render_widget(
        NotificationsWidget::new(&app.notices, &app.theme),
        layout.notice_area,
    );

    let status = StatusBarWidget::new(app.session.party(), app.screen, &app.theme)
        .dirty(app.session.is_dirty())
        .message(app.status_message());
    frame.render_widget(status, layout.status_bar);

    frame.render_widget(HotkeyBarWidget::new(app.screen, &app.theme), layout.hotkey_bar);
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let totals = app.session.party().active_totals();
    let line = Line::from(vec![
        Span::styled(
            " Party Roster ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| {} | Active purse: {totals}", app.session.store_description()),
            app.theme.system_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the active and inactive tables side by side
fn render_groups(frame: &mut Frame, app: &App, layout: &AppLayout) {
    let groups = layout.groups();
    let party = app.session.party();

    for (group, area, title) in [
        (Group::Active, groups.active_area, " Active "),
        (Group::Inactive, groups.inactive_area, " Inactive "),
    ] {
        let focused = app.groups.focus == group;
        let members = party.group(group);
        let selected = (focused && !members.is_empty()).then(|| app.groups.selected(group));

        let table = RosterTableWidget::new(members, &app.theme)
            .title(title)
            .focused(focused)
            .selected(selected)
            .show_priority(group == Group::Active);
        frame.render_widget(table, area);
    }
}
