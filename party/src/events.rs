//! Event handling for the roster TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, MenuChoice, Screen};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    let result = match app.screen {
        Screen::Menu => handle_menu(app, key),
        Screen::Coins | Screen::Experience | Screen::AddMember => handle_form(app, key),
        Screen::Groups => handle_groups(app, key),
    };

    if app.should_quit {
        EventResult::Quit
    } else {
        result
    }
}

fn handle_menu(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => EventResult::Quit,
        KeyCode::Up | KeyCode::Char('k') => {
            app.menu_up();
            EventResult::NeedsRedraw
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.menu_down();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            app.open(app.selected_choice());
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            app.menu_selected = idx;
            app.open(MenuChoice::ALL[idx]);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_form(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.clear_status();
            app.back_to_menu();
        }
        KeyCode::Down | KeyCode::Tab => app.form.focus_next(),
        KeyCode::Up | KeyCode::BackTab => app.form.focus_prev(),
        KeyCode::Enter => {
            if app.form.on_submit() {
                app.submit_form();
            } else {
                app.form.focus_next();
            }
        }
        KeyCode::Backspace => app.form.pop_char(),
        KeyCode::Char(c) => app.form.push_char(c),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_groups(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => app.back_to_menu(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            app.switch_group_focus()
        }
        KeyCode::Up | KeyCode::Char('k') => app.group_up(),
        KeyCode::Down | KeyCode::Char('j') => app.group_down(),
        KeyCode::Enter => app.toggle_selected(),
        KeyCode::Char('s') => app.save_and_return(),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}
