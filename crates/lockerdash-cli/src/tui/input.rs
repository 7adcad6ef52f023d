//! Input handling for TUI key events.
//!
//! Handlers only touch [`App`] state; anything that needs the network comes
//! back as a [`Command`] for the dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use lockerdash_core::ViewKind;
use lockerdash_core::form::FormField;

use crate::app::{App, AppMode};
use crate::sync::Command;

/// Route a key press to the handler for the current mode.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return None;
    }
    match app.mode {
        AppMode::Normal => handle_normal_key(app, key.code),
        AppMode::Search => {
            handle_search_key(app, key.code);
            None
        }
        AppMode::Form => handle_form_key(app, key.code),
        AppMode::Confirm => handle_confirm_key(app, key.code),
    }
}

fn handle_normal_key(app: &mut App, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => app.next_view(),
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            app.switch_to(ViewKind::ALL[idx]);
        }
        KeyCode::Char('/') => app.mode = AppMode::Search,
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('r') => return Some(Command::Refresh(app.active)),
        KeyCode::Esc => app.dismiss_toast(),
        KeyCode::Char('n') if app.active == ViewKind::Customers => app.open_create_form(),
        KeyCode::Char('e') => return app.selected_customer_id().map(Command::LoadForEdit),
        KeyCode::Char('t') => return app.request_toggle_active().map(Command::Run),
        _ => {}
    }
    None
}

fn handle_search_key(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter | KeyCode::Esc => app.mode = AppMode::Normal,
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Esc => {
            app.cancel_form();
            return None;
        }
        KeyCode::Enter => return app.submit_form().map(Command::Run),
        _ => {}
    }

    let form = app.form.as_mut()?;
    match key {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Char(' ') if form.focus == FormField::ChangePassword => {
            form.toggle_change_password();
        }
        KeyCode::Backspace => {
            if let Some(text) = form.focused_text_mut() {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = form.focused_text_mut() {
                text.push(c);
            }
        }
        _ => {}
    }
    None
}

fn handle_confirm_key(app: &mut App, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Char('y' | 'Y') => app.confirm(true).map(Command::Run),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => {
            app.confirm(false);
            None
        }
        _ => None,
    }
}
