//! Keyboard input handling for the TUI.
//!
//! Overlays get the first look at a key. Anything they don't consume falls
//! through to the global and per-tab bindings.

use crossterm::event::{KeyCode, KeyEvent};
use legaldesk_core::Confirmation;

use crate::app::{App, AppState, Tab, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return false;
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return true;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return false;
        }
        AppState::ConfirmingDelete => {
            handle_delete_confirmation(app, key);
            return false;
        }
        AppState::EnteringNotes => {
            handle_notes_input(app, key);
            return false;
        }
        AppState::Searching => {
            handle_search_input(app, key);
            return false;
        }
        AppState::Normal | AppState::Quitting => {}
    }

    // Loading screen covers the views; only quit is meaningful
    if app.store.is_loading() {
        if key.code == KeyCode::Char('q') {
            app.state = AppState::ConfirmingQuit;
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('r') => {
            app.status_message = None;
            app.refresh_background();
        }
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            app.current_tab = Tab::ALL[index];
        }
        KeyCode::Left | KeyCode::BackTab => app.current_tab = app.current_tab.prev(),
        KeyCode::Right | KeyCode::Tab => app.current_tab = app.current_tab.next(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::PageDown => app.move_selection(PAGE_SCROLL_SIZE as isize),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Esc => app.status_message = None,
        _ => handle_tab_input(app, key),
    }

    false
}

fn handle_tab_input(app: &mut App, key: KeyEvent) {
    match (app.current_tab, key.code) {
        (Tab::Clients, KeyCode::Char('/')) => app.state = AppState::Searching,
        (Tab::Clients | Tab::Cases, KeyCode::Char('s')) => app.cycle_status_filter(),
        (Tab::Cases | Tab::Documents, KeyCode::Char('c')) => app.cycle_client_filter(),
        (Tab::Appointments, KeyCode::Char('u')) => app.toggle_upcoming(),
        (Tab::Appointments, KeyCode::Char('x')) => app.start_complete(),
        (Tab::Documents, KeyCode::Char('o')) => app.show_document_url(),
        (Tab::Dashboard, _) => {}
        (_, KeyCode::Char('d')) => app.request_delete(),
        _ => {}
    }
}

fn handle_delete_confirmation(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('s') | KeyCode::Char('S')
        | KeyCode::Enter => app.resolve_delete(Confirmation::Confirmed),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.resolve_delete(Confirmation::Declined)
        }
        _ => {}
    }
}

fn handle_notes_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.finish_complete(false),
        KeyCode::Enter => app.finish_complete(true),
        KeyCode::Backspace => {
            app.notes_input.pop();
        }
        KeyCode::Char(c) => app.push_notes_char(c),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.clear_search();
        }
        KeyCode::Enter => {
            // Keep search query active
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}
