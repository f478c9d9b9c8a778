//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use presence_core::forms::{EmployeeForm, Field, GeofenceForm};

use crate::app::{
    can_add_field_char, can_add_password_char, can_add_username_char, App, AppState, LoginFocus,
    SettingsTab, PAGE_SCROLL_SIZE,
};
use crate::router::Route;

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::ConfirmingDelete => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.pending_delete = None;
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::Searching => return handle_search_input(app, key),
        AppState::EnteringRoute => return handle_route_input(app, key),
        AppState::EditingEmployee => return handle_employee_form_input(app, key),
        AppState::EditingSettings => return handle_settings_input(app, key),
        AppState::Quitting => return Ok(true),
        AppState::Normal => {}
    }

    // The login page owns the keyboard so credentials can contain any letter
    if app.route == Route::Login {
        return handle_login_input(app, key);
    }

    let logged_in = app.is_logged_in();
    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char(c @ '1'..='4') if logged_in => {
            app.select_section(c as usize - '1' as usize);
        }
        KeyCode::Char(':') => {
            app.route_input = app.route.path();
            app.state = AppState::EnteringRoute;
        }
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('L') if logged_in => app.logout(),
        KeyCode::Esc => app.go_back(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::PageDown => app.move_selection(PAGE_SCROLL_SIZE as isize),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        _ => match app.route {
            Route::Employees => handle_employees_input(app, key),
            Route::EmployeeDetail(_) => handle_employee_detail_input(app, key),
            Route::Settings => handle_settings_page_input(app, key),
            _ => {
                if key.code == KeyCode::Enter {
                    app.open_selected();
                }
            }
        },
    }
    Ok(false)
}

fn handle_search_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.search_query.clear();
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
            // Keep search query active
        }
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => {
            if can_add_field_char(app.search_query.len(), c) {
                app.search_query.push(c);
                // Reset selection when search changes
                app.employee_selection = 0;
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_route_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.route_input.clear();
            app.state = AppState::Normal;
        }
        KeyCode::Enter => app.submit_route_input(),
        KeyCode::Backspace => {
            app.route_input.pop();
        }
        KeyCode::Char(c) => {
            if can_add_field_char(app.route_input.len(), c) {
                app.route_input.push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Down | KeyCode::Tab => {
            // Move to next field
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            // Move to previous field
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Username => app.login_focus = LoginFocus::Password,
            // Enter in the password field submits, like a browser form
            LoginFocus::Password | LoginFocus::Button => app.attempt_login(),
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.len(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.len(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

fn handle_employees_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') => app.state = AppState::Searching,
        KeyCode::Char('a') => app.open_new_employee_form(),
        KeyCode::Char('e') => app.open_edit_employee_form(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Enter => app.open_selected(),
        _ => {}
    }
}

fn handle_employee_detail_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('e') => app.open_edit_employee_form(),
        KeyCode::Char('d') => app.request_delete(),
        _ => {}
    }
}

fn handle_settings_page_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            app.settings_tab = app.settings_tab.toggled();
        }
        KeyCode::Char('e') | KeyCode::Enter if app.settings_tab == SettingsTab::Location => {
            app.start_editing_settings();
        }
        KeyCode::Char('C') => app.clear_cache(),
        _ => {}
    }
}

/// Step a focus index forward or backward through `len` fields.
fn step_focus(focus: usize, len: usize, forward: bool) -> usize {
    if forward {
        (focus + 1) % len
    } else {
        (focus + len - 1) % len
    }
}

fn handle_employee_form_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Enter {
        app.submit_employee_form(App::today());
        return Ok(false);
    }
    if key.code == KeyCode::Esc {
        app.cancel_employee_form();
        return Ok(false);
    }

    let Some(ref mut state) = app.employee_form else {
        app.state = AppState::Normal;
        return Ok(false);
    };
    let field = state.focused_field();
    let len = EmployeeForm::FIELDS.len();

    match key.code {
        KeyCode::Tab | KeyCode::Down => state.focus = step_focus(state.focus, len, true),
        KeyCode::BackTab | KeyCode::Up => state.focus = step_focus(state.focus, len, false),
        KeyCode::Left => state.form.cycle_shift(field, false),
        KeyCode::Right => state.form.cycle_shift(field, true),
        KeyCode::Char(' ') if matches!(field, Field::ShiftStart | Field::ShiftEnd) => {
            state.form.toggle_meridiem(field);
        }
        KeyCode::Backspace => {
            if let Some(text) = state.form.text_mut(field) {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = state.form.text_mut(field) {
                if can_add_field_char(text.len(), c) {
                    text.push(c);
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_settings_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    let len = GeofenceForm::FIELDS.len();
    match key.code {
        KeyCode::Esc => app.cancel_settings(),
        KeyCode::Enter => app.save_settings(),
        KeyCode::Tab | KeyCode::Down => {
            app.geofence_focus = step_focus(app.geofence_focus, len, true)
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.geofence_focus = step_focus(app.geofence_focus, len, false);
        }
        KeyCode::Backspace => {
            let field = app.focused_geofence_field();
            if let Some(text) = app.geofence_form.text_mut(field) {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            let field = app.focused_geofence_field();
            if let Some(text) = app.geofence_form.text_mut(field) {
                if can_add_field_char(text.len(), c) {
                    text.push(c);
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crossterm::event::KeyModifiers;
    use presence_core::store::{MemoryStorage, SessionStore, Storage};
    use presence_core::{ApiClient, Config, Notifier};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_input(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    /// A logged-out app never touches the network.
    fn logged_out_app() -> App {
        let (notifier, notices) = Notifier::channel();
        let api = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1))
            .unwrap()
            .with_notifier(notifier.clone());
        let storage: Box<dyn Storage> = Box::new(MemoryStorage::default());
        let store = SessionStore::rehydrate(storage);
        let mut app = App::with_parts(Config::default(), api, store, notifier, notices);
        app.start(Route::Login);
        app
    }

    #[test]
    fn test_step_focus_wraps() {
        assert_eq!(step_focus(0, 4, true), 1);
        assert_eq!(step_focus(3, 4, true), 0);
        assert_eq!(step_focus(0, 4, false), 3);
    }

    #[test]
    fn test_login_keys_fill_fields() {
        let mut app = logged_out_app();

        // Letters that are shortcuts elsewhere still go into the field
        type_text(&mut app, "quit?");
        assert_eq!(app.login_username, "quit?");
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "pw");
        handle_input(&mut app, key(KeyCode::Backspace)).unwrap();
        assert_eq!(app.login_focus, LoginFocus::Password);
        assert_eq!(app.login_password, "p");
    }

    #[test]
    fn test_wrong_password_shows_error() {
        let mut app = logged_out_app();
        type_text(&mut app, "unicrore_admin");
        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        type_text(&mut app, "nope");
        handle_input(&mut app, key(KeyCode::Enter)).unwrap();

        assert!(!app.is_logged_in());
        assert_eq!(app.login_error.as_deref(), Some("Invalid username or password"));
        assert!(app.login_password.is_empty());
    }

    #[test]
    fn test_escape_on_login_asks_before_quitting() {
        let mut app = logged_out_app();
        assert!(!handle_input(&mut app, key(KeyCode::Esc)).unwrap());
        assert_eq!(app.state, AppState::ConfirmingQuit);

        assert!(!handle_input(&mut app, key(KeyCode::Char('n'))).unwrap());
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))).unwrap());
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_route_prompt_while_logged_out_lands_on_login() {
        let mut app = logged_out_app();
        app.route = Route::Landing;
        handle_input(&mut app, key(KeyCode::Char(':'))).unwrap();
        assert_eq!(app.state, AppState::EnteringRoute);
        assert_eq!(app.route_input, "/landing");

        for _ in 0.."/landing".len() {
            handle_input(&mut app, key(KeyCode::Backspace)).unwrap();
        }
        type_text(&mut app, "/settings");
        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.route, Route::Login);
    }
}
