// File: src/tui/input.rs
// Maps key presses to the handlers bound in the rendered page.
use crate::action::Action;
use crate::page;
use crate::state::{AppState, Focus, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match state.mode {
        InputMode::Normal => handle_normal(state, key),
        InputMode::EditingParty | InputMode::CreatingParty => handle_editing(state, key),
    }
}

fn handle_normal(state: &mut AppState, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('r') => return Some(state.refresh_action()),
        KeyCode::Tab => {
            state.focus = state.focus.next();
            return None;
        }
        KeyCode::BackTab => {
            state.focus = state.focus.prev();
            return None;
        }
        _ => {}
    }

    match state.focus {
        Focus::Parties => match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                state.move_cursor(1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                state.move_cursor(-1);
                None
            }
            KeyCode::Enter => {
                let command = page::render(state).highlighted_row()?;
                state.run_command(command)
            }
            _ => None,
        },
        Focus::Details => {
            let page = page::render(state);
            let panel = page.panel()?;
            match key.code {
                KeyCode::Char('e') => state.run_command(panel.edit_button.on_click),
                KeyCode::Char('d') => state.run_command(panel.delete_button.on_click),
                _ => None,
            }
        }
        Focus::NewParty => match key.code {
            KeyCode::Enter | KeyCode::Char('a') => {
                state.start_creating();
                None
            }
            _ => None,
        },
    }
}

fn handle_editing(state: &mut AppState, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => {
            state.cancel_input();
            None
        }
        KeyCode::Enter => {
            let page = page::render(state);
            let command = match state.mode {
                InputMode::EditingParty => page.panel()?.edit_button.on_click,
                InputMode::CreatingParty => page.new_party.submit.on_click,
                InputMode::Normal => return None,
            };
            state.run_command(command)
        }
        KeyCode::Tab | KeyCode::Down => {
            let form = state.active_form_mut()?;
            form.active = form.active.next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            let form = state.active_form_mut()?;
            form.active = form.active.prev();
            None
        }
        KeyCode::Backspace => {
            state.active_form_mut()?.backspace();
            None
        }
        KeyCode::Char(c) => {
            state.active_form_mut()?.push(c);
            None
        }
        _ => None,
    }
}
