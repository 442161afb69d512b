use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    DismissHelp,
    Draw,
    ForceShuffle,
    LoseLife,
    NewGame,
    ToggleMethod,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::DismissHelp,
        KeyCode::Enter => InputAction::Draw,
        KeyCode::Char(' ') => InputAction::Draw,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('s') => InputAction::ForceShuffle,
        KeyCode::Char('l') => InputAction::LoseLife,
        KeyCode::Char('n') => InputAction::NewGame,
        KeyCode::Char('m') => InputAction::ToggleMethod,
        _ => InputAction::None,
    }
}
