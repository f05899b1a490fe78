use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::grid::Direction;

/// Logical input tokens. Mapping raw keys to these is the whole of this
/// module; the controller never sees a key code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Turn(Direction),
    Pause,
    Quit,
    Restart,
}

pub fn action_for(key: KeyEvent) -> Option<InputAction> {
    // Key releases show up on some platforms; only presses count
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputAction::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(InputAction::Turn(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputAction::Turn(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputAction::Turn(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputAction::Turn(Direction::Right))
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => Some(InputAction::Pause),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputAction::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::Restart),
        _ => None,
    }
}
