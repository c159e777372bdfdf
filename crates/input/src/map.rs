//! Key mapping from terminal events to game intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a game intent.
pub fn intent_for_key(key: KeyEvent) -> Option<Intent> {
    if is_quit_key(key) {
        return Some(Intent::Quit);
    }
    match key.code {
        KeyCode::Down | KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::MoveDown),
        KeyCode::Right | KeyCode::Char('f') | KeyCode::Char('F') => Some(Intent::MoveRight),
        KeyCode::Left | KeyCode::Char('s') | KeyCode::Char('S') => Some(Intent::MoveLeft),
        KeyCode::Up | KeyCode::Char(' ') => Some(Intent::Rotate),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn is_quit_key(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
