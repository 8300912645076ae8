//! Key mapping from the terminal to the game's input signals.

use crossterm::event::{KeyCode, KeyEvent};
use noughts::InputKey;

/// Maps a key event to an [`InputKey`], if the game consumes it.
/// Enter and Space both confirm; everything else is the host's
/// business.
pub fn map_key(key: &KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputKey::Confirm),
        _ => None,
    }
}
