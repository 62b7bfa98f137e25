//! Key-event decoding
//!
//! Maps raw key events to exactly one semantic action each; anything
//! unrecognized decodes to None and is ignored by the caller. Movement is
//! 8-way: arrows for the cardinals, vi keys (hjkl plus yubn) and the
//! numpad diagonals for the rest, "." to wait.

use crossterm::event::KeyCode;

/// One semantic player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Move { dx: i32, dy: i32 },
    Wait,
}

/// Decode a key into an action, or None for unbound keys.
pub fn decode(key: KeyCode) -> Option<PlayerAction> {
    let action = match key {
        KeyCode::Up | KeyCode::Char('k') => PlayerAction::Move { dx: 0, dy: -1 },
        KeyCode::Down | KeyCode::Char('j') => PlayerAction::Move { dx: 0, dy: 1 },
        KeyCode::Left | KeyCode::Char('h') => PlayerAction::Move { dx: -1, dy: 0 },
        KeyCode::Right | KeyCode::Char('l') => PlayerAction::Move { dx: 1, dy: 0 },
        KeyCode::Char('y') | KeyCode::Char('7') => PlayerAction::Move { dx: -1, dy: -1 },
        KeyCode::Char('u') | KeyCode::Char('9') => PlayerAction::Move { dx: 1, dy: -1 },
        KeyCode::Char('b') | KeyCode::Char('1') => PlayerAction::Move { dx: -1, dy: 1 },
        KeyCode::Char('n') | KeyCode::Char('3') => PlayerAction::Move { dx: 1, dy: 1 },
        KeyCode::Char('.') => PlayerAction::Wait,
        _ => return None,
    };
    Some(action)
}
