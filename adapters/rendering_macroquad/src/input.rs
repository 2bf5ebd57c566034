//! Keyboard-to-direction mapping for the Macroquad backend.
//!
//! Both the arrow keys and WASD steer the snake; every other key is ignored
//! so typing into another window never moves the snake. The mapping is total
//! over [`KeyCode`] and free of backend state, which keeps it testable
//! without opening a window.

use macroquad::input::KeyCode;
use snake_game_core::Direction;

/// Keys recognized as movement input, polled in a fixed order each frame.
pub const MOVEMENT_KEYS: [KeyCode; 8] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::S,
    KeyCode::A,
    KeyCode::D,
];

/// Translates a key press into a movement intent.
#[must_use]
pub fn map_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::Up | KeyCode::W => Some(Direction::Up),
        KeyCode::Down | KeyCode::S => Some(Direction::Down),
        KeyCode::Left | KeyCode::A => Some(Direction::Left),
        KeyCode::Right | KeyCode::D => Some(Direction::Right),
        _ => None,
    }
}

/// Resolves the frame's movement intent when several keys arrive together.
///
/// The most recently pressed key wins; when that key is not a movement key
/// the remaining pressed keys are scanned in [`MOVEMENT_KEYS`] order.
#[must_use]
pub fn resolve_direction<I>(last_pressed: Option<KeyCode>, pressed: I) -> Option<Direction>
where
    I: IntoIterator<Item = KeyCode>,
{
    last_pressed
        .and_then(map_key)
        .or_else(|| pressed.into_iter().filter_map(map_key).last())
}
