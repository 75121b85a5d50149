//! Polled device state and how it maps onto simulation control.

use crate::board::Cell;

/// The keys the game reacts to; hosts report anything else as [`Key::Other`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Left,
    Right,
    Space,
    Char(char),
    Other,
}

/// Pointer position in screen pixels and which buttons are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

/// Everything a host reports for one frame
///
/// `key` is the most recent key press of the frame, so each physical press
/// produces at most one action. Mouse buttons are levels, not edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub key: Option<Key>,
    pub mouse: MouseState,
}
impl FrameInput {
    #[inline]
    pub fn key(key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::default()
        }
    }
    #[inline]
    pub fn mouse(mouse: MouseState) -> Self {
        Self { key: None, mouse }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ShortenInterval,
    LengthenInterval,
    ToggleRunning,
    Clear,
    ToggleGrid,
    Randomize,
    SingleStep,
}

pub fn key_action(key: Key) -> Option<Action> {
    match key {
        Key::Escape => Some(Action::Quit),
        Key::Left => Some(Action::ShortenInterval),
        Key::Right => Some(Action::LengthenInterval),
        Key::Space => Some(Action::ToggleRunning),
        Key::Char(c) => match c.to_ascii_lowercase() {
            'c' => Some(Action::Clear),
            'g' => Some(Action::ToggleGrid),
            'r' => Some(Action::Randomize),
            's' => Some(Action::SingleStep),
            _ => None,
        },
        Key::Other => None,
    }
}

/// The cell state painted under the cursor this frame, if any
///
/// Left paints alive cells and wins over right, which erases.
pub fn mouse_paint(mouse: &MouseState) -> Option<Cell> {
    if mouse.left {
        Some(Cell::Alive)
    } else if mouse.right {
        Some(Cell::Empty)
    } else {
        None
    }
}
