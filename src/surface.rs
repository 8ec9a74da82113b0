//! The drawing and input surface the game talks to.
//!
//! All coordinates are `(row, col)` inside the game window, with row 0 and
//! col 0 being the border.

use crate::{Coords, TermInt};
use crate::error::Result;

/// What a cell gets filled with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Paint {
    Snake,
    Apple,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextStyle {
    Plain,
    /// Red on black, blinking.
    Alert,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Quit,
    Debug,
    Other,
}

impl Key {
    /// One cell away from `from` in the key's direction, or `None` for
    /// non-arrow keys.
    pub fn step(self, from: Coords) -> Option<Coords> {
        let (y, x) = from;
        match self {
            Key::Up => Some((y - 1, x)),
            Key::Down => Some((y + 1, x)),
            Key::Left => Some((y, x - 1)),
            Key::Right => Some((y, x + 1)),
            _ => None,
        }
    }
}

pub trait Surface {
    /// `(height, width)` of the game window, border included.
    fn geometry(&self) -> (TermInt, TermInt);

    fn draw_border(&mut self, title: &str) -> Result<()>;

    fn clear_cell(&mut self, pos: Coords) -> Result<()>;

    fn draw_cell(&mut self, pos: Coords, paint: Paint) -> Result<()>;

    fn print_text(&mut self, pos: Coords, text: &str, style: TextStyle) -> Result<()>;

    /// Lines written above the game window, outside of it.
    fn print_debug(&mut self, lines: &[String]) -> Result<()>;

    fn refresh(&mut self) -> Result<()>;

    /// Blocks until a key is pressed.
    fn read_key(&mut self) -> Result<Key>;

    /// Returns a pending key press without waiting.
    fn poll_key(&mut self) -> Result<Option<Key>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_step_one_cell() {
        assert_eq!(Key::Up.step((5, 5)), Some((4, 5)));
        assert_eq!(Key::Down.step((5, 5)), Some((6, 5)));
        assert_eq!(Key::Left.step((5, 5)), Some((5, 4)));
        assert_eq!(Key::Right.step((5, 5)), Some((5, 6)));
    }

    #[test]
    fn other_keys_do_not_step() {
        assert_eq!(Key::Quit.step((5, 5)), None);
        assert_eq!(Key::Debug.step((5, 5)), None);
        assert_eq!(Key::Other.step((5, 5)), None);
    }
}
