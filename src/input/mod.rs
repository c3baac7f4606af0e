//! Actuation inputs: debouncing, rising-edge detection and the column cursor.

mod conditioner;
mod cursor;

pub use conditioner::{EdgeDetector, InputConditioner};
pub use cursor::CursorController;

/// One logical input level, sampled once per tick. At most one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Actuation {
    #[default]
    NoInput,
    MoveLeft,
    MoveRight,
    Drop,
}

impl Actuation {
    pub fn is_active(self) -> bool {
        self != Actuation::NoInput
    }
}
