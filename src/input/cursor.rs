use super::Actuation;
use crate::game::COLS;

/// Column selected for the next drop. Always in `0..COLS`, wraps on move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorController {
    column: usize,
}

impl CursorController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Apply one edge-triggered actuation. Returns true if the cursor moved.
    pub fn apply(&mut self, actuation: Actuation) -> bool {
        match actuation {
            Actuation::MoveRight => {
                self.column = (self.column + 1) % COLS;
                true
            }
            Actuation::MoveLeft => {
                self.column = (self.column + COLS - 1) % COLS;
                true
            }
            Actuation::Drop | Actuation::NoInput => false,
        }
    }

    pub fn reset(&mut self) {
        self.column = 0;
    }
}
