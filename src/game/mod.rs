//! Core Connect Four rules: packed board store, gravity drop, full-board win
//! scan and the turn/winner state machine.

mod board;
mod drop;
mod player;
mod state;
pub mod win;

pub use board::{cell_index, Board, Cell, COLS, ROWS};
pub use drop::{resolve_drop, DropTarget};
pub use player::Player;
pub use state::{GameState, GameStatus, MoveError, Placement};
