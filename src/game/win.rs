//! Full-board four-in-a-row scanner.
//!
//! Every window is bounded by the board edges; no index is ever taken
//! modulo the board size, so a line can never continue from column 7 into
//! column 0 of the next row.

use super::board::{Board, Cell, COLS, ROWS};
use super::player::Player;

const LINE: usize = 4;

/// Scan the whole board for four of `player`'s pieces in a line.
///
/// Only the mover's cells are considered. The first line found is enough.
pub fn scan(board: &Board, player: Player) -> bool {
    let target = player.to_cell();
    horizontal(board, target)
        || vertical(board, target)
        || diagonal_up(board, target)
        || diagonal_down(board, target)
}

/// True if `cells` contains a run of at least four `target` cells.
fn has_run(cells: impl Iterator<Item = Cell>, target: Cell) -> bool {
    let mut streak = 0;
    for cell in cells {
        if cell == target {
            streak += 1;
            if streak >= LINE {
                return true;
            }
        } else {
            streak = 0;
        }
    }
    false
}

fn horizontal(board: &Board, target: Cell) -> bool {
    (0..ROWS).any(|row| has_run((0..COLS).map(|col| board.get(col, row)), target))
}

fn vertical(board: &Board, target: Cell) -> bool {
    (0..COLS).any(|col| has_run((0..ROWS).map(|row| board.get(col, row)), target))
}

/// Bottom-left to top-right, windows starting at col <= 4, row <= 4.
fn diagonal_up(board: &Board, target: Cell) -> bool {
    (0..=COLS - LINE).any(|col| {
        (0..=ROWS - LINE).any(|row| (0..LINE).all(|k| board.get(col + k, row + k) == target))
    })
}

/// Top-left to bottom-right, windows starting at col <= 4, row >= 3.
fn diagonal_down(board: &Board, target: Cell) -> bool {
    (0..=COLS - LINE).any(|col| {
        (LINE - 1..ROWS).any(|row| (0..LINE).all(|k| board.get(col + k, row - k) == target))
    })
}
