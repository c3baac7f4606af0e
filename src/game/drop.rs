use super::board::{Board, ROWS};

/// Where a piece dropped into a column lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Row(usize),
    Full,
}

/// Find the lowest empty row of `col`, scanning up from row 0.
pub fn resolve_drop(board: &Board, col: usize) -> DropTarget {
    (0..ROWS)
        .find(|&row| board.get(col, row).is_empty())
        .map_or(DropTarget::Full, DropTarget::Row)
}
