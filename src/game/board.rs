use crate::error::BoardError;

pub const ROWS: usize = 8;
pub const COLS: usize = 8;

/// Bits per cell in the packed board register.
const CELL_BITS: u32 = 2;
const CELL_MASK: u128 = 0b11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
}

impl Cell {
    /// Two-bit code of the cell: 0 empty, 1 player A, 2 player B.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::PlayerA => 1,
            Cell::PlayerB => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::PlayerA),
            2 => Some(Cell::PlayerB),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Linear cell index shared by the packed register and the debug bus address.
pub fn cell_index(col: usize, row: usize) -> usize {
    (row << 3) | col
}

/// The 8x8 board store, indexed `[col][row]` with row 0 at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; ROWS]; COLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; ROWS]; COLS],
        }
    }

    /// Get the cell at a specific position.
    /// Row 0 is the bottom of the column.
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.cells[col][row]
    }

    /// Write a piece into an empty cell.
    ///
    /// Only the drop resolver picks the target, so the cell is always the
    /// lowest empty one in its column.
    pub(crate) fn place(&mut self, col: usize, row: usize, cell: Cell) {
        debug_assert!(self.cells[col][row].is_empty(), "cell ({col},{row}) already taken");
        self.cells[col][row] = cell;
    }

    /// Read-only copy used by the scanner and the query port.
    pub fn snapshot(&self) -> Board {
        *self
    }

    /// Clear every cell back to empty.
    pub fn clear(&mut self) {
        self.cells = [[Cell::Empty; ROWS]; COLS];
    }

    /// Number of pieces in a column.
    pub fn column_height(&self, col: usize) -> usize {
        self.cells[col].iter().take_while(|c| !c.is_empty()).count()
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| !c.is_empty())
            .count()
    }

    /// The board as the 128-bit register of the hardware design, two bits
    /// per cell at bit offset `2 * cell_index(col, row)`.
    pub fn packed(&self) -> u128 {
        let mut bits = 0u128;
        for col in 0..COLS {
            for row in 0..ROWS {
                let shift = CELL_BITS * cell_index(col, row) as u32;
                bits |= u128::from(self.cells[col][row].code()) << shift;
            }
        }
        bits
    }

    /// Rebuild a board from its packed register.
    pub fn from_packed(bits: u128) -> Result<Board, BoardError> {
        let mut board = Board::new();
        for col in 0..COLS {
            for row in 0..ROWS {
                let index = cell_index(col, row);
                let code = ((bits >> (CELL_BITS * index as u32)) & CELL_MASK) as u8;
                board.cells[col][row] =
                    Cell::from_code(code).ok_or(BoardError::InvalidCellCode { index, code })?;
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for col in 0..COLS {
            for row in 0..ROWS {
                assert_eq!(board.get(col, row), Cell::Empty);
            }
        }
        assert_eq!(board.packed(), 0);
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_place_and_read() {
        let mut board = Board::new();
        board.place(3, 0, Cell::PlayerA);
        board.place(3, 1, Cell::PlayerB);
        assert_eq!(board.get(3, 0), Cell::PlayerA);
        assert_eq!(board.get(3, 1), Cell::PlayerB);
        assert_eq!(board.column_height(3), 2);
        assert_eq!(board.column_height(4), 0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut board = Board::new();
        let snap = board.snapshot();
        board.place(0, 0, Cell::PlayerA);
        assert_eq!(snap.get(0, 0), Cell::Empty);
    }

    #[test]
    fn test_packed_layout() {
        let mut board = Board::new();
        board.place(0, 0, Cell::PlayerA);
        assert_eq!(board.packed(), 0b01);

        // Row 1, column 2 is index 10, bits 21:20.
        board.place(2, 0, Cell::PlayerA);
        board.place(2, 1, Cell::PlayerB);
        let expected = 0b01 | (0b01 << 4) | (0b10 << 20);
        assert_eq!(board.packed(), expected);
    }

    #[test]
    fn test_from_packed_restores_board() {
        let mut board = Board::new();
        board.place(7, 0, Cell::PlayerB);
        board.place(7, 1, Cell::PlayerA);
        board.place(0, 0, Cell::PlayerA);
        assert_eq!(Board::from_packed(board.packed()).unwrap(), board);
    }

    #[test]
    fn test_from_packed_rejects_code_three() {
        let err = Board::from_packed(0b11 << 6).unwrap_err();
        assert_eq!(err, BoardError::InvalidCellCode { index: 3, code: 3 });
    }

    #[test]
    fn test_clear() {
        let mut board = Board::new();
        board.place(5, 0, Cell::PlayerB);
        board.clear();
        assert_eq!(board, Board::new());
    }
}
