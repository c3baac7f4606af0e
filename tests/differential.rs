//! Differential tests against an independent reference simulator.
//!
//! The reference keeps a row-major grid and scans for streaks of equal
//! non-empty neighbours, the way the bench-side model of the board does.
//! Board contents and winner must agree after every move.

use proptest::prelude::*;
use tt_connect_four::config::EngineConfig;
use tt_connect_four::debug_bus::QueryCommand;
use tt_connect_four::game::{Cell, GameState, MoveError, COLS, ROWS};
use tt_connect_four::host::HostDriver;

/// Reference model: `grid[row][col]`, codes 0/1/2.
struct Reference {
    grid: [[u8; COLS]; ROWS],
    turn: u8,
    winner: u8,
}

impl Reference {
    fn new() -> Self {
        Reference {
            grid: [[0; COLS]; ROWS],
            turn: 1,
            winner: 0,
        }
    }

    /// Returns false if the move was ignored.
    fn make_move(&mut self, col: usize) -> bool {
        if self.winner != 0 {
            return false;
        }
        let Some(row) = (0..ROWS).find(|&r| self.grid[r][col] == 0) else {
            return false;
        };
        self.grid[row][col] = self.turn;
        if self.check_victory() {
            self.winner = self.turn;
        } else {
            self.turn = if self.turn == 1 { 2 } else { 1 };
        }
        true
    }

    fn read(&self, x: usize, y: usize) -> u8 {
        self.grid[y][x]
    }

    fn check_victory(&self) -> bool {
        for y in 0..ROWS {
            let mut streak = 1;
            for x in 0..COLS - 1 {
                if self.read(x, y) != 0 && self.read(x, y) == self.read(x + 1, y) {
                    streak += 1;
                } else {
                    streak = 1;
                }
                if streak >= 4 {
                    return true;
                }
            }
        }
        for x in 0..COLS {
            let mut streak = 1;
            for y in 0..ROWS - 1 {
                if self.read(x, y) != 0 && self.read(x, y) == self.read(x, y + 1) {
                    streak += 1;
                } else {
                    streak = 1;
                }
                if streak >= 4 {
                    return true;
                }
            }
        }
        for x in 0..COLS - 3 {
            for y in 0..ROWS - 3 {
                let v = self.read(x, y);
                if v != 0
                    && v == self.read(x + 1, y + 1)
                    && v == self.read(x + 2, y + 2)
                    && v == self.read(x + 3, y + 3)
                {
                    return true;
                }
            }
        }
        for x in 0..COLS - 3 {
            for y in 3..ROWS {
                let v = self.read(x, y);
                if v != 0
                    && v == self.read(x + 1, y - 1)
                    && v == self.read(x + 2, y - 2)
                    && v == self.read(x + 3, y - 3)
                {
                    return true;
                }
            }
        }
        false
    }
}

fn assert_same_board(state: &GameState, reference: &Reference) {
    for row in 0..ROWS {
        for col in 0..COLS {
            assert_eq!(
                state.board().get(col, row).code(),
                reference.grid[row][col],
                "cell (row {row}, col {col}) differs"
            );
        }
    }
}

proptest! {
    #[test]
    fn game_state_matches_reference(moves in prop::collection::vec(0usize..COLS, 1..160)) {
        let mut state = GameState::initial();
        let mut reference = Reference::new();

        for col in moves {
            let turn_before = state.current_player();
            let accepted = reference.make_move(col);
            let result = state.drop_piece(col);
            prop_assert_eq!(result.is_ok(), accepted);
            if let Err(err) = result {
                prop_assert!(matches!(err, MoveError::ColumnFull(_) | MoveError::GameOver));
                prop_assert_eq!(state.current_player(), turn_before);
            }
            assert_same_board(&state, &reference);
            prop_assert_eq!(state.winner_code(), reference.winner);
            prop_assert_eq!(state.is_over(), reference.winner != 0);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn tick_machine_matches_reference(moves in prop::collection::vec(0usize..COLS, 1..70)) {
        let mut driver = HostDriver::new(&EngineConfig::default());
        let mut reference = Reference::new();

        for col in moves {
            reference.make_move(col);
            driver.drop_in(col);

            let board = driver.machine().board();
            for row in 0..ROWS {
                for c in 0..COLS {
                    prop_assert_eq!(board.get(c, row).code(), reference.grid[row][c]);
                }
            }
            prop_assert_eq!(driver.query(QueryCommand::ReadWinner), reference.winner);
            prop_assert_eq!(driver.query(QueryCommand::ReadCurrentColumn), col as u8);
            prop_assert_eq!(
                driver.query(QueryCommand::ReadBoardCell { row: 0, col }),
                reference.grid[0][col]
            );
        }
    }
}

/// A complete 64-move game in which nobody ever lines up four.
const DRAWN_GAME: [usize; 64] = [
    0, 3, 0, 0, 1, 0, 0, 3, 0, 0, 1, 0, 2, 1, 2, 1, 1, 2, 1, 1, 3, 1, 3, 2, 2, 3, 2, 2, 4, 2, 4, 3,
    3, 4, 3, 4, 4, 7, 4, 4, 5, 4, 5, 5, 6, 5, 5, 7, 5, 5, 6, 5, 7, 6, 7, 6, 6, 7, 6, 7, 7, 6, 7, 6,
];

#[test]
fn full_board_without_winner_stays_in_progress() {
    let mut state = GameState::initial();
    let mut reference = Reference::new();
    for col in DRAWN_GAME {
        assert!(reference.make_move(col));
        state.drop_piece(col).unwrap();
        assert_same_board(&state, &reference);
    }

    assert_eq!(state.board().piece_count(), COLS * ROWS);
    assert_eq!(state.winner_code(), 0);
    assert!(!state.is_over());

    let before = state;
    for col in 0..COLS {
        assert_eq!(state.drop_piece(col), Err(MoveError::ColumnFull(col)));
    }
    assert_eq!(state, before);
    assert_ne!(state.board().get(0, ROWS - 1), Cell::Empty);
}
