use tracing::{debug, info};

use super::board::{Board, COLS};
use super::drop::{resolve_drop, DropTarget};
use super::player::Player;
use super::win;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// Terminal; only a reset leaves this state.
    GameOver { winner: Player },
}

/// Why a drop request left the game unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {0} is outside the board")]
    InvalidColumn(usize),

    #[error("game is already over")]
    GameOver,
}

/// An accepted drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub column: usize,
    pub row: usize,
    pub player: Player,
    pub won: bool,
}

/// Turn, winner and board of one game. The only writer of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::A, // A starts
            status: GameStatus::InProgress,
        }
    }

    /// Reinitialise everything; there is no partial reset.
    pub fn reset(&mut self) {
        *self = GameState::initial();
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::GameOver { winner } => Some(winner),
        }
    }

    /// Winner register code: 0 none, 1 player A, 2 player B.
    pub fn winner_code(&self) -> u8 {
        self.winner().map_or(0, Player::code)
    }

    /// Check if game is over
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver { .. })
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Any `Err` leaves board, turn and status untouched.
    pub fn drop_piece(&mut self, column: usize) -> Result<Placement, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if column >= COLS {
            return Err(MoveError::InvalidColumn(column));
        }

        let row = match resolve_drop(&self.board, column) {
            DropTarget::Row(row) => row,
            DropTarget::Full => return Err(MoveError::ColumnFull(column)),
        };

        let player = self.current_player;
        self.board.place(column, row, player.to_cell());
        let won = win::scan(&self.board, player);

        if won {
            info!(player = player.name(), column, row, "four in a row");
            self.status = GameStatus::GameOver { winner: player };
        } else {
            debug!(player = player.name(), column, row, "piece placed");
            self.current_player = player.other();
        }

        Ok(Placement {
            column,
            row,
            player,
            won,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
