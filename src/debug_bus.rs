//! Command-multiplexed read-only debug port.
//!
//! A host presents a [`BusRequest`] (command code plus address) on one tick.
//! The port latches the decoded answer from the state at the end of that
//! tick and shows it on its output register `latency` ticks later, where it
//! stays until a newer answer replaces it.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::game::{cell_index, Cell, COLS, ROWS};

pub const CMD_READ_BOARD_CELL: u8 = 1;
pub const CMD_READ_CURRENT_COLUMN: u8 = 2;
pub const CMD_READ_WINNER: u8 = 3;

const ADDRESS_MASK: u8 = 0x3F;

/// Raw request as seen on the bus pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusRequest {
    pub command: u8,
    pub address: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCommand {
    ReadBoardCell { row: usize, col: usize },
    ReadCurrentColumn,
    ReadWinner,
}

impl QueryCommand {
    /// Decode a bus request. Unknown command codes yield `None`.
    pub fn decode(request: BusRequest) -> Option<QueryCommand> {
        match request.command {
            CMD_READ_BOARD_CELL => {
                let address = usize::from(request.address & ADDRESS_MASK);
                Some(QueryCommand::ReadBoardCell {
                    row: address >> 3,
                    col: address & 0b111,
                })
            }
            CMD_READ_CURRENT_COLUMN => Some(QueryCommand::ReadCurrentColumn),
            CMD_READ_WINNER => Some(QueryCommand::ReadWinner),
            _ => None,
        }
    }

    pub fn encode(self) -> BusRequest {
        match self {
            QueryCommand::ReadBoardCell { row, col } => {
                debug_assert!(row < ROWS && col < COLS);
                BusRequest {
                    command: CMD_READ_BOARD_CELL,
                    address: cell_index(col, row) as u8,
                }
            }
            QueryCommand::ReadCurrentColumn => BusRequest {
                command: CMD_READ_CURRENT_COLUMN,
                address: 0,
            },
            QueryCommand::ReadWinner => BusRequest {
                command: CMD_READ_WINNER,
                address: 0,
            },
        }
    }
}

/// State the debug port can read back.
pub trait QueryTarget {
    fn cell(&self, col: usize, row: usize) -> Cell;
    fn cursor_column(&self) -> usize;
    fn winner_code(&self) -> u8;
}

/// Answer a query against `target` with its wire code.
pub fn respond(command: QueryCommand, target: &impl QueryTarget) -> u8 {
    match command {
        QueryCommand::ReadBoardCell { row, col } => target.cell(col, row).code(),
        QueryCommand::ReadCurrentColumn => target.cursor_column() as u8,
        QueryCommand::ReadWinner => target.winner_code(),
    }
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    remaining: u32,
    value: u8,
}

/// Fixed-latency response pipeline.
#[derive(Debug, Clone)]
pub struct DebugPort {
    latency: u32,
    in_flight: VecDeque<InFlight>,
    output: u8,
}

impl DebugPort {
    pub fn new(latency: u32) -> Self {
        DebugPort {
            latency: latency.max(1),
            in_flight: VecDeque::new(),
            output: 0,
        }
    }

    pub fn latency(&self) -> u32 {
        self.latency
    }

    /// Current value of the output register.
    pub fn output(&self) -> u8 {
        self.output
    }

    /// Age every pending answer by one tick, publishing those that are due.
    pub fn advance(&mut self) {
        for entry in &mut self.in_flight {
            entry.remaining -= 1;
        }
        while let Some(entry) = self.in_flight.front() {
            if entry.remaining > 0 {
                break;
            }
            self.output = entry.value;
            trace!(value = entry.value, "debug bus response");
            self.in_flight.pop_front();
        }
    }

    /// Latch a request against the current state. Malformed requests are
    /// dropped and leave the output register alone.
    pub fn present(&mut self, request: BusRequest, target: &impl QueryTarget) {
        let Some(command) = QueryCommand::decode(request) else {
            debug!(command = request.command, "ignoring unknown debug bus command");
            return;
        };
        let value = respond(command, target);
        trace!(?command, value, "debug bus request latched");
        self.in_flight.push_back(InFlight {
            remaining: self.latency,
            value,
        });
    }

    pub fn reset(&mut self) {
        self.in_flight.clear();
        self.output = 0;
    }
}
