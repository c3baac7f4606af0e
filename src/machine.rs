//! Tick-driven top level of the game engine.
//!
//! [`ConnectFour::tick`] advances every component by one clock step: the
//! debug port ages its pending answers, reset and initialisation are
//! handled, the input level is debounced and edge-detected, and an accepted
//! drop is resolved, scanned and committed within the same tick.

use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::debug_bus::{BusRequest, DebugPort, QueryTarget};
use crate::game::{Board, Cell, GameState, GameStatus, MoveError, Player};
use crate::input::{Actuation, CursorController, EdgeDetector, InputConditioner};

/// Everything the host drives on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInput {
    pub reset: bool,
    pub actuation: Actuation,
    pub query: Option<BusRequest>,
}

impl TickInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn reset() -> Self {
        TickInput {
            reset: true,
            ..Self::default()
        }
    }

    pub fn press(actuation: Actuation) -> Self {
        TickInput {
            actuation,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, request: BusRequest) -> Self {
        self.query = Some(request);
        self
    }
}

/// Observable outcome of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Initialisation finished; input is sampled from the next tick on.
    Ready,
    CursorMoved {
        column: usize,
    },
    PiecePlaced {
        column: usize,
        row: usize,
        player: Player,
    },
    /// The placed piece completed a line; the game is over.
    GameWon {
        column: usize,
        row: usize,
        player: Player,
    },
    /// The drop was a no-op.
    DropRejected(MoveError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Reset,
    Initializing { elapsed: u32 },
    Ready,
}

/// Read-only view handed to the debug port.
struct Readback<'a> {
    game: &'a GameState,
    cursor: &'a CursorController,
}

impl QueryTarget for Readback<'_> {
    fn cell(&self, col: usize, row: usize) -> Cell {
        self.game.board().get(col, row)
    }

    fn cursor_column(&self) -> usize {
        self.cursor.column()
    }

    fn winner_code(&self) -> u8 {
        self.game.winner_code()
    }
}

pub struct ConnectFour {
    config: EngineConfig,
    phase: Phase,
    game: GameState,
    cursor: CursorController,
    conditioner: InputConditioner,
    edge: EdgeDetector,
    port: DebugPort,
    ticks: u64,
}

impl ConnectFour {
    /// A machine whose reset has just been released; it becomes ready after
    /// `init_ticks` ticks.
    pub fn new(config: EngineConfig) -> Self {
        ConnectFour {
            phase: Phase::Initializing { elapsed: 0 },
            game: GameState::initial(),
            cursor: CursorController::new(),
            conditioner: InputConditioner::new(config.debounce_ticks),
            edge: EdgeDetector::new(),
            port: DebugPort::new(config.query_latency),
            ticks: 0,
            config,
        }
    }

    /// A machine that has already finished initialisation.
    pub fn ready(config: EngineConfig) -> Self {
        let mut machine = Self::new(config);
        machine.run_until_ready();
        machine
    }

    /// Advance one clock step.
    pub fn tick(&mut self, input: TickInput) -> Option<Event> {
        self.ticks += 1;
        self.port.advance();

        let event = if input.reset {
            self.hold_reset();
            None
        } else {
            match self.phase {
                Phase::Reset => self.step_init(0),
                Phase::Initializing { elapsed } => self.step_init(elapsed),
                Phase::Ready => self.step(input.actuation),
            }
        };

        if let Some(request) = input.query {
            let view = Readback {
                game: &self.game,
                cursor: &self.cursor,
            };
            self.port.present(request, &view);
        }

        if let Some(event) = &event {
            trace!(tick = self.ticks, ?event, "tick");
        }
        event
    }

    /// Idle until initialisation completes. Returns the ticks spent.
    pub fn run_until_ready(&mut self) -> u64 {
        let start = self.ticks;
        while !self.is_ready() {
            self.tick(TickInput::idle());
        }
        self.ticks - start
    }

    fn hold_reset(&mut self) {
        if self.phase != Phase::Reset {
            debug!(tick = self.ticks, "reset asserted");
        }
        self.phase = Phase::Reset;
        self.game.reset();
        self.cursor.reset();
        self.conditioner.reset();
        self.edge.reset();
        self.port.reset();
    }

    fn step_init(&mut self, elapsed: u32) -> Option<Event> {
        let elapsed = elapsed + 1;
        if elapsed >= self.config.init_ticks {
            self.phase = Phase::Ready;
            info!(tick = self.ticks, "controller initialised");
            Some(Event::Ready)
        } else {
            self.phase = Phase::Initializing { elapsed };
            None
        }
    }

    fn step(&mut self, raw: Actuation) -> Option<Event> {
        let level = self.conditioner.sample(raw);
        match self.edge.detect(level)? {
            Actuation::Drop => Some(self.drop_at_cursor()),
            actuation => {
                self.cursor.apply(actuation).then(|| {
                    let column = self.cursor.column();
                    debug!(column, "cursor moved");
                    Event::CursorMoved { column }
                })
            }
        }
    }

    fn drop_at_cursor(&mut self) -> Event {
        match self.game.drop_piece(self.cursor.column()) {
            Ok(placed) if placed.won => Event::GameWon {
                column: placed.column,
                row: placed.row,
                player: placed.player,
            },
            Ok(placed) => Event::PiecePlaced {
                column: placed.column,
                row: placed.row,
                player: placed.player,
            },
            Err(err) => {
                debug!(%err, "drop ignored");
                Event::DropRejected(err)
            }
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Ticks since construction.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn board(&self) -> &Board {
        self.game.board()
    }

    pub fn cursor_column(&self) -> usize {
        self.cursor.column()
    }

    pub fn current_player(&self) -> Player {
        self.game.current_player()
    }

    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    pub fn winner(&self) -> Option<Player> {
        self.game.winner()
    }

    /// Value of the debug bus output register.
    pub fn bus_output(&self) -> u8 {
        self.port.output()
    }

    pub fn query_latency(&self) -> u32 {
        self.port.latency()
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
