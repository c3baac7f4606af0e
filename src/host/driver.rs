use crate::config::EngineConfig;
use crate::debug_bus::QueryCommand;
use crate::game::COLS;
use crate::input::Actuation;
use crate::machine::{ConnectFour, Event, TickInput};

/// Shortest sequence of cursor moves from `from` to `to`, using wrap-around.
/// Ties go right.
pub fn plan_path(from: usize, to: usize) -> Vec<Actuation> {
    let right = (to + COLS - from) % COLS;
    let left = COLS - right;
    if right <= left {
        vec![Actuation::MoveRight; right]
    } else {
        vec![Actuation::MoveLeft; left]
    }
}

/// Drives a [`ConnectFour`] the way a test bench drives the pins: each
/// actuation is held for `hold_ticks` and followed by `release_ticks` idle
/// ticks, and bus reads wait out the response latency.
pub struct HostDriver {
    machine: ConnectFour,
    hold_ticks: u32,
    release_ticks: u32,
}

impl HostDriver {
    /// Wrap a freshly released machine and wait for it to become ready.
    ///
    /// Hold and release are stretched to at least one debounce window, so
    /// consecutive actuations always reach the machine as separate presses.
    pub fn new(config: &EngineConfig) -> Self {
        let window = config.debounce_ticks.max(1);
        HostDriver {
            machine: ConnectFour::ready(config.clone()),
            hold_ticks: config.hold_ticks.max(window),
            release_ticks: config.release_ticks.max(window),
        }
    }

    pub fn machine(&self) -> &ConnectFour {
        &self.machine
    }

    /// Assert reset for `ticks`, then wait out initialisation.
    pub fn reset(&mut self, ticks: u32) {
        for _ in 0..ticks.max(1) {
            self.machine.tick(TickInput::reset());
        }
        self.machine.run_until_ready();
    }

    pub fn idle(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.machine.tick(TickInput::idle());
        }
    }

    /// Press and release one actuation. Returns the event it caused, if any.
    pub fn actuate(&mut self, actuation: Actuation) -> Option<Event> {
        let mut event = None;
        for _ in 0..self.hold_ticks {
            if let Some(e) = self.machine.tick(TickInput::press(actuation)) {
                event.get_or_insert(e);
            }
        }
        for _ in 0..self.release_ticks {
            if let Some(e) = self.machine.tick(TickInput::idle()) {
                event.get_or_insert(e);
            }
        }
        event
    }

    /// Walk the cursor to `column` and drop there.
    pub fn drop_in(&mut self, column: usize) -> Option<Event> {
        debug_assert!(column < COLS, "column {column} out of range");
        for step in plan_path(self.machine.cursor_column(), column) {
            self.actuate(step);
        }
        self.actuate(Actuation::Drop)
    }

    /// Present a query, wait the response latency and read the bus.
    pub fn query(&mut self, command: QueryCommand) -> u8 {
        self.machine.tick(TickInput::idle().with_query(command.encode()));
        let latency = self.machine.query_latency();
        self.idle(latency);
        self.machine.bus_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player};

    #[test]
    fn test_plan_path_direct() {
        assert_eq!(plan_path(0, 2), vec![Actuation::MoveRight; 2]);
        assert_eq!(plan_path(5, 3), vec![Actuation::MoveLeft; 2]);
        assert!(plan_path(4, 4).is_empty());
    }

    #[test]
    fn test_plan_path_wraps() {
        assert_eq!(plan_path(0, 7), vec![Actuation::MoveLeft]);
        assert_eq!(plan_path(7, 0), vec![Actuation::MoveRight]);
        assert_eq!(plan_path(0, 4), vec![Actuation::MoveRight; 4]);
    }

    #[test]
    fn test_drop_in_moves_cursor_and_places() {
        let mut driver = HostDriver::new(&EngineConfig::default());
        let event = driver.drop_in(6);
        assert_eq!(
            event,
            Some(Event::PiecePlaced {
                column: 6,
                row: 0,
                player: Player::A
            })
        );
        assert_eq!(driver.machine().cursor_column(), 6);
        assert_eq!(driver.machine().board().get(6, 0), Cell::PlayerA);
    }

    #[test]
    fn test_query_reads_cell() {
        let mut driver = HostDriver::new(&EngineConfig::default());
        driver.drop_in(2);
        driver.drop_in(2);
        assert_eq!(driver.query(QueryCommand::ReadBoardCell { row: 0, col: 2 }), 1);
        assert_eq!(driver.query(QueryCommand::ReadBoardCell { row: 1, col: 2 }), 2);
        assert_eq!(driver.query(QueryCommand::ReadBoardCell { row: 2, col: 2 }), 0);
        assert_eq!(driver.query(QueryCommand::ReadCurrentColumn), 2);
    }

    #[test]
    fn test_slow_debounce_still_registers() {
        let config = EngineConfig {
            debounce_ticks: 3,
            hold_ticks: 4,
            release_ticks: 3,
            query_latency: 2,
            ..EngineConfig::default()
        };
        let mut driver = HostDriver::new(&config);
        driver.drop_in(1);
        assert_eq!(driver.query(QueryCommand::ReadBoardCell { row: 0, col: 1 }), 1);
    }

    #[test]
    fn test_zero_release_still_lands_in_target_column() {
        let config = EngineConfig {
            release_ticks: 0,
            ..EngineConfig::default()
        };
        let mut driver = HostDriver::new(&config);
        driver.drop_in(3);
        assert_eq!(driver.machine().cursor_column(), 3);
        assert_eq!(driver.machine().board().get(3, 0), Cell::PlayerA);
        assert_eq!(driver.machine().board().piece_count(), 1);
    }

    #[test]
    fn test_short_hold_and_release_are_stretched_to_debounce() {
        let config = EngineConfig {
            debounce_ticks: 3,
            hold_ticks: 1,
            release_ticks: 1,
            ..EngineConfig::default()
        };
        let mut driver = HostDriver::new(&config);
        driver.drop_in(5);
        driver.drop_in(4);
        assert_eq!(driver.machine().board().get(5, 0), Cell::PlayerA);
        assert_eq!(driver.machine().board().get(4, 0), Cell::PlayerB);
        assert_eq!(driver.machine().cursor_column(), 4);
    }

    #[test]
    fn test_reset_restarts_game() {
        let mut driver = HostDriver::new(&EngineConfig::default());
        driver.drop_in(3);
        driver.reset(10);
        assert_eq!(driver.machine().board().packed(), 0);
        assert_eq!(driver.query(QueryCommand::ReadCurrentColumn), 0);
    }
}
