use super::Actuation;

/// Debounces the raw input level.
///
/// A new level is accepted only after it has been sampled on
/// `debounce_ticks` consecutive ticks.
#[derive(Debug, Clone)]
pub struct InputConditioner {
    debounce_ticks: u32,
    stable: Actuation,
    candidate: Actuation,
    count: u32,
}

impl InputConditioner {
    pub fn new(debounce_ticks: u32) -> Self {
        InputConditioner {
            debounce_ticks: debounce_ticks.max(1),
            stable: Actuation::NoInput,
            candidate: Actuation::NoInput,
            count: 0,
        }
    }

    /// Sample the raw level for this tick and return the debounced level.
    pub fn sample(&mut self, raw: Actuation) -> Actuation {
        if raw == self.stable {
            self.candidate = raw;
            self.count = 0;
            return self.stable;
        }

        if raw == self.candidate {
            self.count += 1;
        } else {
            self.candidate = raw;
            self.count = 1;
        }

        if self.count >= self.debounce_ticks {
            self.stable = raw;
            self.count = 0;
        }
        self.stable
    }

    pub fn level(&self) -> Actuation {
        self.stable
    }

    pub fn reset(&mut self) {
        *self = InputConditioner::new(self.debounce_ticks);
    }
}

/// Turns a level into one event per press.
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    previous: Actuation,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the actuation on the tick its level first appears, `None`
    /// while it is held or released.
    pub fn detect(&mut self, level: Actuation) -> Option<Actuation> {
        let previous = std::mem::replace(&mut self.previous, level);
        (level.is_active() && level != previous).then_some(level)
    }

    pub fn reset(&mut self) {
        self.previous = Actuation::NoInput;
    }
}
