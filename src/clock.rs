//! Simulation clock: the single source of simulated time.

use crate::types::Ticks;

/// Monotonic discrete time source.
///
/// All components read `now()`; only the engine's tick pipeline (and the
/// dispatcher, for the context-switch overhead) advance it. There is no
/// rollback and no reset after construction.
#[derive(Debug, Default)]
pub struct Clock {
    now: Ticks,
}

impl Clock {
    pub fn new() -> Clock {
        Clock { now: Ticks::ZERO }
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    /// Advance time by exactly one tick.
    pub fn advance(&mut self) {
        self.now += Ticks::ONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_one_tick_at_a_time() {
        let mut clock = Clock::new();
        assert_eq!(clock.now(), Ticks(0));
        clock.advance();
        clock.advance();
        assert_eq!(clock.now(), Ticks(2));
        assert_eq!(clock.now().as_units(), 1.0);
    }
}
