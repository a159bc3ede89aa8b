//! Nullable clock: deterministic time for testing.

use std::cell::Cell;
use vtk_types::{Clock, Timestamp};

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
#[derive(Debug, Default)]
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get().saturating_add(secs));
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: u64) {
        self.current.set(secs);
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_only_moves_when_told() {
        let clock = NullClock::new(1_000);
        assert_eq!(clock.now(), Timestamp::new(1_000));
        assert_eq!(clock.now(), Timestamp::new(1_000));

        clock.advance(86_400);
        assert_eq!(clock.now(), Timestamp::new(87_400));

        clock.set(5);
        assert_eq!(clock.now(), Timestamp::new(5));
    }

    #[test]
    fn works_through_shared_references() {
        let clock = std::rc::Rc::new(NullClock::new(0));
        let handle = std::rc::Rc::clone(&clock);
        handle.advance(10);
        assert_eq!(clock.now(), Timestamp::new(10));
    }
}
