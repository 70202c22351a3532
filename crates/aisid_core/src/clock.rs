use std::cell::Cell;
use std::rc::Rc;

use time::{Duration, OffsetDateTime};

/// Source of "now" for store timestamps.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Manually driven clock. Clones share the same instant, so a test can keep a handle
/// after moving one into a store.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Rc<Cell<OffsetDateTime>>,
}

impl FixedClock {
    pub fn new(instant: OffsetDateTime) -> Self {
        Self {
            instant: Rc::new(Cell::new(instant)),
        }
    }

    pub fn set(&self, instant: OffsetDateTime) {
        self.instant.set(instant);
    }

    pub fn advance(&self, by: Duration) {
        self.instant.set(self.instant.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.instant.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn fixed_clock_clones_share_the_instant() {
        let clock = FixedClock::new(datetime!(2024-01-01 00:00 UTC));
        let handle = clock.clone();
        handle.advance(Duration::minutes(5));
        assert_eq!(clock.now(), datetime!(2024-01-01 00:05 UTC));
    }
}
