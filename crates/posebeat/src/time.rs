use std::cell::Cell;
use std::time::Instant;

use tracing::warn;

/// Paces the game loop at a fixed tick length.
///
/// After a stall at most `max_catch_up` ticks run back to back; the rest are
/// dropped and counted, and the schedule keeps its phase.
#[derive(Debug, Clone)]
pub struct FixedTicker {
    tick_us: i64,
    next_due_us: i64,
    max_catch_up: u32,
    dropped: u64,
}

impl FixedTicker {
    /// First tick is due at `start_us`.
    pub fn new(tick_us: i64, start_us: i64, max_catch_up: u32) -> Self {
        Self {
            tick_us: tick_us.max(1),
            next_due_us: start_us,
            max_catch_up: max_catch_up.max(1),
            dropped: 0,
        }
    }

    /// How many ticks to run at `now_us`.
    pub fn due(&mut self, now_us: i64) -> u32 {
        if now_us < self.next_due_us {
            return 0;
        }
        let owed = (now_us - self.next_due_us) / self.tick_us + 1;
        self.next_due_us += owed * self.tick_us;

        let limit = i64::from(self.max_catch_up);
        if owed > limit {
            let dropped = (owed - limit) as u64;
            self.dropped += dropped;
            warn!(dropped, total = self.dropped, "tick loop fell behind");
            return self.max_catch_up;
        }
        owed as u32
    }

    /// Sleep budget before the next tick, 0 if one is already owed.
    pub fn until_next_us(&self, now_us: i64) -> i64 {
        (self.next_due_us - now_us).max(0)
    }

    pub fn tick_us(&self) -> i64 {
        self.tick_us
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Microsecond clock the ticker is driven from.
pub trait Clock {
    fn now_us(&self) -> i64;
}

/// Wall clock, zero at construction.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_us(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_micros()).unwrap_or(i64::MAX)
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_us: Cell<i64>,
}

impl ManualClock {
    pub fn starting_at(us: i64) -> Self {
        Self {
            now_us: Cell::new(us),
        }
    }

    pub fn advance(&self, us: i64) {
        self.now_us.set(self.now_us.get() + us);
    }
}

impl Clock for ManualClock {
    fn now_us(&self) -> i64 {
        self.now_us.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ticks run while stepping `clock` forward `steps` times by `step_us`.
    fn ticks_over(clock: &ManualClock, ticker: &mut FixedTicker, steps: u32, step_us: i64) -> u32 {
        let mut ran = ticker.due(clock.now_us());
        for _ in 0..steps {
            clock.advance(step_us);
            ran += ticker.due(clock.now_us());
        }
        ran
    }

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::starting_at(42);
        assert_eq!(clock.now_us(), 42);
        clock.advance(1_000);
        clock.advance(500);
        assert_eq!(clock.now_us(), 1_542);
    }

    #[test]
    fn monotonic_clock_never_goes_back() {
        let clock = MonotonicClock::new();
        let first = clock.now_us();
        assert!(first >= 0);
        assert!(clock.now_us() >= first);
    }

    #[test]
    fn ticker_runs_on_schedule() {
        let clock = ManualClock::default();
        let mut ticker = FixedTicker::new(33_333, 0, 5);

        assert_eq!(ticker.due(clock.now_us()), 1);
        assert_eq!(ticker.due(clock.now_us()), 0);
        assert_eq!(ticker.until_next_us(clock.now_us()), 33_333);

        clock.advance(20_000);
        assert_eq!(ticker.due(clock.now_us()), 0);
        clock.advance(13_333);
        assert_eq!(ticker.due(clock.now_us()), 1);
    }

    #[test]
    fn ticker_keeps_rate_under_jittery_polling() {
        // Polling every 7ms for one second at 100 ticks per second.
        let clock = ManualClock::default();
        let mut ticker = FixedTicker::new(10_000, 0, 5);
        let ran = ticks_over(&clock, &mut ticker, 142, 7_000);
        assert_eq!(clock.now_us(), 994_000);
        assert_eq!(ran, 100);
        assert_eq!(ticker.dropped(), 0);
    }

    #[test]
    fn ticker_catches_up_within_limit() {
        let clock = ManualClock::default();
        let mut ticker = FixedTicker::new(10_000, 0, 5);
        ticker.due(clock.now_us());

        clock.advance(30_000);
        assert_eq!(ticker.due(clock.now_us()), 3);
        assert_eq!(ticker.dropped(), 0);
    }

    #[test]
    fn ticker_drops_excess_ticks() {
        let clock = ManualClock::default();
        let mut ticker = FixedTicker::new(10_000, 0, 4);
        ticker.due(clock.now_us());

        // A one second stall owes 100 ticks.
        clock.advance(1_000_000);
        assert_eq!(ticker.due(clock.now_us()), 4);
        assert_eq!(ticker.dropped(), 96);
        assert_eq!(ticker.due(clock.now_us()), 0);
        assert_eq!(ticker.until_next_us(clock.now_us()), 10_000);
    }
}
