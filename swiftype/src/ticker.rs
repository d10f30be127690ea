use std::time::Duration;

use cadence::Clock;
use web_time::Instant;

/// A [`Clock`] backed by a monotonic deadline
///
/// The event loop polls it: [`due`](Self::due) tells how many whole periods passed
/// since the last poll, [`timeout`](Self::timeout) how long the loop may block.
#[derive(Debug, Clone)]
pub struct IntervalClock {
    period: Duration,
    next_tick: Option<Instant>,
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl IntervalClock {
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            next_tick: None,
        }
    }

    /// Arm the clock as of `now`
    pub fn start_at(&mut self, now: Instant) {
        if self.next_tick.is_none() {
            self.next_tick = Some(now + self.period);
        }
    }

    /// Number of ticks that became due up to `now`
    ///
    /// Each tick is reported once. A stopped clock never has ticks due.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next_tick) = self.next_tick else {
            return 0;
        };

        let mut ticks = 0;
        while next_tick <= now {
            ticks += 1;
            next_tick += self.period;
        }

        self.next_tick = Some(next_tick);
        ticks
    }

    /// Time left until the next tick, `None` while stopped
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|next_tick| next_tick.saturating_duration_since(now))
    }
}

impl Clock for IntervalClock {
    fn start(&mut self) {
        self.start_at(Instant::now());
    }

    fn stop(&mut self) {
        self.next_tick = None;
    }

    fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }
}
