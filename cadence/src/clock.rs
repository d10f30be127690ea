//! # Clock Module - Time Collaborator
//!
//! A session measures time in whole seconds delivered by its host: the host calls
//! [`TypingSession::tick`](crate::TypingSession::tick) once per second while the
//! session's clock is running. The [`Clock`] trait is how the session arms and disarms
//! that tick source, and where it reads the wall-clock time for result timestamps.
//!
//! The session owns its clock. It starts it on the first typed character and stops it
//! on every way out of an active attempt: completion, manual finish, restart and drop.

use chrono::{DateTime, Utc};

/// Tick source and wall-clock for a session
pub trait Clock {
    /// Arm the tick source
    fn start(&mut self);

    /// Disarm the tick source. Must be safe to call when not running.
    fn stop(&mut self);

    /// Returns true while armed
    fn is_running(&self) -> bool;

    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn start(&mut self) {
        (**self).start();
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn is_running(&self) -> bool {
        (**self).is_running()
    }

    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// A clock driven entirely by the host
///
/// Records how often it was armed and disarmed, and can be pinned to a fixed
/// wall-clock time. Useful for headless hosts and for tests.
///
/// ```rust
/// use cadence::{Clock, ManualClock};
///
/// let mut clock = ManualClock::default();
/// clock.start();
/// assert!(clock.is_running());
/// clock.stop();
/// assert!(!clock.is_running());
/// assert_eq!(clock.starts(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    running: bool,
    starts: usize,
    stops: usize,
    fixed_now: Option<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock that always reports `now` as the wall-clock time
    pub fn fixed(now: DateTime<Utc>) -> Self {
        Self {
            fixed_now: Some(now),
            ..Self::default()
        }
    }

    /// How many times the clock went from stopped to running
    pub const fn starts(&self) -> usize {
        self.starts
    }

    /// How many times the clock went from running to stopped
    pub const fn stops(&self) -> usize {
        self.stops
    }
}

impl Clock for ManualClock {
    fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.starts += 1;
        }
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.stops += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }
}
