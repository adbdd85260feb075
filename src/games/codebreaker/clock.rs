//! Game clock: a per-second countdown that ends the game at zero.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Clock phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    /// Not started yet (countdown gate still showing).
    Idle,
    /// Counting down.
    Running,
    /// Paused by the player; resumable.
    Suspended,
    /// Stopped for good after a win.
    Stopped,
    /// Reached zero.
    Expired,
}

/// What a clock tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// One second elapsed.
    Counted {
        /// Seconds remaining after the tick.
        seconds_left: u32,
    },
    /// The last second elapsed.
    Expired,
    /// Clock not running.
    Ignored,
}

/// Countdown clock with low-time flashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    seconds_left: u32,
    state: ClockState,
    flash: bool,
    flash_threshold: u32,
}

impl Clock {
    /// Creates an idle clock.
    pub fn new(seconds: u32, flash_threshold: u32) -> Self {
        Self {
            seconds_left: seconds,
            state: ClockState::Idle,
            flash: false,
            flash_threshold,
        }
    }

    /// Seconds remaining.
    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    /// Current phase.
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Whether the clock counts down on its next tick.
    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Whether the clock reached zero.
    pub fn is_expired(&self) -> bool {
        self.state == ClockState::Expired
    }

    /// Low-time flash phase.
    pub fn flash(&self) -> bool {
        self.flash
    }

    /// Starts counting from idle.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> bool {
        if self.state != ClockState::Idle || self.seconds_left == 0 {
            return false;
        }
        self.state = ClockState::Running;
        true
    }

    /// Suspends a running clock, keeping the remaining time.
    #[instrument(skip(self))]
    pub fn suspend(&mut self) -> bool {
        if self.state != ClockState::Running {
            return false;
        }
        self.state = ClockState::Suspended;
        true
    }

    /// Resumes a suspended clock.
    #[instrument(skip(self))]
    pub fn resume(&mut self) -> bool {
        if self.state != ClockState::Suspended || self.seconds_left == 0 {
            return false;
        }
        self.state = ClockState::Running;
        true
    }

    /// Stops the clock permanently, unless it already expired.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        if self.state != ClockState::Expired {
            self.state = ClockState::Stopped;
            self.flash = false;
        }
    }

    /// Counts down one second.
    #[instrument(skip(self), fields(seconds_left = self.seconds_left, state = ?self.state))]
    pub fn tick(&mut self) -> ClockTick {
        if self.state != ClockState::Running {
            return ClockTick::Ignored;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            debug!("Clock expired");
            self.state = ClockState::Expired;
            return ClockTick::Expired;
        }
        if self.seconds_left <= self.flash_threshold {
            self.flash = !self.flash;
        }
        ClockTick::Counted {
            seconds_left: self.seconds_left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_clock_ignores_ticks() {
        let mut clock = Clock::new(120, 10);
        assert_eq!(clock.tick(), ClockTick::Ignored);
        assert_eq!(clock.seconds_left(), 120);
    }

    #[test]
    fn test_counts_down_while_running() {
        let mut clock = Clock::new(120, 10);
        assert!(clock.start());
        assert_eq!(clock.tick(), ClockTick::Counted { seconds_left: 119 });
        assert!(!clock.flash());
    }

    #[test]
    fn test_suspend_resume_keeps_time() {
        let mut clock = Clock::new(120, 10);
        clock.start();
        clock.tick();
        assert!(clock.suspend());
        assert_eq!(clock.tick(), ClockTick::Ignored);
        assert!(clock.resume());
        assert_eq!(clock.seconds_left(), 119);
        assert!(!clock.resume());
    }

    #[test]
    fn test_flash_toggles_below_threshold() {
        let mut clock = Clock::new(12, 10);
        clock.start();
        clock.tick(); // 11
        assert!(!clock.flash());
        clock.tick(); // 10
        assert!(clock.flash());
        clock.tick(); // 9
        assert!(!clock.flash());
    }

    #[test]
    fn test_expires_at_zero() {
        let mut clock = Clock::new(2, 10);
        clock.start();
        clock.tick();
        assert_eq!(clock.tick(), ClockTick::Expired);
        assert_eq!(clock.seconds_left(), 0);
        assert!(clock.is_expired());
        assert!(!clock.is_running());
        assert!(!clock.resume());
    }

    #[test]
    fn test_stop_is_permanent() {
        let mut clock = Clock::new(60, 10);
        clock.start();
        clock.stop();
        assert!(!clock.resume());
        assert!(!clock.suspend());
        assert_eq!(clock.tick(), ClockTick::Ignored);
        assert_eq!(clock.state(), ClockState::Stopped);
    }
}
