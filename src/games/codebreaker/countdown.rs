//! Pre-game 3-2-1 countdown gate.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Countdown overlay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownGate {
    /// Overlay showing this value; input is blocked.
    Showing(u32),
    /// Overlay gone; the clock may run.
    Dismissed,
}

/// What a countdown tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Value decreased but is still above zero.
    Counting(u32),
    /// Reached zero; the gate is dismissed and the clock should start.
    Finished,
    /// Already dismissed.
    Ignored,
}

impl CountdownGate {
    /// Arms the gate at `from`, or leaves it dismissed when `from` is zero.
    pub fn armed(from: u32) -> Self {
        if from == 0 {
            CountdownGate::Dismissed
        } else {
            CountdownGate::Showing(from)
        }
    }

    /// Whether the overlay is showing.
    pub fn is_active(&self) -> bool {
        matches!(self, CountdownGate::Showing(_))
    }

    /// Value on the overlay, if showing.
    pub fn value(&self) -> Option<u32> {
        match self {
            CountdownGate::Showing(value) => Some(*value),
            CountdownGate::Dismissed => None,
        }
    }

    /// Counts down one second.
    #[instrument]
    pub fn tick(&mut self) -> CountdownStep {
        match *self {
            CountdownGate::Showing(value) if value > 1 => {
                *self = CountdownGate::Showing(value - 1);
                CountdownStep::Counting(value - 1)
            }
            CountdownGate::Showing(_) => {
                *self = CountdownGate::Dismissed;
                CountdownStep::Finished
            }
            CountdownGate::Dismissed => CountdownStep::Ignored,
        }
    }
}
