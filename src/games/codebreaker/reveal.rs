//! Reveal sequencer: discloses a committed row one peg at a time.
//!
//! ```text
//! Idle --begin(r)--> Revealing(r, 0) --tick--> Revealing(r, 1) ... Revealing(r, n-1)
//!                                                                        |
//!                                   Idle <--settle-- Settling(r) <--tick-+
//! ```
//!
//! The sequencer only tracks progress. Deciding win or loss when a row
//! completes is the controller's job, since that touches the session.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Reveal progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RevealState {
    /// No row is being revealed; the next row accepts input.
    #[default]
    Idle,
    /// Pegs `0..=peg` of `row` are disclosed.
    Revealing {
        /// Row being revealed.
        row: usize,
        /// Highest disclosed peg.
        peg: usize,
    },
    /// Every peg of `row` is disclosed; waiting to return to idle.
    Settling {
        /// Row that just finished.
        row: usize,
    },
}

/// What a reveal tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// Another peg was disclosed.
    Advanced {
        /// Row being revealed.
        row: usize,
        /// Peg just disclosed.
        peg: usize,
    },
    /// The last peg was already out; the row is complete.
    Completed {
        /// Row that finished.
        row: usize,
    },
    /// Not revealing; nothing happened.
    Ignored,
}

/// Timer-driven state machine for one row at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevealSequencer {
    state: RevealState,
}

impl RevealSequencer {
    /// Creates an idle sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Whether a row is revealing or settling.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, RevealState::Idle)
    }

    /// Row currently revealing or settling.
    pub fn active_row(&self) -> Option<usize> {
        match self.state {
            RevealState::Idle => None,
            RevealState::Revealing { row, .. } | RevealState::Settling { row } => Some(row),
        }
    }

    /// Starts revealing `row`, disclosing its first peg.
    ///
    /// Returns `false` and changes nothing unless idle.
    #[instrument(skip(self))]
    pub fn begin(&mut self, row: usize) -> bool {
        if self.is_active() {
            debug!(state = ?self.state, "Reveal already active");
            return false;
        }
        self.state = RevealState::Revealing { row, peg: 0 };
        true
    }

    /// Advances one peg, or completes the row after the last one.
    #[instrument(skip(self), fields(state = ?self.state))]
    pub fn tick(&mut self, code_length: usize) -> RevealStep {
        match self.state {
            RevealState::Revealing { row, peg } if peg + 1 < code_length => {
                self.state = RevealState::Revealing { row, peg: peg + 1 };
                RevealStep::Advanced { row, peg: peg + 1 }
            }
            RevealState::Revealing { row, .. } => {
                self.state = RevealState::Settling { row };
                RevealStep::Completed { row }
            }
            RevealState::Idle | RevealState::Settling { .. } => RevealStep::Ignored,
        }
    }

    /// Returns to idle after settling, yielding the finished row.
    #[instrument(skip(self), fields(state = ?self.state))]
    pub fn settle(&mut self) -> Option<usize> {
        match self.state {
            RevealState::Settling { row } => {
                self.state = RevealState::Idle;
                Some(row)
            }
            _ => None,
        }
    }

    /// How many pegs of the active row are disclosed.
    pub fn revealed_peg_count(&self, code_length: usize) -> usize {
        match self.state {
            RevealState::Idle => 0,
            RevealState::Revealing { peg, .. } => peg + 1,
            RevealState::Settling { .. } => code_length,
        }
    }

    /// Whether `peg` of `row` may be shown.
    ///
    /// Rows other than the active one are fully disclosed.
    pub fn is_disclosed(&self, row: usize, peg: usize) -> bool {
        match self.state {
            RevealState::Revealing { row: active, peg: upto } if active == row => peg <= upto,
            _ => true,
        }
    }

    /// Whether every peg of `row` is disclosed.
    pub fn is_row_complete(&self, row: usize) -> bool {
        !matches!(self.state, RevealState::Revealing { row: active, .. } if active == row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle_for_four_pegs() {
        let mut seq = RevealSequencer::new();
        assert!(seq.begin(2));
        assert_eq!(seq.revealed_peg_count(4), 1);

        assert_eq!(seq.tick(4), RevealStep::Advanced { row: 2, peg: 1 });
        assert_eq!(seq.tick(4), RevealStep::Advanced { row: 2, peg: 2 });
        assert_eq!(seq.tick(4), RevealStep::Advanced { row: 2, peg: 3 });
        assert_eq!(seq.revealed_peg_count(4), 4);
        assert!(!seq.is_row_complete(2));

        assert_eq!(seq.tick(4), RevealStep::Completed { row: 2 });
        assert_eq!(seq.state(), RevealState::Settling { row: 2 });
        assert!(seq.is_active());
        assert!(seq.is_row_complete(2));

        assert_eq!(seq.settle(), Some(2));
        assert_eq!(seq.state(), RevealState::Idle);
        assert_eq!(seq.revealed_peg_count(4), 0);
    }

    #[test]
    fn test_begin_rejected_while_active() {
        let mut seq = RevealSequencer::new();
        assert!(seq.begin(0));
        assert!(!seq.begin(1));
        assert_eq!(seq.active_row(), Some(0));
    }

    #[test]
    fn test_idle_ignores_ticks_and_settle() {
        let mut seq = RevealSequencer::new();
        assert_eq!(seq.tick(5), RevealStep::Ignored);
        assert_eq!(seq.settle(), None);
    }

    #[test]
    fn test_settle_only_from_settling() {
        let mut seq = RevealSequencer::new();
        seq.begin(0);
        assert_eq!(seq.settle(), None);
        assert!(seq.is_active());
    }

    #[test]
    fn test_disclosure_only_limits_active_row() {
        let mut seq = RevealSequencer::new();
        seq.begin(3);
        seq.tick(5);
        assert!(seq.is_disclosed(3, 0));
        assert!(seq.is_disclosed(3, 1));
        assert!(!seq.is_disclosed(3, 2));
        assert!(seq.is_disclosed(1, 4));
    }
}
