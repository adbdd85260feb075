//! Virtual-time timer queue.
//!
//! All waiting in the engine is expressed as timers queued here. The
//! queue never sleeps: whoever drives the session decides how far time
//! moves (a test advances it by hand, the async runtime follows the
//! wall clock). Repeating timers reschedule themselves when they fire.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What a timer drives when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// One step of the pre-game 3-2-1 countdown.
    CountdownTick,
    /// One second of the game clock.
    ClockTick,
    /// Disclose the next peg of the revealing row.
    RevealTick,
    /// Return the reveal sequencer to idle.
    RevealSettle,
    /// Show the game-over overlay.
    GameOverOverlay,
}

/// A fired timer, stamped with the session generation that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerEvent {
    /// What to drive.
    pub kind: TimerKind,
    /// Session generation at scheduling time.
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    due: Duration,
    seq: u64,
    event: TimerEvent,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending timers ordered by due time, then by scheduling order.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    seq: u64,
    pending: BinaryHeap<Reverse<Entry>>,
}

impl TimerQueue {
    /// Creates an empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queues `kind` to fire `delay` from now.
    #[instrument(skip(self), fields(now = ?self.now))]
    pub fn schedule(&mut self, kind: TimerKind, generation: u64, delay: Duration) {
        let due = self.now + delay;
        self.seq += 1;
        debug!(?due, "Timer scheduled");
        self.pending.push(Reverse(Entry {
            due,
            seq: self.seq,
            event: TimerEvent { kind, generation },
        }));
    }

    /// Drops every pending timer of `kind`.
    #[instrument(skip(self))]
    pub fn cancel(&mut self, kind: TimerKind) {
        self.pending.retain(|Reverse(entry)| entry.event.kind != kind);
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Whether a timer of `kind` is pending.
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending
            .iter()
            .any(|Reverse(entry)| entry.event.kind == kind)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.peek().map(|Reverse(entry)| entry.due)
    }

    /// Pops the earliest timer due at or before `until`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerEvent> {
        match self.pending.peek() {
            Some(Reverse(entry)) if entry.due <= until => {}
            _ => return None,
        }
        let Reverse(entry) = self.pending.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry.event)
    }

    /// Moves the clock forward to `to` (never backwards).
    pub fn set_now(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_pops_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKind::ClockTick, 0, ms(1000));
        queue.schedule(TimerKind::RevealTick, 0, ms(120));
        queue.schedule(TimerKind::RevealSettle, 0, ms(500));

        assert_eq!(queue.next_due(), Some(ms(120)));
        let kinds: Vec<_> = std::iter::from_fn(|| queue.pop_due(ms(2000)))
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![TimerKind::RevealTick, TimerKind::RevealSettle, TimerKind::ClockTick]
        );
        assert_eq!(queue.now(), ms(1000));
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKind::ClockTick, 0, ms(500));
        queue.schedule(TimerKind::GameOverOverlay, 0, ms(500));
        assert_eq!(queue.pop_due(ms(500)).map(|e| e.kind), Some(TimerKind::ClockTick));
        assert_eq!(
            queue.pop_due(ms(500)).map(|e| e.kind),
            Some(TimerKind::GameOverOverlay)
        );
    }

    #[test]
    fn test_pop_due_respects_horizon() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKind::ClockTick, 3, ms(1000));
        assert_eq!(queue.pop_due(ms(999)), None);
        let event = queue.pop_due(ms(1000)).unwrap();
        assert_eq!(event.generation, 3);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel_removes_only_that_kind() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKind::ClockTick, 0, ms(1000));
        queue.schedule(TimerKind::RevealTick, 0, ms(120));
        queue.cancel(TimerKind::ClockTick);
        assert!(!queue.is_pending(TimerKind::ClockTick));
        assert!(queue.is_pending(TimerKind::RevealTick));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_delays_are_relative_to_now() {
        let mut queue = TimerQueue::new();
        queue.set_now(ms(2000));
        queue.schedule(TimerKind::ClockTick, 0, ms(1000));
        assert_eq!(queue.next_due(), Some(ms(3000)));
        queue.set_now(ms(100));
        assert_eq!(queue.now(), ms(2000));
    }
}
