//! Timed code-breaking game.
//!
//! A [`SessionController`] owns one [`Session`] and is its only writer.
//! Player [`Command`]s and fired timers are applied one at a time; the
//! presentation layer reads a [`SessionSnapshot`] after each one.

mod action;
mod clock;
pub mod contracts;
mod controller;
mod countdown;
pub mod invariants;
mod palette;
mod reveal;
mod scheduler;
mod scoring;
mod session;
mod snapshot;
mod types;

pub use action::{Command, CommandError};
pub use clock::{Clock, ClockState, ClockTick};
pub use controller::SessionController;
pub use countdown::{CountdownGate, CountdownStep};
pub use palette::{ColorId, ColorParseError, PALETTE};
pub use reveal::{RevealSequencer, RevealState, RevealStep};
pub use scheduler::{TimerEvent, TimerKind, TimerQueue};
pub use scoring::score;
pub use session::{Overlay, Session};
pub use snapshot::{RowHint, RowView, SessionSnapshot};
pub use types::{Difficulty, GuessRecord, HintSummary, Outcome, SecretCode};
