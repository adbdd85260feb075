//! Codebreaker library - a timed code-breaking game engine
//!
//! The player has a limited number of rows to find a hidden sequence of
//! colored pegs. Every committed guess is scored peg by peg, revealed one
//! peg at a time, and raced against a game clock.
//!
//! # Architecture
//!
//! - **Engine**: [`SessionController`] owns the [`Session`] and applies
//!   [`Command`]s and timer events one at a time, on virtual time
//! - **Runtime**: [`runtime::spawn`] drives a controller from tokio time
//! - **Config**: [`GameConfig`] holds rules and timings, loadable from TOML
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use codebreaker::{ColorId, Difficulty, GameConfig, SessionController};
//!
//! # fn main() -> Result<(), codebreaker::ConfigError> {
//! let config = GameConfig::default().with_countdown(0, false);
//! let mut game = SessionController::with_seed(config, Difficulty::Easy, 7)?;
//!
//! for color in [ColorId::Red, ColorId::Green, ColorId::Blue, ColorId::Yellow] {
//!     game.add_color(color);
//! }
//! game.submit_guess();
//! game.advance(Duration::from_secs(1));
//!
//! assert_eq!(game.snapshot().rows.len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod games;
pub mod runtime;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Runtime
pub use runtime::{GameHandle, RuntimeError};

// Crate-level exports - Game engine
pub use games::codebreaker::{
    Clock, ClockState, ColorId, ColorParseError, Command, CommandError, CountdownGate,
    Difficulty, GuessRecord, HintSummary, Outcome, Overlay, PALETTE, RevealSequencer,
    RevealState, RowHint, RowView, SecretCode, Session, SessionController, SessionSnapshot,
    TimerEvent, TimerKind, TimerQueue, score,
};

// Crate-level exports - Contracts and invariants
pub use games::codebreaker::{contracts, invariants};
