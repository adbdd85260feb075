//! First-class command types for the game session.
//!
//! Commands are the only way the presentation layer mutates a session.
//! They can be validated against the current state before anything
//! changes, and a rejected command leaves the session untouched.

use super::palette::ColorId;
use super::types::Difficulty;
use serde::{Deserialize, Serialize};

/// A player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "command", content = "arg", rename_all = "snake_case")]
pub enum Command {
    /// Append a color to the current guess.
    AddColor(ColorId),
    /// Remove the last color of the current guess.
    EraseLast,
    /// Commit the current guess for scoring.
    SubmitGuess,
    /// Suspend the clock behind the paused overlay.
    Pause,
    /// Suspend the clock behind the help overlay.
    ShowHelp,
    /// Dismiss the overlay and restart the clock.
    Resume,
    /// Throw the session away and start over.
    Restart(Difficulty),
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::AddColor(color) => write!(f, "add {}", color),
            Command::EraseLast => write!(f, "erase"),
            Command::SubmitGuess => write!(f, "submit"),
            Command::Pause => write!(f, "pause"),
            Command::ShowHelp => write!(f, "help"),
            Command::Resume => write!(f, "resume"),
            Command::Restart(difficulty) => write!(f, "restart {}", difficulty),
        }
    }
}

/// Why a command was a no-op.
///
/// The named command methods swallow these; `SessionController::apply`
/// hands them back for callers that want to know.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CommandError {
    /// The game has already ended.
    #[display("Game is already over")]
    GameOver,

    /// The pre-game countdown is still showing.
    #[display("Countdown is still running")]
    CountdownActive,

    /// An overlay covers the board.
    #[display("Game is paused")]
    Paused,

    /// There is no overlay to dismiss.
    #[display("Game is not paused")]
    NotPaused,

    /// A committed row is still being revealed.
    #[display("Reveal in progress for row {}", _0)]
    RevealActive(usize),

    /// The current guess already holds a full code.
    #[display("Guess already has {} colors", _0)]
    GuessFull(usize),

    /// There is nothing to erase.
    #[display("Guess is empty")]
    GuessEmpty,

    /// The current guess is shorter than the code.
    #[display("Guess has {} of {} colors", have, need)]
    GuessIncomplete {
        /// Colors entered so far.
        have: usize,
        /// Code length.
        need: usize,
    },

    /// The color was proven absent and is disabled.
    #[display("{} is disabled", _0)]
    ColorDisabled(ColorId),

    /// The clock has run out.
    #[display("Time is up")]
    ClockExpired,

    /// A postcondition failed after applying a command.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for CommandError {}
