//! Contract-based validation for session commands.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(session, command)} command {Q(before, after)}. A command whose
//! precondition fails is dropped before it touches the session.

use super::action::{Command, CommandError};
use super::invariants::{InvariantSet, SessionInvariants};
use super::palette::ColorId;
use super::session::{Overlay, Session};
use tracing::{error, instrument};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), CommandError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), CommandError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not ended.
pub struct GameInPlay;

impl GameInPlay {
    /// Checks the precondition.
    pub fn check(session: &Session) -> Result<(), CommandError> {
        if session.is_game_over() {
            Err(CommandError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the pre-game countdown is gone.
pub struct CountdownDismissed;

impl CountdownDismissed {
    /// Checks the precondition.
    pub fn check(session: &Session) -> Result<(), CommandError> {
        if session.countdown().is_active() {
            Err(CommandError::CountdownActive)
        } else {
            Ok(())
        }
    }
}

/// Precondition: no overlay covers the board.
pub struct BoardUncovered;

impl BoardUncovered {
    /// Checks the precondition.
    pub fn check(session: &Session) -> Result<(), CommandError> {
        if session.overlay() != Overlay::None {
            Err(CommandError::Paused)
        } else {
            Ok(())
        }
    }
}

/// Precondition: an overlay is showing and the clock can run again.
pub struct Resumable;

impl Resumable {
    /// Checks the precondition.
    pub fn check(session: &Session) -> Result<(), CommandError> {
        if session.clock().seconds_left() == 0 {
            return Err(CommandError::ClockExpired);
        }
        if session.overlay() == Overlay::None {
            return Err(CommandError::NotPaused);
        }
        Ok(())
    }
}

/// Precondition: no row is revealing.
pub struct RevealIdle;

impl RevealIdle {
    /// Checks the precondition.
    pub fn check(session: &Session) -> Result<(), CommandError> {
        match session.reveal().active_row() {
            Some(row) => Err(CommandError::RevealActive(row)),
            None => Ok(()),
        }
    }
}

/// Precondition: the current guess has room for another color.
pub struct GuessHasRoom;

impl GuessHasRoom {
    /// Checks the precondition.
    pub fn check(session: &Session) -> Result<(), CommandError> {
        let have = session.current_guess().len();
        if have >= session.code_length() {
            Err(CommandError::GuessFull(have))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the color has not been disabled.
pub struct ColorEnabled;

impl ColorEnabled {
    /// Checks the precondition.
    pub fn check(session: &Session, color: ColorId) -> Result<(), CommandError> {
        if session.is_disabled(color) {
            Err(CommandError::ColorDisabled(color))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the current guess has something to erase.
pub struct GuessNotEmpty;

impl GuessNotEmpty {
    /// Checks the precondition.
    pub fn check(session: &Session) -> Result<(), CommandError> {
        if session.current_guess().is_empty() {
            Err(CommandError::GuessEmpty)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the current guess is a full code.
pub struct GuessComplete;

impl GuessComplete {
    /// Checks the precondition.
    pub fn check(session: &Session) -> Result<(), CommandError> {
        let have = session.current_guess().len();
        let need = session.code_length();
        if have != need {
            Err(CommandError::GuessIncomplete { have, need })
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Command Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for every player command.
///
/// Guess editing requires a live, uncovered board with no reveal
/// running. Pausing requires a live board past the countdown. Restart
/// is always allowed.
///
/// Postcondition: every session invariant holds.
pub struct CommandContract;

impl Contract<Session, Command> for CommandContract {
    #[instrument(skip(session))]
    fn pre(session: &Session, command: &Command) -> Result<(), CommandError> {
        match *command {
            Command::AddColor(color) => {
                editable(session)?;
                GuessHasRoom::check(session)?;
                ColorEnabled::check(session, color)
            }
            Command::EraseLast => {
                editable(session)?;
                GuessNotEmpty::check(session)
            }
            Command::SubmitGuess => {
                editable(session)?;
                GuessComplete::check(session)
            }
            Command::Pause | Command::ShowHelp => {
                GameInPlay::check(session)?;
                CountdownDismissed::check(session)?;
                BoardUncovered::check(session)
            }
            Command::Resume => {
                GameInPlay::check(session)?;
                CountdownDismissed::check(session)?;
                Resumable::check(session)
            }
            Command::Restart(_) => Ok(()),
        }
    }

    fn post(_before: &Session, after: &Session) -> Result<(), CommandError> {
        check_invariants(after)
    }
}

fn editable(session: &Session) -> Result<(), CommandError> {
    GameInPlay::check(session)?;
    CountdownDismissed::check(session)?;
    BoardUncovered::check(session)?;
    RevealIdle::check(session)
}

/// Checks every session invariant, folding violations into one error.
pub fn check_invariants(session: &Session) -> Result<(), CommandError> {
    SessionInvariants::check_all(session).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        CommandError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

/// Asserts that all session invariants hold (panic on violation in debug builds).
#[instrument(skip(session), fields(generation = session.generation()))]
pub fn assert_invariants(session: &Session) {
    if let Err(e) = check_invariants(session) {
        error!(error = %e, "Session invariant violated");
        debug_assert!(false, "{}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::games::codebreaker::{Difficulty, SecretCode};
    use ColorId::*;

    fn live(difficulty: Difficulty) -> Session {
        let secret = SecretCode::from_pegs(vec![Red; difficulty.code_length()]);
        Session::new(0, difficulty, secret, &GameConfig::default(), 0)
    }

    #[test]
    fn test_add_color_allowed_on_live_board() {
        let s = live(Difficulty::Easy);
        assert!(CommandContract::pre(&s, &Command::AddColor(Green)).is_ok());
    }

    #[test]
    fn test_add_color_rejected_when_full() {
        let mut s = live(Difficulty::Easy);
        for _ in 0..4 {
            s.push_color(Green);
        }
        assert_eq!(
            CommandContract::pre(&s, &Command::AddColor(Green)),
            Err(CommandError::GuessFull(4))
        );
    }

    #[test]
    fn test_submit_requires_full_guess() {
        let mut s = live(Difficulty::Difficult);
        s.push_color(Blue);
        assert_eq!(
            CommandContract::pre(&s, &Command::SubmitGuess),
            Err(CommandError::GuessIncomplete { have: 1, need: 5 })
        );
    }

    #[test]
    fn test_countdown_blocks_editing() {
        let secret = SecretCode::from_pegs(vec![Red; 4]);
        let s = Session::new(0, Difficulty::Easy, secret, &GameConfig::default(), 3);
        assert_eq!(
            CommandContract::pre(&s, &Command::AddColor(Red)),
            Err(CommandError::CountdownActive)
        );
        assert_eq!(
            CommandContract::pre(&s, &Command::Pause),
            Err(CommandError::CountdownActive)
        );
        assert!(CommandContract::pre(&s, &Command::Restart(Difficulty::Easy)).is_ok());
    }

    #[test]
    fn test_game_over_blocks_everything_but_restart() {
        let mut s = live(Difficulty::Easy);
        s.force_game_over(false);
        for command in [
            Command::AddColor(Red),
            Command::EraseLast,
            Command::SubmitGuess,
            Command::Pause,
            Command::Resume,
        ] {
            assert_eq!(CommandContract::pre(&s, &command), Err(CommandError::GameOver));
        }
        assert!(CommandContract::pre(&s, &Command::Restart(Difficulty::Difficult)).is_ok());
    }

    #[test]
    fn test_overlay_blocks_editing() {
        let mut s = live(Difficulty::Easy);
        s.set_overlay(Overlay::Help);
        assert_eq!(
            CommandContract::pre(&s, &Command::EraseLast),
            Err(CommandError::Paused)
        );
        assert!(CommandContract::pre(&s, &Command::Resume).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = live(Difficulty::Easy);
        let mut after = before.clone();
        after.disabled_colors_mut().insert(Red);
        assert!(CommandContract::post(&before, &after).is_err());
    }
}
