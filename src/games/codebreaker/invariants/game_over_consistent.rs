//! Game-over consistency invariant.

use super::super::Session;
use super::Invariant;

/// Invariant: the end-of-game flags agree with how the game got there.
///
/// - `won` implies `game_over` and a last row of all `Correct`.
/// - `game_over` implies a win, an expired clock, or every row used
///   with no reveal still running.
/// - An expired clock implies `game_over` and not `won`.
pub struct GameOverConsistentInvariant;

impl Invariant<Session> for GameOverConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let won_ok = !session.is_won()
            || (session.is_game_over()
                && session
                    .records()
                    .last()
                    .is_some_and(|record| record.is_winning()));

        let rows_exhausted = session.records().len() >= session.attempts_max()
            && session
                .records()
                .len()
                .checked_sub(1)
                .is_some_and(|last| session.reveal().is_row_complete(last));
        let over_ok = !session.is_game_over()
            || session.is_won()
            || session.clock().is_expired()
            || rows_exhausted;

        let expiry_ok =
            !session.clock().is_expired() || (session.is_game_over() && !session.is_won());

        won_ok && over_ok && expiry_ok
    }

    fn description() -> &'static str {
        "game_over and won agree with the last row, the clock and the row count"
    }
}
