//! Attempts bound invariant.

use super::super::Session;
use super::Invariant;

/// Invariant: never more rows than `attempts_max`, and the current
/// guess never longer than the code.
pub struct AttemptsBoundedInvariant;

impl Invariant<Session> for AttemptsBoundedInvariant {
    fn holds(session: &Session) -> bool {
        session.records().len() <= session.attempts_max()
            && session.current_guess().len() <= session.code_length()
    }

    fn description() -> &'static str {
        "Row count within attempts_max and current guess within code length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::games::codebreaker::{ColorId, Difficulty, GuessRecord, SecretCode};

    #[test]
    fn test_too_many_rows_violate() {
        let config = GameConfig::default().with_attempts_max(1);
        let mut s = Session::new(
            0,
            Difficulty::Easy,
            SecretCode::from_pegs(vec![ColorId::Green; 4]),
            &config,
            0,
        );
        let record = GuessRecord::score(s.secret(), vec![ColorId::Red; 4]);
        s.records_mut().push(record.clone());
        assert!(AttemptsBoundedInvariant::holds(&s));
        s.records_mut().push(record);
        assert!(!AttemptsBoundedInvariant::holds(&s));
    }
}
