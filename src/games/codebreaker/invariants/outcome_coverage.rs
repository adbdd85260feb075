//! Outcome coverage invariant: every row scores every peg exactly once.

use super::super::Session;
use super::Invariant;

/// Invariant: each record has one outcome per peg.
///
/// Both the guess and the outcome sequence are `code_length` long, so
/// the correct, wrong-position and incorrect counts partition the code.
pub struct OutcomeCoverageInvariant;

impl Invariant<Session> for OutcomeCoverageInvariant {
    fn holds(session: &Session) -> bool {
        let n = session.code_length();
        session.records().iter().all(|record| {
            record.guess().len() == n
                && record.outcomes().len() == n
                && record.summary().total() == n
        })
    }

    fn description() -> &'static str {
        "Every record has exactly one outcome per peg"
    }
}
