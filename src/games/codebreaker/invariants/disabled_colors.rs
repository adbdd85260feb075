//! Disabled colors invariant.

use super::super::Session;
use super::Invariant;

/// Invariant: only Easy sessions disable colors, and only colors that
/// are absent from the secret.
pub struct DisabledColorsInvariant;

impl Invariant<Session> for DisabledColorsInvariant {
    fn holds(session: &Session) -> bool {
        if !session.difficulty().disables_absent_colors() {
            return session.disabled_colors().is_empty();
        }
        session
            .disabled_colors()
            .iter()
            .all(|color| !session.secret().contains(*color))
    }

    fn description() -> &'static str {
        "Disabled colors are absent from the secret and only used on Easy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::games::codebreaker::{ColorId, Difficulty, SecretCode};

    fn session(difficulty: Difficulty) -> Session {
        let length = difficulty.code_length();
        Session::new(
            0,
            difficulty,
            SecretCode::from_pegs(vec![ColorId::Blue; length]),
            &GameConfig::default(),
            0,
        )
    }

    #[test]
    fn test_absent_color_on_easy_holds() {
        let mut s = session(Difficulty::Easy);
        s.disabled_colors_mut().insert(ColorId::Red);
        assert!(DisabledColorsInvariant::holds(&s));
    }

    #[test]
    fn test_secret_color_disabled_violates() {
        let mut s = session(Difficulty::Easy);
        s.disabled_colors_mut().insert(ColorId::Blue);
        assert!(!DisabledColorsInvariant::holds(&s));
    }

    #[test]
    fn test_any_disabled_on_difficult_violates() {
        let mut s = session(Difficulty::Difficult);
        s.disabled_colors_mut().insert(ColorId::Red);
        assert!(!DisabledColorsInvariant::holds(&s));
    }
}
