//! Core domain types for the code-guessing game.

use super::palette::{ColorId, PALETTE};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Difficulty preset chosen when a game starts or restarts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Four pegs, per-peg hints, absent colors are disabled.
    #[default]
    Easy,
    /// Five pegs, aggregate hint only.
    Difficult,
}

impl Difficulty {
    /// Number of pegs in the secret code for this preset.
    pub fn code_length(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Difficult => 5,
        }
    }

    /// Whether each peg's outcome is shown individually.
    pub fn shows_per_peg_hints(self) -> bool {
        matches!(self, Difficulty::Easy)
    }

    /// Whether colors proven absent from the secret are disabled.
    pub fn disables_absent_colors(self) -> bool {
        matches!(self, Difficulty::Easy)
    }

    /// Returns the display label for this preset.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Difficult => "Difficult",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of scoring a single peg of a committed guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Right color, right position.
    Correct,
    /// Color is in the code, but elsewhere.
    WrongPosition,
    /// Color does not account for any remaining peg of the code.
    Incorrect,
}

/// The hidden code the player is trying to break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretCode {
    pegs: Vec<ColorId>,
}

impl SecretCode {
    /// Samples each peg independently and uniformly from the palette.
    ///
    /// Colors may repeat.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        let pegs = (0..length)
            .map(|_| PALETTE[rng.random_range(0..PALETTE.len())])
            .collect();
        Self { pegs }
    }

    /// Wraps an explicit sequence of pegs.
    pub fn from_pegs(pegs: Vec<ColorId>) -> Self {
        Self { pegs }
    }

    /// Returns the pegs in order.
    pub fn pegs(&self) -> &[ColorId] {
        &self.pegs
    }

    /// Number of pegs.
    pub fn len(&self) -> usize {
        self.pegs.len()
    }

    /// Whether the code has no pegs.
    pub fn is_empty(&self) -> bool {
        self.pegs.is_empty()
    }

    /// Whether the color appears anywhere in the code.
    pub fn contains(&self, color: ColorId) -> bool {
        self.pegs.contains(&color)
    }
}

/// Aggregate counts of a row's outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HintSummary {
    /// Pegs scored `Correct`.
    pub correct: usize,
    /// Pegs scored `WrongPosition`.
    pub wrong_position: usize,
    /// Pegs scored `Incorrect`.
    pub incorrect: usize,
}

impl HintSummary {
    /// Tallies an outcome sequence.
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        outcomes
            .iter()
            .fold(HintSummary::default(), |mut summary, outcome| {
                match outcome {
                    Outcome::Correct => summary.correct += 1,
                    Outcome::WrongPosition => summary.wrong_position += 1,
                    Outcome::Incorrect => summary.incorrect += 1,
                }
                summary
            })
    }

    /// Total number of pegs covered.
    pub fn total(&self) -> usize {
        self.correct + self.wrong_position + self.incorrect
    }
}

/// A committed guess paired with its scored outcomes.
///
/// Records are created once on submission and never change afterwards;
/// hints always reflect the state at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    guess: Vec<ColorId>,
    outcomes: Vec<Outcome>,
}

impl GuessRecord {
    /// Scores `guess` against `secret` and freezes the result.
    #[instrument(skip(secret))]
    pub fn score(secret: &SecretCode, guess: Vec<ColorId>) -> Self {
        let outcomes = super::scoring::score(secret.pegs(), &guess);
        Self { guess, outcomes }
    }

    /// The committed guess.
    pub fn guess(&self) -> &[ColorId] {
        &self.guess
    }

    /// Per-peg outcomes, aligned with `guess`.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Whether every peg scored `Correct`.
    pub fn is_winning(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| *o == Outcome::Correct)
    }

    /// Aggregate counts of the outcomes.
    pub fn summary(&self) -> HintSummary {
        HintSummary::from_outcomes(&self.outcomes)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(guess: Vec<ColorId>, outcomes: Vec<Outcome>) -> Self {
        Self { guess, outcomes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_code_length_per_difficulty() {
        assert_eq!(Difficulty::Easy.code_length(), 4);
        assert_eq!(Difficulty::Difficult.code_length(), 5);
    }

    #[test]
    fn test_generate_uses_requested_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for length in [4, 5] {
            let secret = SecretCode::generate(length, &mut rng);
            assert_eq!(secret.len(), length);
            assert!(secret.pegs().iter().all(|c| PALETTE.contains(c)));
        }
    }

    #[test]
    fn test_generate_is_seed_deterministic() {
        let a = SecretCode::generate(5, &mut StdRng::seed_from_u64(42));
        let b = SecretCode::generate(5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_counts() {
        let record = GuessRecord::from_parts(
            vec![ColorId::Red; 4],
            vec![
                Outcome::Correct,
                Outcome::WrongPosition,
                Outcome::Correct,
                Outcome::Incorrect,
            ],
        );
        let summary = record.summary();
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.wrong_position, 1);
        assert_eq!(summary.incorrect, 1);
        assert_eq!(summary.total(), 4);
        assert!(!record.is_winning());
    }
}
