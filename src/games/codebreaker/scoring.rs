//! Peg scoring.

use super::palette::ColorId;
use super::types::Outcome;
use tracing::instrument;

/// Scores a guess against the secret, one outcome per position.
///
/// Exact matches are claimed first, left to right. Each remaining guess
/// peg then claims the leftmost unclaimed secret peg of the same color.
/// A secret peg is claimed at most once, so repeated colors are never
/// double-counted and the outcomes always cover every position.
///
/// Both slices must have the same length.
#[instrument]
pub fn score(secret: &[ColorId], guess: &[ColorId]) -> Vec<Outcome> {
    debug_assert_eq!(secret.len(), guess.len(), "secret and guess lengths differ");

    // `None` marks a peg already consumed by an earlier match.
    let mut secret_work: Vec<Option<ColorId>> = secret.iter().copied().map(Some).collect();
    let mut guess_work: Vec<Option<ColorId>> = guess.iter().copied().map(Some).collect();
    let mut outcomes = vec![Outcome::Incorrect; guess.len()];

    for i in 0..guess_work.len().min(secret_work.len()) {
        if guess_work[i].is_some() && guess_work[i] == secret_work[i] {
            outcomes[i] = Outcome::Correct;
            secret_work[i] = None;
            guess_work[i] = None;
        }
    }

    for (i, slot) in guess_work.iter_mut().enumerate() {
        let Some(color) = *slot else {
            continue;
        };
        if let Some(j) = secret_work.iter().position(|s| *s == Some(color)) {
            outcomes[i] = Outcome::WrongPosition;
            secret_work[j] = None;
            *slot = None;
        }
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::codebreaker::palette::PALETTE;
    use ColorId::*;
    use Outcome::*;

    fn counts(outcomes: &[Outcome]) -> (usize, usize, usize) {
        let c = outcomes.iter().filter(|o| **o == Correct).count();
        let w = outcomes.iter().filter(|o| **o == WrongPosition).count();
        let i = outcomes.iter().filter(|o| **o == Incorrect).count();
        (c, w, i)
    }

    #[test]
    fn test_repeated_colors_not_double_counted() {
        // The only green is taken by the exact match at 2, so the greens
        // at 1 and 3 have nothing left to claim.
        let outcomes = score(&[Red, Red, Green, Blue], &[Red, Green, Green, Green]);
        assert_eq!(outcomes, vec![Correct, Incorrect, Correct, Incorrect]);
    }

    #[test]
    fn test_repeated_guess_color_claims_one_leftover() {
        let outcomes = score(&[Red, Red, Green, Blue], &[Green, Red, Blue, Green]);
        assert_eq!(outcomes, vec![WrongPosition, Correct, WrongPosition, Incorrect]);
    }

    #[test]
    fn test_identical_codes_all_correct() {
        let secret = [Yellow, Cyan, Cyan, White, Magenta];
        assert_eq!(score(&secret, &secret), vec![Correct; 5]);
    }

    #[test]
    fn test_disjoint_colors_all_incorrect() {
        let outcomes = score(&[Red, Red, Red, Red], &[Blue, Green, Cyan, White]);
        assert_eq!(outcomes, vec![Incorrect; 4]);
    }

    #[test]
    fn test_exact_match_beats_earlier_wrong_position() {
        // Guess R at 0 must not steal the secret R at 1, which matches exactly.
        let outcomes = score(&[Blue, Red, Green, Green], &[Red, Red, Yellow, Yellow]);
        assert_eq!(outcomes, vec![Incorrect, Correct, Incorrect, Incorrect]);
    }

    #[test]
    fn test_wrong_position_claims_leftmost_secret_peg() {
        let outcomes = score(&[Green, Red, Red, Blue], &[Red, Blue, Yellow, Red]);
        assert_eq!(outcomes, vec![WrongPosition, WrongPosition, Incorrect, WrongPosition]);
    }

    #[test]
    fn test_full_permutation_all_wrong_position() {
        let outcomes = score(&[Red, Green, Blue, Yellow], &[Yellow, Red, Green, Blue]);
        assert_eq!(outcomes, vec![WrongPosition; 4]);
    }

    #[test]
    fn test_counts_cover_every_position() {
        // Exhaustive over a 3-color slice of the palette at length 4.
        let colors = &PALETTE[..3];
        let codes: Vec<[ColorId; 4]> = (0..81)
            .map(|n| {
                [
                    colors[n % 3],
                    colors[(n / 3) % 3],
                    colors[(n / 9) % 3],
                    colors[(n / 27) % 3],
                ]
            })
            .collect();
        for secret in &codes {
            for guess in &codes {
                let outcomes = score(secret, guess);
                let (c, w, i) = counts(&outcomes);
                assert_eq!(c + w + i, 4);
                // Symmetry of the aggregate: swapping roles keeps the totals.
                let (c2, w2, _) = counts(&score(guess, secret));
                assert_eq!((c, w), (c2, w2));
            }
        }
    }
}
