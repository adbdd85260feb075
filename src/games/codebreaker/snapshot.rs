//! Read-only projection of a session for the presentation layer.
//!
//! A snapshot is recomputed after every mutation. It withholds what the
//! player must not see yet: the secret until the game ends, and the
//! hints of a row until its reveal has disclosed them.

use serde::{Deserialize, Serialize};

use super::palette::ColorId;
use super::session::{Overlay, Session};
use super::types::{Difficulty, HintSummary, Outcome};

/// Hints of one committed row, as far as they are disclosed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RowHint {
    /// Easy: one entry per peg, `None` until that peg is revealed.
    PerPeg(Vec<Option<Outcome>>),
    /// Difficult: counts only, `None` until the whole row is revealed.
    Aggregate(Option<HintSummary>),
}

/// One committed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct RowView {
    /// Colors the player committed.
    pub guess: Vec<ColorId>,
    /// Disclosed hints.
    pub hint: RowHint,
}

/// Everything a renderer needs to draw a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session generation this snapshot came from.
    pub generation: u64,
    /// Difficulty preset.
    pub difficulty: Difficulty,
    /// The secret, once the game is over.
    pub secret: Option<Vec<ColorId>>,
    /// Committed rows, oldest first.
    pub rows: Vec<RowView>,
    /// Colors entered for the next row.
    pub current_guess: Vec<ColorId>,
    /// Rows per game.
    pub attempts_max: usize,
    /// Pegs per code.
    pub code_length: usize,
    /// Seconds on the clock.
    pub seconds_left: u32,
    /// Low-time flash phase.
    pub flash: bool,
    /// Whether the clock is counting.
    pub clock_running: bool,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Whether the code was broken.
    pub won: bool,
    /// Whether the game-over overlay is up.
    pub show_game_over_ui: bool,
    /// Colors the player can no longer pick.
    pub disabled_colors: Vec<ColorId>,
    /// Value on the countdown overlay, if showing.
    pub countdown: Option<u32>,
    /// Overlay covering the board.
    pub overlay: Overlay,
    /// Row currently revealing or settling.
    pub revealing_row_index: Option<usize>,
    /// Pegs of that row disclosed so far.
    pub revealed_peg_count: usize,
}

impl SessionSnapshot {
    /// Projects `session`.
    pub fn capture(session: &Session) -> Self {
        let reveal = session.reveal();
        let clock = session.clock();
        let code_length = session.code_length();

        let rows = session
            .records()
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let hint = if session.difficulty().shows_per_peg_hints() {
                    RowHint::PerPeg(
                        record
                            .outcomes()
                            .iter()
                            .enumerate()
                            .map(|(peg, outcome)| {
                                reveal.is_disclosed(row, peg).then_some(*outcome)
                            })
                            .collect(),
                    )
                } else {
                    RowHint::Aggregate(reveal.is_row_complete(row).then(|| record.summary()))
                };
                RowView::new(record.guess().to_vec(), hint)
            })
            .collect();

        Self {
            generation: session.generation(),
            difficulty: session.difficulty(),
            secret: session
                .is_game_over()
                .then(|| session.secret().pegs().to_vec()),
            rows,
            current_guess: session.current_guess().to_vec(),
            attempts_max: session.attempts_max(),
            code_length,
            seconds_left: clock.seconds_left(),
            flash: clock.flash(),
            clock_running: clock.is_running(),
            game_over: session.is_game_over(),
            won: session.is_won(),
            show_game_over_ui: session.show_game_over_ui(),
            disabled_colors: session.disabled_colors().iter().copied().collect(),
            countdown: session.countdown().value(),
            overlay: session.overlay(),
            revealing_row_index: reveal.active_row(),
            revealed_peg_count: reveal.revealed_peg_count(code_length),
        }
    }

    /// Rows committed so far.
    pub fn attempts_used(&self) -> usize {
        self.rows.len()
    }

    /// Whether the board accepts guess edits right now.
    pub fn accepts_input(&self) -> bool {
        !self.game_over
            && self.countdown.is_none()
            && self.overlay == Overlay::None
            && self.revealing_row_index.is_none()
    }

    /// Whether `color` is disabled.
    pub fn is_disabled(&self, color: ColorId) -> bool {
        self.disabled_colors.contains(&color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::games::codebreaker::{SecretCode, SessionController};
    use ColorId::*;
    use std::time::Duration;

    fn session(difficulty: Difficulty) -> Session {
        let pegs = vec![Red, Green, Blue, Yellow, Cyan][..difficulty.code_length()].to_vec();
        Session::new(
            0,
            difficulty,
            SecretCode::from_pegs(pegs),
            &GameConfig::default(),
            0,
        )
    }

    #[test]
    fn test_secret_withheld_until_game_over() {
        let mut s = session(Difficulty::Easy);
        assert_eq!(SessionSnapshot::capture(&s).secret, None);
        s.force_game_over(false);
        assert_eq!(
            SessionSnapshot::capture(&s).secret,
            Some(vec![Red, Green, Blue, Yellow])
        );
    }

    #[test]
    fn test_per_peg_hints_follow_reveal() {
        let mut s = session(Difficulty::Easy);
        for c in [Red, White, Green, White] {
            s.push_color(c);
        }
        let row = s.commit_guess();
        s.reveal_mut().begin(row);
        s.reveal_mut().tick(4);

        let snap = SessionSnapshot::capture(&s);
        assert_eq!(
            snap.rows[0].hint,
            RowHint::PerPeg(vec![
                Some(Outcome::Correct),
                Some(Outcome::Incorrect),
                None,
                None
            ])
        );
        assert_eq!(snap.revealing_row_index, Some(0));
        assert_eq!(snap.revealed_peg_count, 2);
        assert!(!snap.accepts_input());
    }

    #[test]
    fn test_aggregate_hint_waits_for_full_row() {
        let mut s = session(Difficulty::Difficult);
        for c in [Green, Red, Blue, White, White] {
            s.push_color(c);
        }
        let row = s.commit_guess();
        s.reveal_mut().begin(row);
        assert_eq!(
            SessionSnapshot::capture(&s).rows[0].hint,
            RowHint::Aggregate(None)
        );

        for _ in 0..5 {
            s.reveal_mut().tick(5);
        }
        assert_eq!(
            SessionSnapshot::capture(&s).rows[0].hint,
            RowHint::Aggregate(Some(HintSummary {
                correct: 1,
                wrong_position: 2,
                incorrect: 2,
            }))
        );
    }

    #[test]
    fn test_snapshot_serializes_for_presentation() {
        let config = GameConfig::default().with_countdown(0, false);
        let mut c = SessionController::with_seed(config, Difficulty::Easy, 5).unwrap();
        c.add_color(Magenta);
        c.advance(Duration::from_secs(1));

        let json = serde_json::to_value(c.snapshot()).unwrap();
        assert_eq!(json["seconds_left"], 119);
        assert_eq!(json["current_guess"][0], "magenta");
        assert_eq!(json["overlay"], "none");
        assert!(json["secret"].is_null());
    }
}
