//! Session state: everything one game knows.
//!
//! Fields are private. Reads go through accessors; writes are
//! `pub(super)` so only the controller can drive them, which is what
//! keeps the invariants in `invariants/` true between events.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::clock::Clock;
use super::countdown::CountdownGate;
use super::palette::ColorId;
use super::reveal::RevealSequencer;
use super::types::{Difficulty, GuessRecord, SecretCode};
use crate::config::GameConfig;

/// Overlay covering the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    /// Nothing covers the board.
    #[default]
    None,
    /// Paused by the player.
    Paused,
    /// Instructions are showing; the clock is paused.
    Help,
}

/// One game, from secret generation to game over.
#[derive(Debug, Clone)]
pub struct Session {
    generation: u64,
    difficulty: Difficulty,
    secret: SecretCode,
    records: Vec<GuessRecord>,
    current: Vec<ColorId>,
    attempts_max: usize,
    game_over: bool,
    won: bool,
    show_game_over_ui: bool,
    disabled_colors: BTreeSet<ColorId>,
    overlay: Overlay,
    clock: Clock,
    reveal: RevealSequencer,
    countdown: CountdownGate,
}

impl Session {
    /// Creates a fresh session around `secret`.
    #[instrument(skip(config, secret), fields(code_length = secret.len()))]
    pub fn new(
        generation: u64,
        difficulty: Difficulty,
        secret: SecretCode,
        config: &GameConfig,
        countdown_from: u32,
    ) -> Self {
        debug_assert_eq!(secret.len(), difficulty.code_length());
        info!("Creating new game session");
        Self {
            generation,
            difficulty,
            secret,
            records: Vec::new(),
            current: Vec::new(),
            attempts_max: *config.attempts_max(),
            game_over: false,
            won: false,
            show_game_over_ui: false,
            disabled_colors: BTreeSet::new(),
            overlay: Overlay::None,
            clock: Clock::new(*config.clock_seconds(), *config.flash_threshold_seconds()),
            reveal: RevealSequencer::new(),
            countdown: CountdownGate::armed(countdown_from),
        }
    }

    /// Token stamped on every timer this session schedules.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Difficulty preset.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The secret code.
    ///
    /// Presentation should go through the snapshot, which withholds it
    /// until the game ends.
    pub fn secret(&self) -> &SecretCode {
        &self.secret
    }

    /// Committed rows, oldest first.
    pub fn records(&self) -> &[GuessRecord] {
        &self.records
    }

    /// Colors entered for the next row.
    pub fn current_guess(&self) -> &[ColorId] {
        &self.current
    }

    /// Rows per game.
    pub fn attempts_max(&self) -> usize {
        self.attempts_max
    }

    /// Rows not yet committed.
    pub fn attempts_remaining(&self) -> usize {
        self.attempts_max.saturating_sub(self.records.len())
    }

    /// Pegs per code.
    pub fn code_length(&self) -> usize {
        self.secret.len()
    }

    /// Whether the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Whether the code was broken.
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Whether the game-over overlay is up.
    pub fn show_game_over_ui(&self) -> bool {
        self.show_game_over_ui
    }

    /// Colors proven absent from the secret (Easy only).
    pub fn disabled_colors(&self) -> &BTreeSet<ColorId> {
        &self.disabled_colors
    }

    /// Whether `color` is disabled.
    pub fn is_disabled(&self, color: ColorId) -> bool {
        self.disabled_colors.contains(&color)
    }

    /// Overlay covering the board.
    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// Game clock.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Reveal progress.
    pub fn reveal(&self) -> &RevealSequencer {
        &self.reveal
    }

    /// Pre-game countdown.
    pub fn countdown(&self) -> &CountdownGate {
        &self.countdown
    }

    // ─────────────────────────────────────────────────────────────
    //  Mutators (controller only)
    // ─────────────────────────────────────────────────────────────

    pub(super) fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub(super) fn reveal_mut(&mut self) -> &mut RevealSequencer {
        &mut self.reveal
    }

    pub(super) fn countdown_mut(&mut self) -> &mut CountdownGate {
        &mut self.countdown
    }

    pub(super) fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
    }

    pub(super) fn push_color(&mut self, color: ColorId) {
        self.current.push(color);
    }

    pub(super) fn pop_color(&mut self) -> Option<ColorId> {
        self.current.pop()
    }

    /// Scores and appends the current guess, returning its row index.
    ///
    /// In Easy mode, every guessed color absent from the secret is
    /// disabled for the rest of the session.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub(super) fn commit_guess(&mut self) -> usize {
        let guess = std::mem::take(&mut self.current);
        let record = GuessRecord::score(&self.secret, guess);

        if self.difficulty.disables_absent_colors() {
            for color in record.guess() {
                if !self.secret.contains(*color) && self.disabled_colors.insert(*color) {
                    debug!(%color, "Color disabled");
                }
            }
        }

        self.records.push(record);
        self.records.len() - 1
    }

    /// Settles the outcome once `row` is fully revealed.
    ///
    /// Returns `true` when this call ended the game.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub(super) fn finalize_row(&mut self, row: usize) -> bool {
        let winning = self
            .records
            .get(row)
            .is_some_and(|record| record.is_winning());
        // A timeout that landed mid-reveal already decided the game.
        let won = winning && !self.clock.is_expired();
        let was_over = self.game_over;

        self.won = won;
        self.game_over = was_over || won || row + 1 >= self.attempts_max;
        if won {
            self.clock.stop();
        }
        if self.game_over {
            self.overlay = Overlay::None;
        }

        info!(row, won, game_over = self.game_over, "Row settled");
        self.game_over && !was_over
    }

    /// Ends the game because the clock ran out.
    ///
    /// Returns `true` when this call ended the game.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub(super) fn expire(&mut self) -> bool {
        let was_over = self.game_over;
        self.game_over = true;
        self.won = false;
        self.overlay = Overlay::None;
        info!("Time is up");
        !was_over
    }

    pub(super) fn reveal_game_over_ui(&mut self) {
        self.show_game_over_ui = true;
    }

    #[cfg(test)]
    pub(crate) fn force_game_over(&mut self, won: bool) {
        self.game_over = true;
        self.won = won;
    }

    #[cfg(test)]
    pub(crate) fn records_mut(&mut self) -> &mut Vec<GuessRecord> {
        &mut self.records
    }

    #[cfg(test)]
    pub(crate) fn disabled_colors_mut(&mut self) -> &mut BTreeSet<ColorId> {
        &mut self.disabled_colors
    }
}
