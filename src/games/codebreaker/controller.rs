//! Session controller: the single writer of a game session.
//!
//! Commands and timer events are applied one at a time, in order, to the
//! same [`Session`]. Nothing here sleeps; elapsed time is fed in through
//! [`SessionController::advance`] and every wait is a timer in the
//! [`TimerQueue`]. Each timer carries the generation of the session that
//! scheduled it, and events from an older generation are dropped.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, instrument, warn};

use super::action::{Command, CommandError};
use super::clock::ClockTick;
use super::contracts::{CommandContract, Contract, assert_invariants};
use super::countdown::CountdownStep;
use super::palette::ColorId;
use super::reveal::RevealStep;
use super::scheduler::{TimerEvent, TimerKind, TimerQueue};
use super::session::{Overlay, Session};
use super::snapshot::SessionSnapshot;
use super::types::{Difficulty, SecretCode};
use crate::config::{ConfigError, GameConfig};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Owns a session, its timers and its random source.
#[derive(Debug)]
pub struct SessionController {
    session: Session,
    config: GameConfig,
    timers: TimerQueue,
    rng: StdRng,
}

impl SessionController {
    /// Starts a game seeded from the operating system.
    pub fn new(config: GameConfig, difficulty: Difficulty) -> Result<Self, ConfigError> {
        Self::from_rng(config, difficulty, StdRng::from_os_rng())
    }

    /// Starts a game with a reproducible secret sequence.
    pub fn with_seed(
        config: GameConfig,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::from_rng(config, difficulty, StdRng::seed_from_u64(seed))
    }

    /// Starts a game drawing secrets from `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`GameConfig::validate`].
    #[instrument(skip(config, rng))]
    pub fn from_rng(
        config: GameConfig,
        difficulty: Difficulty,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let secret = SecretCode::generate(difficulty.code_length(), &mut rng);
        let session = Session::new(0, difficulty, secret, &config, *config.countdown_from());
        let mut controller = Self {
            session,
            config,
            timers: TimerQueue::new(),
            rng,
        };
        controller.start();
        Ok(controller)
    }

    /// The live session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Rules and timings in effect.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only projection for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.session)
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Virtual time at which the next timer fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    /// Whether a timer of `kind` is pending.
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.timers.is_pending(kind)
    }

    // ─────────────────────────────────────────────────────────────
    //  Commands
    // ─────────────────────────────────────────────────────────────

    /// Applies a command, reporting why it was a no-op if it was.
    #[instrument(skip(self), fields(generation = self.session.generation()))]
    pub fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        CommandContract::pre(&self.session, &command)?;
        let before = self.session.clone();

        match command {
            Command::AddColor(color) => self.session.push_color(color),
            Command::EraseLast => {
                self.session.pop_color();
            }
            Command::SubmitGuess => self.commit(),
            Command::Pause => self.cover(Overlay::Paused),
            Command::ShowHelp => self.cover(Overlay::Help),
            Command::Resume => self.uncover(),
            Command::Restart(difficulty) => self.restart_session(difficulty),
        }

        CommandContract::post(&before, &self.session).inspect_err(|e| {
            error!(%command, error = %e, "Command broke a session invariant");
            debug_assert!(false, "{e}");
        })
    }

    fn apply_quietly(&mut self, command: Command) {
        if let Err(e) = self.apply(command) {
            debug!(%command, reason = %e, "Command ignored");
        }
    }

    /// Appends a color to the current guess.
    pub fn add_color(&mut self, color: ColorId) {
        self.apply_quietly(Command::AddColor(color));
    }

    /// Removes the last color of the current guess.
    pub fn erase_last(&mut self) {
        self.apply_quietly(Command::EraseLast);
    }

    /// Commits the current guess and starts revealing it.
    pub fn submit_guess(&mut self) {
        self.apply_quietly(Command::SubmitGuess);
    }

    /// Suspends the clock behind the paused overlay.
    pub fn pause(&mut self) {
        self.apply_quietly(Command::Pause);
    }

    /// Suspends the clock behind the help overlay.
    pub fn show_help(&mut self) {
        self.apply_quietly(Command::ShowHelp);
    }

    /// Dismisses the overlay and lets the clock run again.
    pub fn resume(&mut self) {
        self.apply_quietly(Command::Resume);
    }

    /// Replaces the session with a fresh one.
    pub fn restart(&mut self, difficulty: Difficulty) {
        self.apply_quietly(Command::Restart(difficulty));
    }

    fn commit(&mut self) {
        let row = self.session.commit_guess();
        let winning = self
            .session
            .records()
            .get(row)
            .is_some_and(|record| record.is_winning());
        info!(row, winning, "Guess committed");

        if winning {
            self.session.clock_mut().stop();
            self.timers.cancel(TimerKind::ClockTick);
        }

        self.session.reveal_mut().begin(row);
        self.timers.schedule(
            TimerKind::RevealTick,
            self.session.generation(),
            self.config.reveal_tick(),
        );
    }

    fn cover(&mut self, overlay: Overlay) {
        self.session.set_overlay(overlay);
        if self.session.clock_mut().suspend() {
            self.timers.cancel(TimerKind::ClockTick);
        }
        info!(?overlay, seconds_left = self.session.clock().seconds_left(), "Clock suspended");
    }

    fn uncover(&mut self) {
        self.session.set_overlay(Overlay::None);
        if self.session.clock_mut().resume() {
            self.schedule_clock_tick();
        }
        info!(seconds_left = self.session.clock().seconds_left(), "Clock resumed");
    }

    fn restart_session(&mut self, difficulty: Difficulty) {
        let generation = self.session.generation() + 1;
        let countdown_from = if *self.config.countdown_on_restart() {
            *self.config.countdown_from()
        } else {
            0
        };

        self.timers.clear();
        let secret = SecretCode::generate(difficulty.code_length(), &mut self.rng);
        self.session = Session::new(generation, difficulty, secret, &self.config, countdown_from);
        info!(generation, %difficulty, "Session restarted");
        self.start();
    }

    /// Arms the countdown, or starts the clock when there is none.
    fn start(&mut self) {
        if self.session.countdown().is_active() {
            self.timers.schedule(
                TimerKind::CountdownTick,
                self.session.generation(),
                ONE_SECOND,
            );
        } else {
            self.start_clock();
        }
    }

    fn start_clock(&mut self) {
        if self.session.clock_mut().start() {
            self.schedule_clock_tick();
        }
    }

    fn schedule_clock_tick(&mut self) {
        self.timers
            .schedule(TimerKind::ClockTick, self.session.generation(), ONE_SECOND);
    }

    // ─────────────────────────────────────────────────────────────
    //  Time
    // ─────────────────────────────────────────────────────────────

    /// Moves virtual time forward by `elapsed`, firing every timer due.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let target = self.timers.now() + elapsed;
        self.advance_to(target)
    }

    /// Moves virtual time forward to `target`, firing every timer due.
    ///
    /// Returns how many timers fired.
    pub fn advance_to(&mut self, target: Duration) -> usize {
        let mut fired = 0;
        while let Some(event) = self.timers.pop_due(target) {
            self.handle_timer(event);
            fired += 1;
        }
        self.timers.set_now(target);
        fired
    }

    /// Applies one fired timer.
    ///
    /// Returns `false` when the event belongs to an older session.
    #[instrument(skip(self), fields(current = self.session.generation()))]
    pub fn handle_timer(&mut self, event: TimerEvent) -> bool {
        if event.generation != self.session.generation() {
            debug!("Stale timer dropped");
            return false;
        }

        match event.kind {
            TimerKind::CountdownTick => self.on_countdown_tick(),
            TimerKind::ClockTick => self.on_clock_tick(),
            TimerKind::RevealTick => self.on_reveal_tick(),
            TimerKind::RevealSettle => self.on_reveal_settle(),
            TimerKind::GameOverOverlay => {
                self.session.reveal_game_over_ui();
                info!(won = self.session.is_won(), "Game-over overlay shown");
            }
        }

        assert_invariants(&self.session);
        true
    }

    fn on_countdown_tick(&mut self) {
        match self.session.countdown_mut().tick() {
            CountdownStep::Counting(value) => {
                debug!(value, "Countdown");
                self.timers.schedule(
                    TimerKind::CountdownTick,
                    self.session.generation(),
                    ONE_SECOND,
                );
            }
            CountdownStep::Finished => {
                info!("Countdown finished");
                self.start_clock();
            }
            CountdownStep::Ignored => {}
        }
    }

    fn on_clock_tick(&mut self) {
        match self.session.clock_mut().tick() {
            ClockTick::Counted { .. } => self.schedule_clock_tick(),
            ClockTick::Expired => {
                if self.session.expire() {
                    self.schedule_game_over_overlay();
                }
            }
            ClockTick::Ignored => {}
        }
    }

    fn on_reveal_tick(&mut self) {
        let code_length = self.session.code_length();
        match self.session.reveal_mut().tick(code_length) {
            RevealStep::Advanced { row, peg } => {
                debug!(row, peg, "Peg revealed");
                self.timers.schedule(
                    TimerKind::RevealTick,
                    self.session.generation(),
                    self.config.reveal_tick(),
                );
            }
            RevealStep::Completed { row } => {
                if self.session.finalize_row(row) {
                    self.schedule_game_over_overlay();
                }
                if self.session.is_game_over() {
                    self.session.clock_mut().stop();
                    self.timers.cancel(TimerKind::ClockTick);
                }
                self.timers.schedule(
                    TimerKind::RevealSettle,
                    self.session.generation(),
                    self.config.reveal_settle(),
                );
            }
            RevealStep::Ignored => warn!("Reveal tick with nothing to reveal"),
        }
    }

    fn on_reveal_settle(&mut self) {
        if let Some(row) = self.session.reveal_mut().settle() {
            debug!(row, "Reveal settled");
        }
    }

    fn schedule_game_over_overlay(&mut self) {
        self.timers.schedule(
            TimerKind::GameOverOverlay,
            self.session.generation(),
            self.config.game_over_delay(),
        );
    }
}
