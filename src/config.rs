//! Game configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Tunable rules and timings for a game session.
///
/// Every field has a default, so a TOML file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rows available per game.
    attempts_max: usize,

    /// Starting value of the game clock.
    clock_seconds: u32,

    /// The clock flashes while at or below this many seconds.
    flash_threshold_seconds: u32,

    /// Starting value of the pre-game countdown (0 disables it).
    countdown_from: u32,

    /// Whether restarting shows the countdown again.
    countdown_on_restart: bool,

    /// Interval between disclosed pegs.
    reveal_tick_ms: u64,

    /// Pause after the last peg before the next row accepts input.
    reveal_settle_ms: u64,

    /// Delay between the game ending and the game-over overlay.
    game_over_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            attempts_max: 7,
            clock_seconds: 120,
            flash_threshold_seconds: 10,
            countdown_from: 3,
            countdown_on_restart: false,
            reveal_tick_ms: 120,
            reveal_settle_ms: 250,
            game_over_delay_ms: 500,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            attempts_max = config.attempts_max,
            clock_seconds = config.clock_seconds,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to render config: {}", e)))
    }

    /// Rejects values the engine cannot run with.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attempts_max == 0 {
            return Err(ConfigError::new("attempts_max must be at least 1".to_string()));
        }
        if self.clock_seconds == 0 {
            return Err(ConfigError::new("clock_seconds must be at least 1".to_string()));
        }
        if self.reveal_tick_ms == 0 {
            return Err(ConfigError::new("reveal_tick_ms must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Sets the pre-game countdown start (0 disables it).
    pub fn with_countdown(mut self, from: u32, on_restart: bool) -> Self {
        self.countdown_from = from;
        self.countdown_on_restart = on_restart;
        self
    }

    /// Sets the clock start value.
    pub fn with_clock_seconds(mut self, seconds: u32) -> Self {
        self.clock_seconds = seconds;
        self
    }

    /// Sets the number of rows per game.
    pub fn with_attempts_max(mut self, attempts: usize) -> Self {
        self.attempts_max = attempts;
        self
    }

    /// Reveal tick as a duration.
    pub fn reveal_tick(&self) -> Duration {
        Duration::from_millis(self.reveal_tick_ms)
    }

    /// Settling delay as a duration.
    pub fn reveal_settle(&self) -> Duration {
        Duration::from_millis(self.reveal_settle_ms)
    }

    /// Game-over overlay delay as a duration.
    pub fn game_over_delay(&self) -> Duration {
        Duration::from_millis(self.game_over_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
