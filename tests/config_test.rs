//! Tests for loading game configuration from disk.

use std::io::Write;
use std::time::Duration;

use codebreaker::{Difficulty, GameConfig, SessionController};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_overrides_from_file() {
    let file = write_config(
        r#"
attempts_max = 10
clock_seconds = 60
countdown_from = 0
reveal_tick_ms = 50
"#,
    );

    let config = GameConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.attempts_max(), 10);
    assert_eq!(*config.clock_seconds(), 60);
    assert_eq!(*config.countdown_from(), 0);
    assert_eq!(config.reveal_tick(), Duration::from_millis(50));
    assert_eq!(*config.flash_threshold_seconds(), 10);
}

#[test]
fn test_missing_file_reports_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_toml_rejected() {
    let file = write_config("clock_seconds = \"soon\"\n");
    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_zero_clock_rejected() {
    let file = write_config("clock_seconds = 0\n");
    assert!(GameConfig::from_file(file.path()).is_err());
}

#[test]
fn test_loaded_config_drives_session() {
    let file = write_config("attempts_max = 3\nclock_seconds = 30\ncountdown_from = 0\n");
    let config = GameConfig::from_file(file.path()).unwrap();

    let game = SessionController::with_seed(config, Difficulty::Easy, 1).unwrap();
    let snapshot = game.snapshot();

    assert_eq!(snapshot.attempts_max, 3);
    assert_eq!(snapshot.seconds_left, 30);
    assert!(snapshot.clock_running);
}

#[test]
fn test_builder_values_checked_when_game_starts() {
    let config = GameConfig::default()
        .with_countdown(0, false)
        .with_attempts_max(0);
    assert!(SessionController::with_seed(config, Difficulty::Easy, 1).is_err());

    let config = GameConfig::default().with_clock_seconds(0);
    assert!(SessionController::new(config, Difficulty::Difficult).is_err());
}
