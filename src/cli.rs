//! Command-line interface for codebreaker.

use clap::{Parser, Subcommand};
use codebreaker::Difficulty;

/// Codebreaker - timed code-breaking puzzle in the terminal
#[derive(Parser, Debug)]
#[command(name = "codebreaker")]
#[command(about = "Break a hidden color code before the clock runs out", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Difficulty preset
        #[arg(short, long, value_enum, default_value_t = Difficulty::Easy)]
        difficulty: Difficulty,

        /// Path to a TOML game configuration
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Log file (the terminal is busy drawing the board)
        #[arg(long, default_value = "codebreaker.log")]
        log_file: std::path::PathBuf,
    },

    /// Score a guess against a secret, e.g. `--secret RGBY --guess RRGG`
    Score {
        /// Secret code as color letters (R G B Y M C W)
        #[arg(long)]
        secret: String,

        /// Guess as color letters, same length as the secret
        #[arg(long)]
        guess: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective game configuration as TOML
    Config {
        /// Path to a TOML game configuration
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },
}
