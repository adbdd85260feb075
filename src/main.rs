//! Codebreaker - command-line entry point.

#![warn(missing_docs)]

mod cli;
mod tui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use codebreaker::{ColorId, Difficulty, GameConfig, HintSummary, Outcome, score};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            difficulty,
            config,
            log_file,
        } => run_play(difficulty, config, log_file).await,
        Command::Score {
            secret,
            guess,
            json,
        } => run_score(&secret, &guess, json),
        Command::Config { config } => run_config(config),
    }
}

/// Run the terminal game
async fn run_play(
    difficulty: Difficulty,
    config: Option<PathBuf>,
    log_file: PathBuf,
) -> Result<()> {
    // Log to a file so tracing output does not tear the board
    let file = std::fs::File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();

    let config = load_config(config.as_deref())?;
    info!(%difficulty, "Starting codebreaker");
    tui::run(config, difficulty).await
}

/// Score one guess and print the hints
#[instrument]
fn run_score(secret: &str, guess: &str, json: bool) -> Result<()> {
    init_stderr_tracing();

    let secret = ColorId::parse_code(secret).context("Invalid secret")?;
    let guess = ColorId::parse_code(guess).context("Invalid guess")?;
    if secret.is_empty() {
        bail!("Secret must contain at least one color");
    }
    if secret.len() != guess.len() {
        bail!(
            "Guess has {} colors but the secret has {}",
            guess.len(),
            secret.len()
        );
    }

    let outcomes = score(&secret, &guess);
    let summary = HintSummary::from_outcomes(&outcomes);

    if json {
        let report = serde_json::json!({
            "secret": secret,
            "guess": guess,
            "outcomes": outcomes,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("secret   {}", ColorId::format_code(&secret));
        println!("guess    {}", ColorId::format_code(&guess));
        println!("hints    {}", format_outcomes(&outcomes));
        println!(
            "summary  {} correct, {} wrong position, {} incorrect",
            summary.correct, summary.wrong_position, summary.incorrect
        );
    }
    Ok(())
}

/// Print the effective configuration
fn run_config(config: Option<PathBuf>) -> Result<()> {
    init_stderr_tracing();
    let config = load_config(config.as_deref())?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn format_outcomes(outcomes: &[Outcome]) -> String {
    outcomes
        .iter()
        .map(|outcome| match outcome {
            Outcome::Correct => '●',
            Outcome::WrongPosition => '○',
            Outcome::Incorrect => '·',
        })
        .collect()
}

fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
