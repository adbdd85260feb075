//! Terminal UI for codebreaker.
//!
//! The game runs on its own task; this loop only draws the latest
//! snapshot and forwards key presses as commands.

mod input;
mod ui;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::Duration;
use tracing::{debug, error, info, instrument};

use codebreaker::{Difficulty, GameConfig, GameHandle, SessionController, runtime};
use input::Input;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs a game until the player quits.
pub async fn run(config: GameConfig, difficulty: Difficulty) -> Result<()> {
    let controller = SessionController::new(config, difficulty)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let handle = runtime::spawn(controller);
    let res = game_loop(&mut terminal, &handle).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    handle.shutdown().await;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Terminal restored");
    res
}

#[instrument(skip_all)]
async fn game_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    handle: &GameHandle,
) -> Result<()> {
    loop {
        let snapshot = handle.snapshot();
        terminal.draw(|frame| ui::draw(frame, &snapshot))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match input::map_key(key.code, &snapshot) {
                    Input::Quit => {
                        info!("User quit");
                        return Ok(());
                    }
                    Input::Command(command) => {
                        debug!(%command, "Key mapped to command");
                        handle.send(command)?;
                    }
                    Input::Ignore => {}
                }
            }
        }

        tokio::task::yield_now().await;
    }
}
