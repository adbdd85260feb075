//! Async event loop around a [`SessionController`].
//!
//! One task owns the controller. Commands arrive on an mpsc channel and
//! the task sleeps until the next timer is due, so commands and timer
//! events are applied strictly one after another. A fresh snapshot is
//! published on a watch channel after every step.

use derive_more::{Display, Error};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, instrument};

use crate::games::codebreaker::{Command, CommandError, SessionController, SessionSnapshot};

/// Errors from talking to the game task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RuntimeError {
    /// The game task has stopped.
    #[display("Game task has stopped")]
    Closed,
}

#[derive(Debug)]
struct Request {
    command: Command,
    reply: Option<oneshot::Sender<Result<(), CommandError>>>,
}

/// Handle to a running game.
#[derive(Debug)]
pub struct GameHandle {
    commands: mpsc::UnboundedSender<Request>,
    snapshots: watch::Receiver<SessionSnapshot>,
    task: JoinHandle<()>,
}

/// Moves `controller` onto its own task and starts its clock.
///
/// Virtual time zero is the moment of the call.
#[instrument(skip(controller))]
pub fn spawn(controller: SessionController) -> GameHandle {
    let (commands, requests) = mpsc::unbounded_channel();
    let (publisher, snapshots) = watch::channel(controller.snapshot());
    let task = tokio::spawn(run(controller, requests, publisher));
    info!("Game task started");
    GameHandle {
        commands,
        snapshots,
        task,
    }
}

async fn run(
    mut controller: SessionController,
    mut requests: mpsc::UnboundedReceiver<Request>,
    publisher: watch::Sender<SessionSnapshot>,
) {
    let origin = Instant::now().checked_sub(controller.now()).unwrap_or_else(Instant::now);

    loop {
        let deadline = controller.next_deadline().map(|due| origin + due);

        tokio::select! {
            request = requests.recv() => {
                let Some(request) = request else {
                    break;
                };
                controller.advance_to(origin.elapsed());
                let outcome = controller.apply(request.command);
                if let Err(e) = &outcome {
                    debug!(command = %request.command, reason = %e, "Command ignored");
                }
                publisher.send_replace(controller.snapshot());
                if let Some(reply) = request.reply {
                    let _ = reply.send(outcome);
                }
            }
            _ = wait_for(deadline) => {
                controller.advance_to(origin.elapsed());
                publisher.send_replace(controller.snapshot());
            }
        }
    }

    info!("Game task stopped");
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl GameHandle {
    /// Queues a command without waiting for it.
    pub fn send(&self, command: Command) -> Result<(), RuntimeError> {
        self.commands
            .send(Request {
                command,
                reply: None,
            })
            .map_err(|_| RuntimeError::Closed)
    }

    /// Applies a command and reports whether it took effect.
    pub async fn apply(&self, command: Command) -> Result<Result<(), CommandError>, RuntimeError> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Request {
                command,
                reply: Some(reply),
            })
            .map_err(|_| RuntimeError::Closed)?;
        outcome.await.map_err(|_| RuntimeError::Closed)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Waits for the next published snapshot.
    pub async fn changed(&mut self) -> Result<SessionSnapshot, RuntimeError> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| RuntimeError::Closed)?;
        Ok(self.snapshots.borrow_and_update().clone())
    }

    /// Stops the game task and waits for it to finish.
    pub async fn shutdown(self) {
        let GameHandle { commands, task, .. } = self;
        drop(commands);
        if let Err(e) = task.await {
            debug!(error = %e, "Game task ended abnormally");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::games::codebreaker::{ColorId, Difficulty, Overlay};
    use std::time::Duration;
    use tokio::time::sleep;

    fn quick_controller() -> SessionController {
        let config = GameConfig::default().with_countdown(0, false);
        SessionController::with_seed(config, Difficulty::Easy, 11).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_follows_tokio_time() {
        let handle = spawn(quick_controller());
        sleep(Duration::from_millis(3500)).await;
        assert_eq!(handle.snapshot().seconds_left, 117);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_reports_rejections() {
        let handle = spawn(quick_controller());
        assert_eq!(
            handle.apply(Command::SubmitGuess).await,
            Ok(Err(CommandError::GuessIncomplete { have: 0, need: 4 }))
        );
        assert_eq!(handle.apply(Command::AddColor(ColorId::Red)).await, Ok(Ok(())));
        assert_eq!(handle.snapshot().current_guess, vec![ColorId::Red]);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_holds_clock() {
        let handle = spawn(quick_controller());
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(handle.apply(Command::Pause).await, Ok(Ok(())));
        assert_eq!(handle.snapshot().overlay, Overlay::Paused);

        sleep(Duration::from_secs(20)).await;
        assert_eq!(handle.snapshot().seconds_left, 119);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_changed_yields_each_tick() {
        let mut handle = spawn(quick_controller());
        let first = handle.changed().await.expect("snapshot published");
        assert_eq!(first.seconds_left, 119);
        let second = handle.changed().await.expect("snapshot published");
        assert_eq!(second.seconds_left, 118);
        handle.shutdown().await;
    }
}
