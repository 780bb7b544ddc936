use crate::{GameSession, GuessOutcome, HintOutcome, TICK_PERIOD, TickScheduler};
use hangman_types::GameSnapshot;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("game session is no longer running")]
pub struct SessionClosed;

enum SessionCommand {
    Guess {
        letter: char,
        reply: oneshot::Sender<GuessOutcome>,
    },
    UseHint {
        reply: oneshot::Sender<HintOutcome>,
    },
    Restart {
        reply: oneshot::Sender<()>,
    },
    Pause {
        reply: oneshot::Sender<bool>,
    },
    Resume {
        reply: oneshot::Sender<bool>,
    },
    Snapshot {
        reply: oneshot::Sender<GameSnapshot>,
    },
}

/// Cloneable front door to a running session. The session stops once every
/// handle has been dropped.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    pub async fn guess(&self, letter: char) -> Result<GuessOutcome, SessionClosed> {
        self.request(|reply| SessionCommand::Guess { letter, reply })
            .await
    }

    pub async fn use_hint(&self) -> Result<HintOutcome, SessionClosed> {
        self.request(|reply| SessionCommand::UseHint { reply }).await
    }

    pub async fn restart(&self) -> Result<(), SessionClosed> {
        self.request(|reply| SessionCommand::Restart { reply }).await
    }

    pub async fn pause(&self) -> Result<bool, SessionClosed> {
        self.request(|reply| SessionCommand::Pause { reply }).await
    }

    pub async fn resume(&self) -> Result<bool, SessionClosed> {
        self.request(|reply| SessionCommand::Resume { reply }).await
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot, SessionClosed> {
        self.request(|reply| SessionCommand::Snapshot { reply })
            .await
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, SessionClosed> {
        let (reply, response) = oneshot::channel();
        self.sender.send(command(reply)).map_err(|_| SessionClosed)?;
        response.await.map_err(|_| SessionClosed)
    }
}

pub struct RunningSession {
    pub handle: SessionHandle,
    pub snapshots: watch::Receiver<GameSnapshot>,
    pub task: JoinHandle<()>,
}

/// Move `session` onto its own task and start its countdown.
///
/// Player commands and timer ticks are handled one at a time by that task,
/// and a fresh snapshot is published after every change.
pub fn spawn_session(session: GameSession) -> RunningSession {
    let (sender, commands) = mpsc::unbounded_channel();
    let (tick_sender, ticks) = mpsc::unbounded_channel();
    let (snapshot_sender, snapshots) = watch::channel(session.snapshot());

    let mut runner = SessionRunner {
        session,
        scheduler: TickScheduler::new(TICK_PERIOD),
        tick_sender,
        snapshots: snapshot_sender,
    };
    runner.start_ticker();

    let task = tokio::spawn(runner.run(commands, ticks));

    RunningSession {
        handle: SessionHandle { sender },
        snapshots,
        task,
    }
}

struct SessionRunner {
    session: GameSession,
    scheduler: TickScheduler,
    tick_sender: mpsc::UnboundedSender<u64>,
    snapshots: watch::Sender<GameSnapshot>,
}

impl SessionRunner {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        mut ticks: mpsc::UnboundedReceiver<u64>,
    ) {
        info!(session = %self.session.id(), "Session runner started");

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(generation) = ticks.recv() => self.handle_tick(generation),
            }
        }

        self.scheduler.cancel();
        info!(session = %self.session.id(), "Session runner stopped");
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Guess { letter, reply } => {
                let outcome = self.session.submit_guess(letter);
                self.after_change();
                let _ = reply.send(outcome);
            }
            SessionCommand::UseHint { reply } => {
                let outcome = self.session.use_hint();
                self.after_change();
                let _ = reply.send(outcome);
            }
            SessionCommand::Restart { reply } => {
                self.scheduler.cancel();
                self.session.restart();
                self.start_ticker();
                self.publish_snapshot();
                let _ = reply.send(());
            }
            SessionCommand::Pause { reply } => {
                let paused = self.session.pause();
                if paused {
                    self.scheduler.cancel();
                }
                self.publish_snapshot();
                let _ = reply.send(paused);
            }
            SessionCommand::Resume { reply } => {
                let resumed = self.session.resume();
                if resumed && !self.scheduler.is_active() {
                    self.start_ticker();
                }
                self.publish_snapshot();
                let _ = reply.send(resumed);
            }
            SessionCommand::Snapshot { reply } => {
                let _ = reply.send(self.session.snapshot());
            }
        }
    }

    fn handle_tick(&mut self, generation: u64) {
        if generation != self.session.generation() {
            debug!(
                session = %self.session.id(),
                generation,
                current = self.session.generation(),
                "Dropping stale tick"
            );
            return;
        }

        self.session.tick();
        self.after_change();
    }

    fn after_change(&mut self) {
        if !self.session.is_active() {
            self.scheduler.cancel();
        }
        self.publish_snapshot();
    }

    fn start_ticker(&mut self) {
        if self.session.is_active() && self.session.is_timer_running() {
            self.scheduler
                .start(self.session.generation(), self.tick_sender.clone(), |generation| {
                    generation
                });
        }
    }

    fn publish_snapshot(&self) {
        self.snapshots.send_replace(self.session.snapshot());
    }
}
