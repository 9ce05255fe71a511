//! Engine worker - runs the step engine as its own task.
//!
//! The host and the engine share no memory. Commands travel over a bounded
//! FIFO channel and outcomes come back over a second FIFO channel, so replies
//! arrive in request order. [`EngineClient`] allows at most one outstanding
//! request; that keeps host-side generation accounting exact.
//!
//! [`EngineWorker`] bundles a dedicated tokio runtime with a client so a
//! synchronous loop (the terminal host) can drive the engine without being
//! async itself.

use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};
use tokio::task::JoinHandle;

use crate::error::EngineError;
use crate::handler::CommandHandler;
use crate::protocol::{Command, Reply};

/// Result of one request.
pub type Outcome = Result<Reply, EngineError>;

/// Engine task body: handle commands until the command channel closes.
pub async fn run_engine(
    mut commands: mpsc::Receiver<Command>,
    outcomes: mpsc::UnboundedSender<Outcome>,
) {
    let mut handler = CommandHandler::new();
    log::debug!("engine worker started");

    while let Some(command) = commands.recv().await {
        let name = command.name();
        let outcome = handler.handle(command);
        match &outcome {
            Ok(reply) => log::debug!("{} -> {} live", name, reply.live_cell_count),
            Err(e) => log::warn!("{} failed: {}", name, e),
        }
        if outcomes.send(outcome).is_err() {
            break;
        }
    }

    log::debug!("engine worker stopped");
}

/// Spawn the engine on the current tokio runtime.
pub fn spawn_engine() -> (EngineClient, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(1);
    let (out_tx, out_rx) = mpsc::unbounded_channel::<Outcome>();
    let handle = tokio::spawn(run_engine(cmd_rx, out_tx));
    (EngineClient::new(cmd_tx, out_rx), handle)
}

/// Host end of the engine channels.
#[derive(Debug)]
pub struct EngineClient {
    commands: mpsc::Sender<Command>,
    outcomes: mpsc::UnboundedReceiver<Outcome>,
    in_flight: bool,
}

impl EngineClient {
    pub fn new(
        commands: mpsc::Sender<Command>,
        outcomes: mpsc::UnboundedReceiver<Outcome>,
    ) -> Self {
        Self {
            commands,
            outcomes,
            in_flight: false,
        }
    }

    /// True while a request has been sent and its reply not yet taken.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Send without waiting. Fails with [`EngineError::Busy`] while a request
    /// is outstanding.
    pub fn try_send(&mut self, command: Command) -> Result<(), EngineError> {
        if self.in_flight {
            return Err(EngineError::Busy);
        }
        self.commands.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => EngineError::Busy,
            TrySendError::Closed(_) => EngineError::Disconnected,
        })?;
        self.in_flight = true;
        Ok(())
    }

    /// Take the outstanding reply if it has arrived.
    pub fn try_recv(&mut self) -> Option<Outcome> {
        match self.outcomes.try_recv() {
            Ok(outcome) => {
                self.in_flight = false;
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.in_flight = false;
                Some(Err(EngineError::Disconnected))
            }
        }
    }

    /// Send and wait for the reply.
    pub async fn request(&mut self, command: Command) -> Outcome {
        if self.in_flight {
            return Err(EngineError::Busy);
        }
        self.commands
            .send(command)
            .await
            .map_err(|_| EngineError::Disconnected)?;
        self.in_flight = true;

        let outcome = self
            .outcomes
            .recv()
            .await
            .unwrap_or(Err(EngineError::Disconnected));
        self.in_flight = false;
        outcome
    }
}

/// Engine task on a private runtime, for synchronous hosts.
pub struct EngineWorker {
    rt: Runtime,
    client: EngineClient,
    task: JoinHandle<()>,
}

impl EngineWorker {
    pub fn start() -> Result<Self, EngineError> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("life-engine")
            .enable_all()
            .build()?;
        let (client, task) = {
            let _guard = rt.enter();
            spawn_engine()
        };
        log::info!("engine worker running");
        Ok(Self { rt, client, task })
    }

    pub fn is_busy(&self) -> bool {
        self.client.is_busy()
    }

    pub fn try_send(&mut self, command: Command) -> Result<(), EngineError> {
        self.client.try_send(command)
    }

    pub fn try_recv(&mut self) -> Option<Outcome> {
        self.client.try_recv()
    }

    /// Send and block the calling thread until the reply arrives.
    pub fn request_blocking(&mut self, command: Command) -> Outcome {
        self.rt.block_on(self.client.request(command))
    }

    /// Whether the engine task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
