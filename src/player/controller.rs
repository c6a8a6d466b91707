use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU8, Ordering},
};

use flume::Sender;
use serde_json::Value;
use tokio::{
    sync::{Mutex, watch},
    task::JoinHandle,
    time::{MissedTickBehavior, interval, sleep},
};
use tracing::{debug, info, warn};

use crate::{
    auth::{CredentialResolver, SessionProvider},
    http::{
        PlayerClient,
        error::ApiError,
        transport::{ReqwestTransport, Transport},
    },
    player::{
        commands::{Command, PlayerOperation},
        config::ControlsConfig,
        model::PlaybackSnapshot,
        state::CommandPhase,
        sync::StateSync,
    },
    ui::{notice::Notice, render::RenderAdapter},
    util::task::{TaskKind, TaskManager},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Completed,
    Failed(ApiError),
    Rejected,
}

pub struct PlaybackController {
    client: Arc<PlayerClient>,
    sync: Arc<StateSync>,
    renderer: Arc<dyn RenderAdapter>,
    config: ControlsConfig,
    busy: AtomicBool,
    phase: AtomicU8,
    running: AtomicBool,
    shutdown: watch::Sender<bool>,
    tasks: Mutex<TaskManager>,
}

impl PlaybackController {
    pub fn new(
        provider: Arc<dyn SessionProvider>,
        renderer: Arc<dyn RenderAdapter>,
        config: ControlsConfig,
    ) -> Result<Arc<Self>, ApiError> {
        let transport = ReqwestTransport::new(config.request_timeout, &config.user_agent)?;
        Ok(Self::with_transport(
            provider,
            Arc::new(transport),
            renderer,
            config,
        ))
    }

    pub fn with_transport(
        provider: Arc<dyn SessionProvider>,
        transport: Arc<dyn Transport>,
        renderer: Arc<dyn RenderAdapter>,
        config: ControlsConfig,
    ) -> Arc<Self> {
        let client = Arc::new(PlayerClient::new(
            CredentialResolver::new(provider),
            transport,
            config.api_base.clone(),
        ));
        let sync = Arc::new(StateSync::new(client.clone(), renderer.clone()));

        Arc::new(Self {
            client,
            sync,
            renderer,
            config,
            busy: AtomicBool::new(false),
            phase: AtomicU8::new(CommandPhase::Idle as u8),
            running: AtomicBool::new(false),
            shutdown: watch::Sender::new(false),
            tasks: Mutex::new(TaskManager::new()),
        })
    }

    pub async fn start(self: &Arc<Self>) -> Sender<Command> {
        match self.client.resolver().linked_account() {
            Ok(account) => info!("Controlling Spotify for {}", account.name),
            Err(e) => info!("{e}; controls stay idle until an account is linked"),
        }

        self.on_surface_available();

        let (command_tx, command_rx) = flume::unbounded::<Command>();
        let controller = Arc::clone(self);
        let intake = tokio::spawn(async move {
            while let Ok(command) = command_rx.recv_async().await {
                let controller = Arc::clone(&controller);
                tokio::spawn(async move {
                    controller.dispatch(command).await;
                });
            }
        });

        let mut tasks = self.tasks.lock().await;
        // A poll loop from an earlier start may be mid-fetch; let it finish.
        self.shutdown.send_replace(true);
        tasks.release(TaskKind::Poll);
        tasks.spawn(TaskKind::Poll, self.spawn_poll(self.shutdown.subscribe()));
        tasks.spawn(TaskKind::CommandIntake, intake);
        self.running.store(true, Ordering::Release);

        command_tx
    }

    // A fetch or dispatch already in flight runs to completion.
    pub async fn stop(&self) {
        let mut tasks = self.tasks.lock().await;
        self.running.store(false, Ordering::Release);
        self.shutdown.send_replace(true);
        tasks.release(TaskKind::Poll);
        tasks.abort(TaskKind::CommandIntake);
        drop(tasks);

        self.sync.set_mounted(false);
        self.renderer.unmount();
        info!("Spotify controls stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn on_surface_available(&self) -> bool {
        if self.sync.set_mounted(true) {
            return false;
        }

        if !self.renderer.mount() {
            debug!("Surface not ready, waiting for the next signal");
            self.sync.set_mounted(false);
            return false;
        }

        self.sync.repaint();
        true
    }

    pub fn on_surface_lost(&self) {
        self.sync.set_mounted(false);
    }

    pub fn is_mounted(&self) -> bool {
        self.sync.is_mounted()
    }

    pub async fn fetch_state(&self) -> PlaybackSnapshot {
        self.sync.fetch_state().await
    }

    pub fn snapshot(&self) -> Arc<PlaybackSnapshot> {
        self.sync
            .latest()
            .unwrap_or_else(|| Arc::new(PlaybackSnapshot::empty()))
    }

    pub fn phase(&self) -> CommandPhase {
        CommandPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn dispatch(self: &Arc<Self>, command: Command) -> DispatchOutcome {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Ignoring {command:?} while another command is in flight");
            return DispatchOutcome::Rejected;
        }

        let guard = BusyGuard { controller: self };
        self.phase
            .store(CommandPhase::Dispatching as u8, Ordering::Release);
        self.renderer.set_busy(true);

        match self.execute(command).await {
            Ok(()) => {
                self.phase.store(CommandPhase::Settling as u8, Ordering::Release);
                self.schedule_refresh();
                drop(guard);
                DispatchOutcome::Completed
            }
            Err(e) => {
                warn!("{command:?} failed: {e}");
                drop(guard);
                self.renderer.show_notice(&Notice::request_failed());
                DispatchOutcome::Failed(e)
            }
        }
    }

    async fn execute(&self, command: Command) -> Result<(), ApiError> {
        let operation = match command {
            Command::Previous => PlayerOperation::Previous,
            Command::Next => PlayerOperation::Next,
            Command::TogglePlayPause => {
                // No atomic toggle exists remotely; a change between this read
                // and the write below goes unnoticed.
                let state = self.client.current_state().await?;
                let is_playing = state
                    .get("is_playing")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);

                if is_playing {
                    PlayerOperation::Pause
                } else {
                    PlayerOperation::Play
                }
            }
        };

        self.client.perform(operation).await.map(drop)
    }

    fn schedule_refresh(self: &Arc<Self>) {
        let controller = Arc::clone(self);
        let delay = self.config.settle_delay;

        tokio::spawn(async move {
            sleep(delay).await;
            controller.sync.fetch_state().await;
            let _ = controller.phase.compare_exchange(
                CommandPhase::Settling as u8,
                CommandPhase::Idle as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
        });
    }

    fn spawn_poll(&self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let sync = self.sync.clone();
        let period = self.config.poll_interval;

        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // Only the wait is cancellable; a fetch that has begun completes.
                tokio::select! {
                    biased;
                    _ = shutdown.changed() => break,
                    _ = ticker.tick() => {}
                }
                sync.fetch_state().await;
            }
            debug!("Poll loop stopped");
        })
    }
}

/// Clears the busy flag on every exit from `dispatch`, including when the
/// dispatching future is dropped.
struct BusyGuard<'a> {
    controller: &'a PlaybackController,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let _ = self.controller.phase.compare_exchange(
            CommandPhase::Dispatching as u8,
            CommandPhase::Idle as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        self.controller.busy.store(false, Ordering::Release);
        self.controller.renderer.set_busy(false);
    }
}
