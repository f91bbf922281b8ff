use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use dashboard_logging::{dash_debug, dash_error, dash_info};
use tokio::runtime::Runtime;
use tokio::task::JoinError;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::api::{load_dashboard, ApiSettings, DashboardApi, ReqwestDashboardApi};
use crate::{ApiError, EngineError, EngineEvent, FailureKind, ProfileUpdateDto, TimerId};

const MIN_TIMER_PERIOD: Duration = Duration::from_millis(1);

enum EngineCommand {
    Load { token: String },
    SubmitProfile { token: String, update: ProfileUpdateDto },
    StartTimer { timer_id: TimerId, period: Duration },
    StopTimer { timer_id: TimerId },
}

/// Sends commands to the engine thread. Dropping the handle shuts the engine down.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side of engine events.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<(Self, EngineEvents), EngineError> {
        let api: Arc<dyn DashboardApi> = Arc::new(ReqwestDashboardApi::new(&settings)?);
        Self::with_api(api)
    }

    /// Runs the engine against any [`DashboardApi`] implementation.
    pub fn with_api(api: Arc<dyn DashboardApi>) -> Result<(Self, EngineEvents), EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_engine(runtime, api, cmd_rx, event_tx));

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn load(&self, token: impl Into<String>) {
        self.send(EngineCommand::Load {
            token: token.into(),
        });
    }

    pub fn submit_profile(&self, token: impl Into<String>, update: ProfileUpdateDto) {
        self.send(EngineCommand::SubmitProfile {
            token: token.into(),
            update,
        });
    }

    /// Starts a recurring timer. The first tick arrives one `period` after the call.
    pub fn start_timer(&self, timer_id: TimerId, period: Duration) {
        self.send(EngineCommand::StartTimer { timer_id, period });
    }

    pub fn stop_timer(&self, timer_id: TimerId) {
        self.send(EngineCommand::StopTimer { timer_id });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            dash_error!("Engine thread is gone; command dropped");
        }
    }
}

impl EngineEvents {
    /// Blocks until the next event. `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

fn run_engine(
    runtime: Runtime,
    api: Arc<dyn DashboardApi>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut timers: HashMap<TimerId, CancellationToken> = HashMap::new();

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Load { token } => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let task =
                        tokio::spawn(async move { load_dashboard(api.as_ref(), &token).await });
                    // A crashed load still has to complete, or the caller's in-flight flag latches.
                    let event = task.await.unwrap_or_else(|err| {
                        let failure = aborted(&err);
                        EngineEvent::DashboardLoaded {
                            profile: Err(failure.clone()),
                            applications: Err(failure),
                        }
                    });
                    deliver(&event_tx, event);
                });
            }
            EngineCommand::SubmitProfile { token, update } => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let task =
                        tokio::spawn(async move { api.submit_profile(&token, &update).await });
                    let result = task.await.unwrap_or_else(|err| Err(aborted(&err)));
                    deliver(&event_tx, EngineEvent::ProfileSubmitted(result));
                });
            }
            EngineCommand::StartTimer { timer_id, period } => {
                let cancel = CancellationToken::new();
                if let Some(previous) = timers.insert(timer_id, cancel.clone()) {
                    previous.cancel();
                }
                dash_info!("Timer {} started, period {:?}", timer_id, period);
                runtime.spawn(run_timer(timer_id, period, cancel, event_tx.clone()));
            }
            EngineCommand::StopTimer { timer_id } => {
                if let Some(cancel) = timers.remove(&timer_id) {
                    cancel.cancel();
                    dash_info!("Timer {} stopped", timer_id);
                }
            }
        }
    }

    for (_, cancel) in timers.drain() {
        cancel.cancel();
    }
    dash_debug!("Engine command channel closed; shutting down");
}

fn aborted(err: &JoinError) -> ApiError {
    dash_error!("Engine task ended without a result: {}", err);
    ApiError::new(FailureKind::Aborted, err.to_string())
}

fn deliver(event_tx: &mpsc::Sender<EngineEvent>, event: EngineEvent) {
    if event_tx.send(event).is_err() {
        dash_debug!("Event receiver closed; dropping event");
    }
}

async fn run_timer(
    timer_id: TimerId,
    period: Duration,
    cancel: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let period = period.max(MIN_TIMER_PERIOD);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if event_tx.send(EngineEvent::TimerTick { timer_id }).is_err() {
                    break;
                }
            }
        }
    }
}
