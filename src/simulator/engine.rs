use super::{Phase, ProgressSnapshot, WipeSession};
use crate::certificate::CompletionRecord;
use crate::settings::TimingConfig;
use crate::{SimError, SimResult};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

/// Spawns simulated wipe runs on the current tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct ProgressSimulator {
    timing: TimingConfig,
}

impl ProgressSimulator {
    pub fn new(timing: TimingConfig) -> Self {
        Self { timing }
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Begin a new session. The returned handle owns the tick source:
    /// dropping it stops the run.
    pub fn start(&self) -> SimulationHandle {
        let session = WipeSession::begin();
        tracing::info!(
            started_at = %session.started_at(),
            tick_ms = self.timing.tick_ms,
            increment = self.timing.increment,
            "Starting simulated secure wipe"
        );

        let (progress_tx, progress_rx) = watch::channel(ProgressSnapshot::initial());
        let (completion_tx, completion_rx) = oneshot::channel();
        let task = tokio::spawn(drive(
            session,
            self.timing.clone(),
            progress_tx,
            completion_tx,
        ));

        SimulationHandle {
            progress: progress_rx,
            completion: Some(completion_rx),
            task,
        }
    }
}

/// Tick loop for one session. Runs until 100%, then hands over the record
/// after the completion delay.
async fn drive(
    mut session: WipeSession,
    timing: TimingConfig,
    progress_tx: watch::Sender<ProgressSnapshot>,
    completion_tx: oneshot::Sender<CompletionRecord>,
) {
    let period = timing.tick_period();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut phase = session.phase();
    let record = loop {
        ticker.tick().await;
        let now = Instant::now();
        let snapshot = session.advance(timing.increment, now);

        if snapshot.phase != phase {
            tracing::debug!(
                from = %phase,
                to = %snapshot.phase,
                percent = snapshot.percent,
                "Simulated wipe entered new phase"
            );
            phase = snapshot.phase;
        }

        progress_tx.send_replace(snapshot);

        if let Some(record) = session.complete(now) {
            break record;
        }
    };

    // Release the tick source before waiting out the completion delay
    drop(ticker);
    tracing::info!(
        id = %record.id,
        duration = %humantime::format_duration(std::time::Duration::from_secs(record.duration_seconds)),
        "Simulated wipe reached 100%"
    );

    sleep(timing.completion_delay()).await;
    if completion_tx.send(record).is_err() {
        tracing::debug!("Completion receiver gone, record discarded");
    }
}

/// Owner-side view of a running simulation.
///
/// Dropping the handle aborts the tick task, so no further progress updates
/// or completion signals fire after the owning screen goes away.
#[derive(Debug)]
pub struct SimulationHandle {
    pub(super) progress: watch::Receiver<ProgressSnapshot>,
    completion: Option<oneshot::Receiver<CompletionRecord>>,
    task: JoinHandle<()>,
}

impl SimulationHandle {
    /// Latest published snapshot
    pub fn snapshot(&self) -> ProgressSnapshot {
        *self.progress.borrow()
    }

    /// Wait for the next tick. Returns `None` once the tick loop has ended.
    pub async fn next_snapshot(&mut self) -> Option<ProgressSnapshot> {
        match self.progress.changed().await {
            Ok(()) => Some(*self.progress.borrow_and_update()),
            Err(_) => None,
        }
    }

    /// Wait for the completion record. Yields it at most once; later calls
    /// and cancelled runs return `SimError::Cancelled`.
    pub async fn completion(&mut self) -> SimResult<CompletionRecord> {
        let rx = self.completion.as_mut().ok_or(SimError::Cancelled)?;
        let result = rx.await;
        self.completion = None;
        result.map_err(|_| SimError::Cancelled)
    }

    /// True once the tick task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the run. No further ticks or completion signals fire.
    pub fn cancel(self) {
        let phase = self.snapshot().phase;
        if phase != Phase::Completed {
            tracing::info!(
                percent = self.snapshot().percent,
                "Simulated wipe cancelled"
            );
        }
        // Drop aborts the task
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
