use super::Phase;
use crate::certificate::CompletionRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Point-in-time view of a running session, consumed by the progress screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub percent: f64,
    pub phase: Phase,
    pub pass: u8,
    pub elapsed: Duration,
    /// `None` until a rate can be observed
    pub estimated_remaining: Option<Duration>,
}

impl ProgressSnapshot {
    /// Snapshot shown before the first tick
    pub fn initial() -> Self {
        Self {
            percent: 0.0,
            phase: Phase::Initializing,
            pass: 1,
            elapsed: Duration::ZERO,
            estimated_remaining: None,
        }
    }
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

/// In-memory state of one simulated wipe run.
#[derive(Debug, Clone)]
pub struct WipeSession {
    progress: f64,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl WipeSession {
    /// Start a session now.
    pub fn begin() -> Self {
        Self::starting_at(Utc::now(), Instant::now())
    }

    /// Start a session with an explicit wall clock and monotonic origin.
    pub fn starting_at(started_at: DateTime<Utc>, started: Instant) -> Self {
        Self {
            progress: 0.0,
            started_at,
            started,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn phase(&self) -> Phase {
        Phase::from_percent(self.progress)
    }

    pub fn current_pass(&self) -> u8 {
        self.phase().pass()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_complete(&self) -> bool {
        self.phase().is_terminal()
    }

    /// Apply one tick. Progress never decreases and never exceeds 100.
    pub fn advance(&mut self, increment: f64, now: Instant) -> ProgressSnapshot {
        if increment.is_finite() && increment > 0.0 {
            self.progress = (self.progress + increment).min(100.0);
        }
        self.snapshot_at(now)
    }

    pub fn snapshot_at(&self, now: Instant) -> ProgressSnapshot {
        let elapsed = now.saturating_duration_since(self.started);
        let phase = self.phase();

        ProgressSnapshot {
            percent: self.progress,
            phase,
            pass: phase.pass(),
            elapsed,
            estimated_remaining: estimate_remaining(self.progress, elapsed),
        }
    }

    /// Synthesize the completion record. Returns `None` below 100%.
    pub fn complete(&self, now: Instant) -> Option<CompletionRecord> {
        if !self.is_complete() {
            return None;
        }

        let elapsed = now.saturating_duration_since(self.started);
        let completed_at = self.started_at
            + chrono::Duration::from_std(elapsed).unwrap_or_else(|_| chrono::Duration::zero());

        Some(CompletionRecord::synthesize(completed_at, elapsed.as_secs()))
    }
}

/// Live re-estimate of time left: `(100 - p) / (p / elapsed)`.
///
/// Returns `None` while the observed rate is undefined (no progress yet or no
/// elapsed time).
pub fn estimate_remaining(percent: f64, elapsed: Duration) -> Option<Duration> {
    let elapsed_secs = elapsed.as_secs_f64();
    if percent.is_nan() || percent <= 0.0 || elapsed_secs <= 0.0 {
        return None;
    }

    let rate = percent / elapsed_secs;
    let remaining = ((100.0 - percent).max(0.0) / rate).max(0.0);
    Duration::try_from_secs_f64(remaining).ok()
}
