// Progress Simulator - fake multi-pass wipe progress driven by a timer
//
// The phase table and tick constants reproduce a DoD 5220.22-M style 3-pass
// wipe on screen. No storage device is read or written.

pub mod engine;
pub mod session;

pub use engine::{ProgressSimulator, SimulationHandle};
pub use session::{ProgressSnapshot, WipeSession};

use serde::{Deserialize, Serialize};

/// Percentage added on every tick
pub const TICK_INCREMENT: f64 = 0.5;

/// Milliseconds between ticks
pub const TICK_PERIOD_MS: u64 = 200;

/// Milliseconds between reaching 100% and signalling completion
pub const COMPLETION_DELAY_MS: u64 = 2000;

/// Number of simulated overwrite passes
pub const PASS_COUNT: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Initializing,
    Pass1,
    Pass2,
    Pass3,
    Verifying,
    Completed,
}

impl Phase {
    /// Map a progress percentage onto its phase.
    ///
    /// Boundaries: [0,5] Initializing, (5,35] Pass1, (35,65] Pass2,
    /// (65,95] Pass3, (95,100) Verifying, 100 Completed.
    pub fn from_percent(percent: f64) -> Self {
        let pct = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };

        if pct >= 100.0 {
            Phase::Completed
        } else if pct <= 5.0 {
            Phase::Initializing
        } else if pct <= 35.0 {
            Phase::Pass1
        } else if pct <= 65.0 {
            Phase::Pass2
        } else if pct <= 95.0 {
            Phase::Pass3
        } else {
            Phase::Verifying
        }
    }

    /// Overwrite pass shown alongside this phase (1..=3)
    pub fn pass(self) -> u8 {
        match self {
            Phase::Initializing | Phase::Pass1 => 1,
            Phase::Pass2 => 2,
            Phase::Pass3 | Phase::Verifying | Phase::Completed => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Initializing => "Initialization",
            Phase::Pass1 => "Pass 1/3",
            Phase::Pass2 => "Pass 2/3",
            Phase::Pass3 => "Pass 3/3",
            Phase::Verifying => "Verification",
            Phase::Completed => "Completed",
        }
    }

    /// Status line displayed under the progress bar
    pub fn status_text(self) -> &'static str {
        match self {
            Phase::Initializing => "Preparing drive for secure erasure...",
            Phase::Pass1 => "Writing random patterns to all sectors...",
            Phase::Pass2 => "Overwriting with complimentary patterns...",
            Phase::Pass3 => "Final verification and random overwrite...",
            Phase::Verifying => "Verifying complete data erasure...",
            Phase::Completed => "Secure wipe completed.",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Completed
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
