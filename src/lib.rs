// Secure Wiper: a terminal simulation of a multi-pass secure wipe workflow.
//
// Nothing in this crate touches a storage device. Progress is driven by a
// timer, and the completion certificate is synthetic.

pub mod app;
pub mod certificate;
pub mod settings;
pub mod export;
pub mod router;
pub mod simulator;
pub mod ui;

// Re-export the main workflow types for convenience
pub use app::{Surface, WiperApp};
pub use certificate::CompletionRecord;
pub use settings::SimulatorConfig;
pub use export::{CertificateExporter, ExportFailure, SaveTarget};
pub use router::{Screen, ScreenRouter};
pub use simulator::{Phase, ProgressSimulator, ProgressSnapshot, SimulationHandle, WipeSession};

use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

// Global flag for handling Ctrl+C interrupts
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Set the interrupt flag (called by signal handler)
pub fn set_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Check if an interrupt has been received
pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Reset the interrupt flag (primarily for testing)
pub fn reset_interrupted() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Export(#[from] ExportFailure),

    #[error("Cannot {action} while on the {screen} screen")]
    InvalidTransition {
        action: &'static str,
        screen: &'static str,
    },

    #[error("Simulation cancelled before completion")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// True for failures the user should see as an export notification.
    pub fn is_export_failure(&self) -> bool {
        matches!(self, SimError::Export(_))
    }
}

impl From<::config::ConfigError> for SimError {
    fn from(err: ::config::ConfigError) -> Self {
        SimError::Config(err.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;
