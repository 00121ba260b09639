// Screen Router - home -> progress -> certificate
//
// The certificate screen owns its record, so it cannot be entered without
// one, and the progress screen never carries one.

use crate::certificate::CompletionRecord;
use crate::{SimError, SimResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Progress,
    Certificate(CompletionRecord),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Progress => "progress",
            Screen::Certificate(_) => "certificate",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScreenRouter {
    screen: Screen,
}

impl Default for ScreenRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenRouter {
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Record held by the certificate screen, if that is where we are
    pub fn record(&self) -> Option<&CompletionRecord> {
        match &self.screen {
            Screen::Certificate(record) => Some(record),
            _ => None,
        }
    }

    /// Begin a new session. Valid from home or certificate; any previous
    /// record is discarded.
    pub fn start(&mut self) -> SimResult<()> {
        match self.screen {
            Screen::Home | Screen::Certificate(_) => {
                if let Screen::Certificate(previous) = &self.screen {
                    tracing::debug!(id = %previous.id, "Discarding previous completion record");
                }
                self.transition("start", Screen::Progress);
                Ok(())
            }
            Screen::Progress => Err(self.rejected("start")),
        }
    }

    /// Store the record of a finished run. Valid only from progress.
    pub fn on_completed(&mut self, record: CompletionRecord) -> SimResult<()> {
        match self.screen {
            Screen::Progress => {
                self.transition("complete", Screen::Certificate(record));
                Ok(())
            }
            _ => Err(self.rejected("complete")),
        }
    }

    /// Return home, discarding the record. Valid only from certificate.
    pub fn reset(&mut self) -> SimResult<()> {
        match self.screen {
            Screen::Certificate(_) => {
                self.transition("reset", Screen::Home);
                Ok(())
            }
            _ => Err(self.rejected("reset")),
        }
    }

    fn transition(&mut self, action: &'static str, next: Screen) {
        tracing::debug!(
            action,
            from = self.screen.name(),
            to = next.name(),
            "Screen transition"
        );
        self.screen = next;
    }

    fn rejected(&self, action: &'static str) -> SimError {
        tracing::warn!(action, screen = self.screen.name(), "Rejected screen transition");
        SimError::InvalidTransition {
            action,
            screen: self.screen.name(),
        }
    }
}

#[cfg(test)]
mod router_tests;
