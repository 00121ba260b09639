use crate::export::{ExportFailure, ExportReceipt};
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

/// Transient notification shown after a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    pub fn security_check_complete() -> Self {
        Self::info(
            "Security Check Complete",
            "Administrator permissions verified. Initializing secure wipe...",
        )
    }

    pub fn exported(receipt: &ExportReceipt) -> Self {
        Self::info(
            "Certificate Exported",
            format!(
                "Secure wipe certificate has been saved to {}.",
                receipt.location.display()
            ),
        )
    }

    pub fn export_failed(failure: &ExportFailure) -> Self {
        tracing::debug!(error = %failure, "Export failure surfaced to user");
        Self::destructive(
            "Export Failed",
            "Failed to export certificate. Please try again.",
        )
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Destructive
    }

    pub fn render(&self) -> String {
        match self.severity {
            Severity::Info => format!("{} {}", format!("● {}", self.title).as_str().green().bold(), self.description),
            Severity::Destructive => format!("{} {}", format!("✗ {}", self.title).as_str().red().bold(), self.description),
        }
    }
}
