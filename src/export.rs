// Certificate export - serialize a completion record and hand it to a save target
//
// Export failures are reported to the caller and never touch router or
// session state.

use crate::certificate::CompletionRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Format tag written into every exported document
pub const EXPORT_FORMAT: &str = "JSON";

pub const FILE_PREFIX: &str = "secure-wipe-certificate";

#[derive(Error, Debug)]
pub enum ExportFailure {
    #[error("Export failed: could not serialize certificate: {0}")]
    Serialization(String),

    #[error("Export failed: could not save certificate: {0}")]
    Handoff(#[from] std::io::Error),
}

/// Exported document: every record field plus export metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    #[serde(flatten)]
    pub record: &'a CompletionRecord,
    pub exported_at: DateTime<Utc>,
    pub format: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// What a successful export produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub certificate_id: String,
    pub location: PathBuf,
    pub bytes_written: usize,
}

/// Turns an export document into bytes
pub trait CertificateEncoder {
    fn encode(&self, document: &ExportDocument<'_>) -> Result<Vec<u8>, ExportFailure>;
}

/// Pretty-printed JSON, two-space indent
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl CertificateEncoder for JsonEncoder {
    fn encode(&self, document: &ExportDocument<'_>) -> Result<Vec<u8>, ExportFailure> {
        serde_json::to_vec_pretty(document).map_err(|e| ExportFailure::Serialization(e.to_string()))
    }
}

/// The host's file-save mechanism
#[cfg_attr(test, mockall::automock)]
pub trait SaveTarget {
    /// Persist `content` under `file_name` and report where it went.
    fn save(&mut self, file_name: &str, content: &[u8]) -> std::io::Result<PathBuf>;
}

/// Saves into a directory, creating it if needed
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    directory: PathBuf,
}

impl DirectoryTarget {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }
}

impl SaveTarget for DirectoryTarget {
    fn save(&mut self, file_name: &str, content: &[u8]) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(file_name);
        fs::write(&path, content)?;
        Ok(path)
    }
}

pub fn export_file_name(record: &CompletionRecord) -> String {
    format!("{}-{}.json", FILE_PREFIX, record.id)
}

pub struct CertificateExporter {
    encoder: Box<dyn CertificateEncoder + Send + Sync>,
    delay: Duration,
}

impl Default for CertificateExporter {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

impl std::fmt::Debug for CertificateExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateExporter")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl CertificateExporter {
    /// JSON exporter with an artificial "generating" pause of `delay`
    pub fn new(delay: Duration) -> Self {
        Self::with_encoder(JsonEncoder, delay)
    }

    pub fn with_encoder(encoder: impl CertificateEncoder + Send + Sync + 'static, delay: Duration) -> Self {
        Self {
            encoder: Box::new(encoder),
            delay,
        }
    }

    /// Build the file name and content for `record`.
    pub fn build_payload(
        &self,
        record: &CompletionRecord,
        exported_at: DateTime<Utc>,
    ) -> Result<ExportPayload, ExportFailure> {
        let document = ExportDocument {
            record,
            exported_at,
            format: EXPORT_FORMAT,
        };

        Ok(ExportPayload {
            file_name: export_file_name(record),
            content: self.encoder.encode(&document)?,
        })
    }

    /// Wait out the generation delay, serialize, and hand off to `target`.
    pub async fn export(
        &self,
        record: &CompletionRecord,
        target: &mut dyn SaveTarget,
    ) -> Result<ExportReceipt, ExportFailure> {
        tokio::time::sleep(self.delay).await;

        let payload = self.build_payload(record, Utc::now()).map_err(|e| {
            tracing::error!(id = %record.id, error = %e, "Certificate serialization failed");
            e
        })?;

        let location = target.save(&payload.file_name, &payload.content).map_err(|e| {
            tracing::error!(id = %record.id, error = %e, "Certificate save handoff failed");
            ExportFailure::Handoff(e)
        })?;

        tracing::info!(id = %record.id, path = %location.display(), "Certificate exported");
        Ok(ExportReceipt {
            certificate_id: record.id.clone(),
            location,
            bytes_written: payload.content.len(),
        })
    }
}
