// Completion record - the synthetic "certificate" produced at 100%
//
// The integrity token is a random placeholder. It is not a digest of anything
// and must never be presented as proof of erasure.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Erasure standard the simulation imitates
pub const WIPE_METHOD: &str = "DoD 5220.22-M (3-pass)";

pub const VERIFICATION_PASSED: &str = "PASSED";

pub const DEVICE_LABEL: &str = "Primary Storage Device";

pub const COMPLETED_STATUS: &str = "Successfully Completed";

pub const COMPLIANCE_STANDARDS: [&str; 3] = ["NIST SP 800-88", "DoD 5220.22-M", "ISO 27001"];

/// Prefix marking the integrity token as simulated
pub const TOKEN_PREFIX: &str = "SIMULATED";

const TOKEN_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const TOKEN_LEN: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub device: String,
    pub method: String,
    pub status: String,
    pub duration_seconds: u64,
    pub verification_status: String,
    pub integrity_token: String,
    pub compliance_standards: Vec<String>,
}

impl CompletionRecord {
    /// Build the record for a session that finished at `completed_at`.
    pub fn synthesize(completed_at: DateTime<Utc>, duration_seconds: u64) -> Self {
        Self {
            id: certificate_id(completed_at),
            timestamp: completed_at,
            device: DEVICE_LABEL.to_string(),
            method: WIPE_METHOD.to_string(),
            status: COMPLETED_STATUS.to_string(),
            duration_seconds,
            verification_status: VERIFICATION_PASSED.to_string(),
            integrity_token: placeholder_token(),
            compliance_standards: COMPLIANCE_STANDARDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn passed(&self) -> bool {
        self.verification_status == VERIFICATION_PASSED
    }
}

/// `CERT-<completion millis>-<8 hex>`; the uuid suffix keeps ids unique
/// within the same millisecond.
fn certificate_id(completed_at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "CERT-{}-{}",
        completed_at.timestamp_millis(),
        suffix[..8].to_uppercase()
    )
}

fn placeholder_token() -> String {
    let mut rng = rand::thread_rng();
    let token: String = (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect();
    format!("{}: {}", TOKEN_PREFIX, token)
}
