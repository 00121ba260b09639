//! Common test utilities for the workflow integration tests
//!
//! - `RecordingSurface` captures every frame and notification
//! - `MemoryTarget` / `FailingTarget` stand in for the host's file-save step
//! - `fast_config` ticks every millisecond with no artificial delays
#![allow(dead_code)]

use secure_wiper::settings::{SimulatorConfig, TimingConfig};
use secure_wiper::ui::Notice;
use secure_wiper::{SaveTarget, SimResult, Surface};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub frames: Vec<String>,
    pub redraws: usize,
    pub notices: Vec<Notice>,
}

impl RecordingSurface {
    pub fn notice_titles(&self) -> Vec<&str> {
        self.notices.iter().map(|n| n.title.as_str()).collect()
    }

    pub fn last_frame(&self) -> &str {
        self.frames.last().map(String::as_str).unwrap_or("")
    }
}

impl Surface for RecordingSurface {
    fn show(&mut self, frame: &str) -> SimResult<()> {
        self.frames.push(frame.to_string());
        Ok(())
    }

    fn redraw(&mut self, frame: &str) -> SimResult<()> {
        self.redraws += 1;
        self.frames.push(frame.to_string());
        Ok(())
    }

    fn notify(&mut self, notice: &Notice) -> SimResult<()> {
        self.notices.push(notice.clone());
        Ok(())
    }
}

/// Saved (file name, content) pairs, shared with the test body
pub type SavedFiles = Arc<Mutex<Vec<(String, Vec<u8>)>>>;

#[derive(Debug, Clone, Default)]
pub struct MemoryTarget {
    pub saved: SavedFiles,
}

impl SaveTarget for MemoryTarget {
    fn save(&mut self, file_name: &str, content: &[u8]) -> std::io::Result<PathBuf> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), content.to_vec()));
        Ok(PathBuf::from("/memory").join(file_name))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FailingTarget;

impl SaveTarget for FailingTarget {
    fn save(&mut self, _file_name: &str, _content: &[u8]) -> std::io::Result<PathBuf> {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "save dialog refused",
        ))
    }
}

/// Default timing (200ms ticks, 0.5% increment, 2s completion delay)
pub fn default_config() -> SimulatorConfig {
    SimulatorConfig::default()
}

/// 1ms ticks and no artificial delays
pub fn fast_config() -> SimulatorConfig {
    SimulatorConfig {
        timing: TimingConfig::instant(),
        ..SimulatorConfig::default()
    }
}
