// Simulator configuration
//
// Layered with the `config` crate: built-in defaults, then an optional TOML
// file, then `SECURE_WIPER__*` environment variables.

use crate::simulator::{COMPLETION_DELAY_MS, TICK_INCREMENT, TICK_PERIOD_MS};
use crate::{SimError, SimResult};
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "SECURE_WIPER";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub timing: TimingConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub tick_ms: u64,
    pub increment: f64,
    pub completion_delay_ms: u64,
    /// Artificial "generating certificate" pause before an export
    pub export_delay_ms: u64,
    /// Simulated administrator permission check on start
    pub security_check_ms: u64,
    pub launch_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_PERIOD_MS,
            increment: TICK_INCREMENT,
            completion_delay_ms: COMPLETION_DELAY_MS,
            export_delay_ms: 2000,
            security_check_ms: 1500,
            launch_delay_ms: 1000,
        }
    }
}

impl TimingConfig {
    /// Zero delays everywhere except the tick, for tests and demos.
    pub fn instant() -> Self {
        Self {
            tick_ms: 1,
            completion_delay_ms: 0,
            export_delay_ms: 0,
            security_check_ms: 0,
            launch_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    pub fn export_delay(&self) -> Duration {
        Duration::from_millis(self.export_delay_ms)
    }

    pub fn security_check(&self) -> Duration {
        Duration::from_millis(self.security_check_ms)
    }

    pub fn launch_delay(&self) -> Duration {
        Duration::from_millis(self.launch_delay_ms)
    }

    /// Ticks needed to go from 0 to 100%
    pub fn ticks_to_complete(&self) -> u64 {
        (100.0 / self.increment).ceil() as u64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Where exported certificates land; `None` means the user's download dir
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    pub fn resolved_directory(&self) -> PathBuf {
        if let Some(dir) = &self.directory {
            return dir.clone();
        }

        UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl SimulatorConfig {
    /// Load configuration. An explicit `path` must exist; the default
    /// location is optional.
    pub fn load(path: Option<&Path>) -> SimResult<Self> {
        let mut builder = ::config::Config::builder();

        match path {
            Some(p) => {
                builder = builder.add_source(::config::File::from(p).required(true));
            }
            None => {
                if let Some(p) = default_config_path() {
                    builder = builder.add_source(::config::File::from(p).required(false));
                }
            }
        }

        let loaded: SimulatorConfig = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        tracing::debug!(config = ?loaded, "Loaded simulator configuration");
        Ok(loaded)
    }

    pub fn validate(&self) -> SimResult<()> {
        let t = &self.timing;
        if t.tick_ms == 0 {
            return Err(SimError::Config("timing.tick_ms must be positive".to_string()));
        }
        if !t.increment.is_finite() || t.increment <= 0.0 || t.increment > 100.0 {
            return Err(SimError::Config(format!(
                "timing.increment must be in (0, 100], got {}",
                t.increment
            )));
        }
        Ok(())
    }
}

/// `<config dir>/secure-wiper/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "secure-wiper", "secure-wiper")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
