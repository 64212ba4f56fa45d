// src/config/model.rs

//! Runner configuration model.

use serde::Deserialize;

use crate::engine::RunnerOptions;

/// Top-level configuration file.
///
/// ```toml
/// [runner]
/// log_capacity = 200
/// halt_on_failure = false
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub runner: RunnerSection,
}

/// `[runner]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerSection {
    /// Capacity of each task's log line channel. `0` means "use the sink's
    /// documented default".
    #[serde(default)]
    pub log_capacity: usize,

    /// Abort remaining tasks after a `Failed` result.
    #[serde(default = "default_halt_on_failure")]
    pub halt_on_failure: bool,
}

fn default_halt_on_failure() -> bool {
    true
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            log_capacity: 0,
            halt_on_failure: default_halt_on_failure(),
        }
    }
}

impl ConfigFile {
    /// Translate into the options consumed by the engine.
    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            log_capacity: self.runner.log_capacity,
            halt_on_failure: self.runner.halt_on_failure,
        }
    }
}
