//! Configuration type definitions for the mangosync daemon.
//!
//! These types are serialized/deserialized from the TOML config file. Every
//! field carries a serde default, so a partial (or absent) file always yields
//! a complete configuration.
//!
//! # Example Configuration
//!
//! ```toml
//! [target]
//! process_prefix = "mangoapp"
//! env_var = "MANGOHUD_CONFIGFILE"
//!
//! [poll]
//! tick_interval_ms = 1000
//! slow_tick_divisor = 4
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration loaded from the TOML config file.
///
/// Loaded from `~/.mangosync/config.toml`; a missing file yields the built-in
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyncConfig {
    /// Which process to discover and where it names its config file
    #[serde(default)]
    pub target: TargetConfig,

    /// Polling cadence for the sync loop
    #[serde(default)]
    pub poll: PollConfig,
}

/// Target process discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Command-line prefix identifying the target process.
    /// Default: "mangoapp".
    #[serde(default = "super::defaults::default_process_prefix")]
    pub process_prefix: String,

    /// Environment variable on the target process that holds the path of the
    /// config file to mirror. Default: "MANGOHUD_CONFIGFILE".
    #[serde(default = "super::defaults::default_env_var")]
    pub env_var: String,
}

/// Polling cadence configuration.
///
/// Every tick flushes the mirrored document; every `slow_tick_divisor`-th
/// tick additionally re-runs process and config-file discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Milliseconds between ticks.
    /// Default: 1000ms.
    #[serde(default = "super::defaults::default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Every Nth tick runs the expensive rediscovery pass.
    /// Default: 4.
    #[serde(default = "super::defaults::default_slow_tick_divisor")]
    pub slow_tick_divisor: u32,
}

impl PollConfig {
    /// The tick period as a `Duration`.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
