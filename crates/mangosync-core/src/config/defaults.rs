//! Default implementations for configuration types.
//!
//! This module contains all `Default` implementations and helper functions
//! for providing default values in serde deserialization.

use crate::config::types::{PollConfig, TargetConfig};

/// Returns the default command-line prefix of the target process.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_process_prefix() -> String {
    "mangoapp".to_string()
}

/// Returns the default environment variable naming the mirrored config file.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_env_var() -> String {
    "MANGOHUD_CONFIGFILE".to_string()
}

/// Returns the default tick interval in milliseconds (1000ms).
///
/// One flush per second keeps the on-disk file fresh without measurable
/// load; discovery runs on a multiple of this.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_tick_interval_ms() -> u64 {
    1000
}

/// Returns the default slow-tick divisor (4).
///
/// Process-table scans are far more expensive than a flush, so rediscovery
/// runs on every fourth tick.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_slow_tick_divisor() -> u32 {
    4
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            process_prefix: default_process_prefix(),
            env_var: default_env_var(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            slow_tick_divisor: default_slow_tick_divisor(),
        }
    }
}
