//! # Configuration System
//!
//! TOML configuration for the mangosync daemon.
//!
//! Configuration is loaded in the following order (later sources override
//! earlier ones):
//! 1. **Hardcoded defaults** - The stock mangoapp/MangoHud setup
//! 2. **User config** - `~/.mangosync/config.toml`
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.mangosync/config.toml
//! [target]
//! process_prefix = "mangoapp"
//! env_var = "MANGOHUD_CONFIGFILE"
//!
//! [poll]
//! tick_interval_ms = 1000
//! slow_tick_divisor = 4
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use mangosync_core::config::SyncConfig;
//!
//! // Handle config errors explicitly - don't silently fall back to defaults
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SyncConfig::load()?;
//!     let period = config.poll.tick_interval();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;

// Public API exports
pub use types::{PollConfig, SyncConfig, TargetConfig};

// Delegation for SyncConfig methods
impl SyncConfig {
    /// Load configuration from the user config file.
    ///
    /// See [`loading::load`] for details.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        loading::load()
    }

    /// Validate the configuration.
    ///
    /// See [`loading::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        loading::validate_config(self)
    }
}
