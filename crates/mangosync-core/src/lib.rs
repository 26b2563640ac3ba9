//! mangosync-core: Core library for mirroring a MangoHud config file
//!
//! This library provides the business logic for locating a running
//! `mangoapp` process, resolving the config file it was launched with,
//! and keeping an in-memory mirror of that file flushed to disk. It is
//! used by the mangosyncd daemon.
//!
//! # Main Entry Points
//!
//! - [`sync`] - The two-speed polling loop and its state machine
//! - [`process`] - Process-table scans and environment resolution
//! - [`store`] - The in-memory config mirror and atomic writes
//! - [`config`] - Daemon configuration management

pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod process;
pub mod store;
pub mod sync;

// Re-export commonly used types at crate root for convenience
pub use config::SyncConfig;
pub use process::{Pid, ProcTable, ProcessError};
pub use store::{ConfigDocument, ConfigEntry, ConfigStore, StoreError};
pub use sync::{SyncPhase, SyncScheduler, SyncState};

// Re-export logging initialization
pub use logging::init_logging;
