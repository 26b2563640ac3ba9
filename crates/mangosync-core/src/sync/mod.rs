//! The polling loop that keeps the mirrored config flushed to disk.
//!
//! Two cadences share one timer: every tick flushes the store, and every
//! `slow_tick_divisor`-th tick re-runs process and config-file discovery.
//! [`SyncScheduler::tick`] is synchronous and side-effect-complete, so the
//! whole state machine is testable without a runtime; [`SyncScheduler::run`]
//! wraps it in a cancellable timed loop.

pub mod scheduler;
pub mod types;

pub use scheduler::SyncScheduler;
pub use types::{SyncPhase, SyncState};
