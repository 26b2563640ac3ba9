use std::path::PathBuf;

use crate::process::Pid;
use crate::store::ConfigStore;

/// Discovery progress, derived from what the last slow tick recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// No target process known.
    Uninitialized,
    /// Target process known, config path not resolved.
    ProcessKnown,
    /// Target process and config path both known.
    ConfigKnown,
}

/// State owned by the sync loop. No globals: the task running the loop holds
/// exactly one of these.
///
/// `target` is re-recorded on every slow tick (including absence), and
/// `config_path` is re-recorded whenever a target is present, so the phase
/// can drop back down while the target application is gone. `store` only
/// ratchets forward: created on the first successful discovery, then
/// retargeted in place for the rest of the daemon's life.
#[derive(Debug, Default)]
pub struct SyncState {
    pub target: Option<Pid>,
    pub config_path: Option<PathBuf>,
    pub store: Option<ConfigStore>,
    /// Cycles through `0..slow_tick_divisor`; 0 is the slow tick.
    pub slow_tick: u32,
}

impl SyncState {
    pub fn phase(&self) -> SyncPhase {
        match (self.target, &self.config_path) {
            (Some(_), Some(_)) => SyncPhase::ConfigKnown,
            (Some(_), None) => SyncPhase::ProcessKnown,
            (None, _) => SyncPhase::Uninitialized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_uninitialized() {
        let state = SyncState::default();
        assert_eq!(state.phase(), SyncPhase::Uninitialized);
        assert_eq!(state.slow_tick, 0);
        assert!(state.store.is_none());
    }

    #[test]
    fn test_phase_derivation() {
        let mut state = SyncState::default();

        state.target = Some(Pid::from_raw(4821));
        assert_eq!(state.phase(), SyncPhase::ProcessKnown);

        state.config_path = Some(PathBuf::from("/tmp/MangoHud.conf"));
        assert_eq!(state.phase(), SyncPhase::ConfigKnown);

        // Losing the process outranks a remembered path.
        state.target = None;
        assert_eq!(state.phase(), SyncPhase::Uninitialized);
    }
}
