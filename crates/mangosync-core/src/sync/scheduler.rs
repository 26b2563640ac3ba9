use std::path::PathBuf;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::process::{self, ProcTable};
use crate::store::ConfigStore;
use crate::sync::types::SyncState;

/// Drives the two-speed sync loop.
///
/// Every tick flushes the mirrored document when a store exists. Every
/// `slow_tick_divisor`-th tick additionally re-runs discovery: locate the
/// target process, resolve its config path, open or retarget the store.
/// Discovery misses are a normal steady state, not failures; the loop only
/// stops through the cancellation token.
pub struct SyncScheduler {
    config: SyncConfig,
    table: ProcTable,
    state: SyncState,
}

impl SyncScheduler {
    pub fn new(config: SyncConfig) -> Self {
        Self::with_table(config, ProcTable::new())
    }

    /// A scheduler scanning a non-default process table root.
    pub fn with_table(config: SyncConfig, table: ProcTable) -> Self {
        Self {
            config,
            table,
            state: SyncState::default(),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Run a single tick: discovery on the slow cadence, then the
    /// unconditional flush. Never fails; every failure inside a tick is
    /// logged and left for a later tick to retry.
    pub fn tick(&mut self) {
        if self.state.slow_tick == 0 {
            self.discover();
        }
        self.flush();
        self.state.slow_tick = (self.state.slow_tick + 1) % self.config.poll.slow_tick_divisor;
    }

    /// The slow-tick pass: re-locate the target process and its config file.
    ///
    /// The recorded pid is overwritten with the scan result even when the
    /// scan comes up empty, while `config_path` is only rewritten when a
    /// process is present. A vanished process therefore leaves the previous
    /// path (and the store flushing to it) in place until the process
    /// returns.
    fn discover(&mut self) {
        debug!(
            event = "core.sync.discovery_started",
            phase = ?self.state.phase()
        );

        self.state.target =
            match process::find_by_cmdline_prefix(&self.table, &self.config.target.process_prefix)
            {
                Ok(found) => found,
                Err(e) => {
                    warn!(event = "core.sync.scan_failed", error = %e);
                    None
                }
            };

        if let Some(pid) = self.state.target {
            self.state.config_path =
                process::resolve_env_var(&self.table, pid, &self.config.target.env_var)
                    .map(PathBuf::from);
        }

        if let Some(path) = self.state.config_path.clone() {
            self.adopt(path);
        }

        debug!(
            event = "core.sync.discovery_completed",
            phase = ?self.state.phase()
        );
    }

    /// Point the store at `path`, constructing it on first discovery. An
    /// unreadable file is left for the next slow tick; the resolved path
    /// stays recorded either way.
    fn adopt(&mut self, path: PathBuf) {
        match &mut self.state.store {
            Some(store) => store.retarget(path),
            None => match ConfigStore::open(&path) {
                Ok(store) => {
                    info!(
                        event = "core.sync.store_opened",
                        path = %path.display(),
                        entries = store.document().len()
                    );
                    self.state.store = Some(store);
                }
                Err(e) => {
                    warn!(
                        event = "core.sync.store_open_failed",
                        path = %path.display(),
                        error = %e
                    );
                }
            },
        }
    }

    /// The every-tick pass: force-flush the mirror regardless of dirtiness,
    /// so external edits and deletions of the file on disk are overwritten
    /// within one tick.
    fn flush(&mut self) {
        if let Some(store) = &mut self.state.store
            && let Err(e) = store.write(true)
        {
            warn!(
                event = "core.sync.flush_failed",
                path = %store.path().display(),
                error = %e
            );
        }
    }

    /// Tick on the configured period until `shutdown` fires. Cancellation
    /// lands at the sleep boundary, so a tick in progress always runs to
    /// completion and the last flush is never torn.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(
            event = "core.sync.loop_started",
            tick_interval_ms = self.config.poll.tick_interval_ms,
            slow_tick_divisor = self.config.poll.slow_tick_divisor
        );

        loop {
            self.tick();

            tokio::select! {
                _ = sleep(self.config.poll.tick_interval()) => {}
                _ = shutdown.cancelled() => {
                    info!(
                        event = "core.sync.loop_stopped",
                        phase = ?self.state.phase()
                    );
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::config::SyncConfig;
    use crate::process::Pid;
    use crate::sync::types::SyncPhase;

    fn fake_proc_entry(root: &Path, pid: u32, cmdline: &[u8], environ: &[u8]) {
        let dir = root.join(pid.to_string());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("cmdline"), cmdline).unwrap();
        fs::write(dir.join("environ"), environ).unwrap();
    }

    fn mangoapp_entry(root: &Path, pid: u32, conf: &Path) {
        let environ = format!("HOME=/home/deck\0MANGOHUD_CONFIGFILE={}\0", conf.display());
        fake_proc_entry(root, pid, b"mangoapp\0", environ.as_bytes());
    }

    fn scheduler_at(root: &Path) -> SyncScheduler {
        SyncScheduler::with_table(SyncConfig::default(), ProcTable::with_root(root))
    }

    #[test]
    fn test_tick_without_target_stays_uninitialized() {
        let proc_root = tempfile::tempdir().unwrap();
        fake_proc_entry(proc_root.path(), 1, b"systemd\0", b"HOME=/root\0");

        let mut scheduler = scheduler_at(proc_root.path());
        for _ in 0..6 {
            scheduler.tick();
            assert_eq!(scheduler.state().phase(), SyncPhase::Uninitialized);
            assert!(scheduler.state().store.is_none());
        }
    }

    #[test]
    fn test_first_tick_discovers_and_flushes() {
        let proc_root = tempfile::tempdir().unwrap();
        let conf_dir = tempfile::tempdir().unwrap();
        let conf = conf_dir.path().join("MangoHud.conf");
        fs::write(&conf, "fps_limit = 60\nno_display\n").unwrap();
        mangoapp_entry(proc_root.path(), 4821, &conf);

        let mut scheduler = scheduler_at(proc_root.path());
        scheduler.tick();

        assert_eq!(scheduler.state().phase(), SyncPhase::ConfigKnown);
        assert_eq!(scheduler.state().target, Some(Pid::from_raw(4821)));
        assert_eq!(scheduler.state().config_path.as_deref(), Some(conf.as_path()));

        // The first flush rewrites the file in canonical form.
        assert_eq!(
            fs::read_to_string(&conf).unwrap(),
            "fps_limit=60\nno_display\n"
        );
    }

    #[test]
    fn test_fast_ticks_skip_discovery() {
        let proc_root = tempfile::tempdir().unwrap();
        let conf_dir = tempfile::tempdir().unwrap();
        let conf = conf_dir.path().join("MangoHud.conf");
        fs::write(&conf, "fps=0\n").unwrap();
        mangoapp_entry(proc_root.path(), 4821, &conf);

        let mut scheduler = scheduler_at(proc_root.path());
        scheduler.tick();
        assert_eq!(scheduler.state().target, Some(Pid::from_raw(4821)));

        // The process dies right after the slow tick. Fast ticks keep the
        // stale pid; the next slow tick (the fifth, with divisor 4) drops it.
        fs::remove_dir_all(proc_root.path().join("4821")).unwrap();
        for _ in 0..3 {
            scheduler.tick();
            assert_eq!(scheduler.state().target, Some(Pid::from_raw(4821)));
        }

        scheduler.tick();
        assert_eq!(scheduler.state().phase(), SyncPhase::Uninitialized);
        assert_eq!(scheduler.state().target, None);

        // The path and store outlive the process and keep flushing.
        assert_eq!(scheduler.state().config_path.as_deref(), Some(conf.as_path()));
        assert!(scheduler.state().store.is_some());
        assert_eq!(fs::read_to_string(&conf).unwrap(), "fps=0\n");
    }

    #[test]
    fn test_flush_recreates_deleted_file() {
        let proc_root = tempfile::tempdir().unwrap();
        let conf_dir = tempfile::tempdir().unwrap();
        let conf = conf_dir.path().join("MangoHud.conf");
        fs::write(&conf, "fps=0\n").unwrap();
        mangoapp_entry(proc_root.path(), 4821, &conf);

        let mut scheduler = scheduler_at(proc_root.path());
        scheduler.tick();

        fs::remove_file(&conf).unwrap();
        scheduler.tick();
        assert_eq!(fs::read_to_string(&conf).unwrap(), "fps=0\n");
    }

    #[test]
    fn test_env_var_missing_leaves_process_known() {
        let proc_root = tempfile::tempdir().unwrap();
        fake_proc_entry(
            proc_root.path(),
            4821,
            b"mangoapp\0",
            b"HOME=/home/deck\0DISPLAY=:0\0",
        );

        let mut scheduler = scheduler_at(proc_root.path());
        scheduler.tick();

        assert_eq!(scheduler.state().phase(), SyncPhase::ProcessKnown);
        assert!(scheduler.state().config_path.is_none());
        assert!(scheduler.state().store.is_none());
    }

    #[test]
    fn test_unreadable_config_retried_on_next_slow_tick() {
        let proc_root = tempfile::tempdir().unwrap();
        let conf_dir = tempfile::tempdir().unwrap();
        let conf = conf_dir.path().join("MangoHud.conf");
        mangoapp_entry(proc_root.path(), 4821, &conf);

        // Path resolves but the file does not exist yet.
        let mut scheduler = scheduler_at(proc_root.path());
        scheduler.tick();
        assert_eq!(scheduler.state().config_path.as_deref(), Some(conf.as_path()));
        assert!(scheduler.state().store.is_none());

        // Fast ticks do not retry the open even once the file appears.
        fs::write(&conf, " fps = 30 \n").unwrap();
        for _ in 0..3 {
            scheduler.tick();
            assert!(scheduler.state().store.is_none());
        }
        assert_eq!(fs::read_to_string(&conf).unwrap(), " fps = 30 \n");

        // The next slow tick opens and canonicalizes it.
        scheduler.tick();
        assert!(scheduler.state().store.is_some());
        assert_eq!(fs::read_to_string(&conf).unwrap(), "fps=30\n");
    }

    #[test]
    fn test_path_change_retargets_without_rereading() {
        let proc_root = tempfile::tempdir().unwrap();
        let conf_dir = tempfile::tempdir().unwrap();
        let first = conf_dir.path().join("first.conf");
        let second = conf_dir.path().join("second.conf");
        fs::write(&first, "fps=30\n").unwrap();
        fs::write(&second, "fps=240\n").unwrap();
        mangoapp_entry(proc_root.path(), 4821, &first);

        let mut scheduler = scheduler_at(proc_root.path());
        scheduler.tick();

        // The process restarts pointing at a different config file.
        fs::remove_dir_all(proc_root.path().join("4821")).unwrap();
        mangoapp_entry(proc_root.path(), 5033, &second);

        // Fast ticks keep flushing the first file.
        for _ in 0..3 {
            scheduler.tick();
        }
        assert_eq!(fs::read_to_string(&second).unwrap(), "fps=240\n");

        // The slow tick retargets the store; the in-memory document wins
        // over whatever the second file contained.
        scheduler.tick();
        assert_eq!(scheduler.state().target, Some(Pid::from_raw(5033)));
        assert_eq!(scheduler.state().config_path.as_deref(), Some(second.as_path()));
        assert_eq!(fs::read_to_string(&second).unwrap(), "fps=30\n");
        assert_eq!(fs::read_to_string(&first).unwrap(), "fps=30\n");
    }

    #[test]
    fn test_divisor_one_rediscovers_every_tick() {
        let proc_root = tempfile::tempdir().unwrap();
        let conf_dir = tempfile::tempdir().unwrap();
        let conf = conf_dir.path().join("MangoHud.conf");
        fs::write(&conf, "fps=0\n").unwrap();
        mangoapp_entry(proc_root.path(), 4821, &conf);

        let mut config = SyncConfig::default();
        config.poll.slow_tick_divisor = 1;
        let mut scheduler =
            SyncScheduler::with_table(config, ProcTable::with_root(proc_root.path()));

        scheduler.tick();
        assert_eq!(scheduler.state().target, Some(Pid::from_raw(4821)));

        fs::remove_dir_all(proc_root.path().join("4821")).unwrap();
        scheduler.tick();
        assert_eq!(scheduler.state().target, None);
    }

    #[tokio::test]
    async fn test_run_stops_on_cancellation() {
        let proc_root = tempfile::tempdir().unwrap();
        let conf_dir = tempfile::tempdir().unwrap();
        let conf = conf_dir.path().join("MangoHud.conf");
        fs::write(&conf, "fps_limit=60\n").unwrap();
        mangoapp_entry(proc_root.path(), 4821, &conf);

        let mut config = SyncConfig::default();
        config.poll.tick_interval_ms = 10;
        let scheduler =
            SyncScheduler::with_table(config, ProcTable::with_root(proc_root.path()));

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(scheduler.run(shutdown.clone()));

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        shutdown.cancel();

        tokio::time::timeout(std::time::Duration::from_secs(3), handle)
            .await
            .expect("scheduler did not stop after cancellation")
            .unwrap();

        assert_eq!(fs::read_to_string(&conf).unwrap(), "fps_limit=60\n");
    }
}
