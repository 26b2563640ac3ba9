use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::process::types::Pid;

/// Read access to the process table (procfs).
///
/// The root is `/proc` in production; tests point it at a temp directory laid
/// out the same way. Records come back as raw bytes, since procfs records are
/// NUL-separated and not guaranteed to be valid UTF-8.
#[derive(Debug, Clone)]
pub struct ProcTable {
    root: PathBuf,
}

impl ProcTable {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/proc"),
        }
    }

    /// A table rooted somewhere other than `/proc`. Used by tests.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate the numeric entries currently present under the root.
    ///
    /// Non-numeric entries (`self`, `uptime`, ...) are skipped. Order is
    /// whatever the directory listing yields. Enumeration makes no liveness
    /// promise, so callers must tolerate reads failing for any returned pid.
    pub fn pids(&self) -> io::Result<Vec<Pid>> {
        let mut pids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let Ok(entry) = entry else { continue };
            if let Some(name) = entry.file_name().to_str()
                && let Ok(pid) = name.parse::<u32>()
            {
                pids.push(Pid::from_raw(pid));
            }
        }
        Ok(pids)
    }

    /// Raw command-line record for a pid (NUL-separated argv bytes).
    pub fn read_cmdline(&self, pid: Pid) -> io::Result<Vec<u8>> {
        fs::read(self.record_path(pid, "cmdline"))
    }

    /// Raw environment block for a pid (NUL-separated `NAME=value` records).
    pub fn read_environ(&self, pid: Pid) -> io::Result<Vec<u8>> {
        fs::read(self.record_path(pid, "environ"))
    }

    fn record_path(&self, pid: Pid, record: &str) -> PathBuf {
        self.root.join(pid.as_u32().to_string()).join(record)
    }
}

impl Default for ProcTable {
    fn default() -> Self {
        Self::new()
    }
}
