use tracing::debug;

use crate::process::errors::ProcessError;
use crate::process::table::ProcTable;
use crate::process::types::Pid;

/// Check if a raw command-line record starts with the given prefix.
///
/// The record is the NUL-separated argv bytes, so this compares against the
/// head of argv[0]. Matching is a literal byte prefix: "mangoapp" also
/// matches a binary named "mangoapp-wrapped". An empty prefix matches
/// nothing, and an empty record (a zombie, typically) matches nothing.
fn cmdline_has_prefix(cmdline: &[u8], prefix: &str) -> bool {
    !prefix.is_empty() && cmdline.starts_with(prefix.as_bytes())
}

/// Extract the value of `name` from a NUL-separated environment block.
///
/// Records are `NAME=value` and value may itself contain `=`. The match
/// requires the full `NAME=` prefix, so a variable that merely shares the
/// prefix (e.g. `NAME_BACKUP`) cannot shadow the requested one. The value is
/// returned with surrounding whitespace trimmed.
fn env_block_value(environ: &[u8], name: &str) -> Option<String> {
    let mut needle = Vec::with_capacity(name.len() + 1);
    needle.extend_from_slice(name.as_bytes());
    needle.push(b'=');

    for record in environ.split(|&b| b == 0) {
        if record.starts_with(&needle) {
            let raw = &record[needle.len()..];
            return Some(String::from_utf8_lossy(raw).trim().to_string());
        }
    }
    None
}

/// Find the first process whose command line starts with `prefix`.
///
/// Scans every numeric process-table entry. Per-pid read failures are
/// expected under process churn (the process can exit between enumeration
/// and read) and skip the candidate silently. At most one match is expected
/// in practice; ties go to enumeration order.
///
/// # Errors
///
/// Returns an error only when the process table root itself cannot be
/// enumerated.
pub fn find_by_cmdline_prefix(
    table: &ProcTable,
    prefix: &str,
) -> Result<Option<Pid>, ProcessError> {
    let pids = table
        .pids()
        .map_err(|source| ProcessError::TableUnreadable {
            path: table.root().to_path_buf(),
            source,
        })?;

    for pid in pids {
        let Ok(cmdline) = table.read_cmdline(pid) else {
            continue;
        };
        if cmdline_has_prefix(&cmdline, prefix) {
            debug!(
                event = "core.process.target_found",
                pid = pid.as_u32(),
                prefix = prefix
            );
            return Ok(Some(pid));
        }
    }

    debug!(event = "core.process.target_not_found", prefix = prefix);
    Ok(None)
}

/// Read `name` from the environment block of `pid`.
///
/// An unreadable environment (process exited, permission denied) and a
/// missing record are indistinguishable to callers: both return `None`.
pub fn resolve_env_var(table: &ProcTable, pid: Pid, name: &str) -> Option<String> {
    let environ = match table.read_environ(pid) {
        Ok(environ) => environ,
        Err(e) => {
            debug!(
                event = "core.process.environ_unreadable",
                pid = pid.as_u32(),
                error = %e
            );
            return None;
        }
    };

    match env_block_value(&environ, name) {
        Some(value) => {
            debug!(
                event = "core.process.env_var_resolved",
                pid = pid.as_u32(),
                name = name,
                value = %value
            );
            Some(value)
        }
        None => {
            debug!(
                event = "core.process.env_var_missing",
                pid = pid.as_u32(),
                name = name
            );
            None
        }
    }
}
