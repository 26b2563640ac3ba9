use serde::{Deserialize, Serialize};

/// Process ID as enumerated from the process table.
///
/// Discovery results are transient: a pid is only trusted for the tick that
/// looked it up, so there is no liveness state attached here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(u32);

impl Pid {
    pub fn from_raw(pid: u32) -> Self {
        Self(pid)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Pid {
    fn from(pid: u32) -> Self {
        Self(pid)
    }
}
