pub mod errors;
pub mod operations;
pub mod table;
pub mod types;

pub use errors::ProcessError;
pub use operations::{find_by_cmdline_prefix, resolve_env_var};
pub use table::ProcTable;
pub use types::Pid;
