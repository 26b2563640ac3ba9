//! In-memory mirror of a line-oriented `key=value` config file.
//!
//! MangoHud config files are one setting per line, either `key=value` or a
//! bare token; there is no quoting or escaping. [`ConfigDocument`] preserves
//! the file's line order through parse/serialize, and [`ConfigStore`] keeps
//! one document tied to an on-disk path with dirty tracking and atomic
//! replacement on write.

pub mod errors;
pub mod file;
pub mod types;

pub use errors::StoreError;
pub use file::ConfigStore;
pub use types::{ConfigDocument, ConfigEntry};
