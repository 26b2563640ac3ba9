use crate::errors::MangosyncError;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Failed to enumerate process table at '{path}': {source}")]
    TableUnreadable {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

impl MangosyncError for ProcessError {
    fn error_code(&self) -> &'static str {
        match self {
            ProcessError::TableUnreadable { .. } => "PROCESS_TABLE_UNREADABLE",
        }
    }
}
