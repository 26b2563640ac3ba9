use crate::errors::MangosyncError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFailed {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteFailed {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

impl MangosyncError for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            StoreError::ReadFailed { .. } => "STORE_READ_FAILED",
            StoreError::WriteFailed { .. } => "STORE_WRITE_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_codes() {
        let read = StoreError::ReadFailed {
            path: "/tmp/MangoHud.conf".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(read.error_code(), "STORE_READ_FAILED");
        assert!(read.to_string().contains("/tmp/MangoHud.conf"));

        let write = StoreError::WriteFailed {
            path: "/tmp/MangoHud.conf".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(write.error_code(), "STORE_WRITE_FAILED");
        assert!(!write.is_user_error());
    }
}
