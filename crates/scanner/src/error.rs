use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for scanner operations
pub type Result<T> = std::result::Result<T, ScannerError>;

/// Errors that can occur while extracting headers
#[derive(Error, Debug)]
pub enum ScannerError {
    /// The source file could not be opened or read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScannerError {
    /// Create an IO error bound to the file that failed
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Path of the file involved in the failure
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } => path,
        }
    }
}
