use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for file discovery
pub type Result<T> = std::result::Result<T, FinderError>;

#[derive(Error, Debug)]
pub enum FinderError {
    /// The glob pattern could not be compiled
    #[error("Invalid glob pattern {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Directory traversal failed
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FinderError {
    pub fn glob(pattern: impl Into<String>, source: globset::Error) -> Self {
        Self::Glob {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether the underlying cause is a missing file or directory
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::Walk(err) => err
                .io_error()
                .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound),
            Self::Glob { .. } => false,
        }
    }
}
