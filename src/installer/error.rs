use std::path::PathBuf;

use thiserror::Error;

/// Errors terminal for one installation run.
///
/// A failed run leaves whatever it had already written on disk; re-running
/// the installation into the same directory is the recovery path.
#[derive(Debug, Error)]
pub enum InstallerError {
    #[error("archive download failed with status {status}")]
    Download { status: u16 },
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("installation task failed: {0}")]
    Task(String),
}

impl InstallerError {
    pub(super) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
