use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{} is not a directory", .0.display())]
    InvalidSource(PathBuf),

    #[error("{} is not a directory", .0.display())]
    InvalidDestination(PathBuf),

    #[error("Source and destination point to the same directory: {}", .0.display())]
    SameRoot(PathBuf),

    #[error("Cannot resolve canonical path of {}: {source}", path.display())]
    Canonicalize { path: PathBuf, source: io::Error },

    #[error("Cannot open database {}: {source}", path.display())]
    StoreOpen {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error on {}: {source}", path.display())]
    Filesystem { path: PathBuf, source: io::Error },

    #[error("{} is a file on one side and a directory on the other", .0.display())]
    KindMismatch(PathBuf),

    #[error("No counterpart of {} to copy from", .0.display())]
    MissingCounterpart(PathBuf),

    #[error("The file {} does not exist. Stopping synchronization.", .0.display())]
    MissingCheckFile(PathBuf),
}

impl Error {
    /// Wraps an I/O failure together with the path it happened on.
    pub fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 1,
            Error::InvalidSource(_) => 2,
            Error::InvalidDestination(_) => 3,
            Error::SameRoot(_) => 4,
            Error::Canonicalize { .. } => 5,
            Error::StoreOpen { .. } | Error::Database(_) => 6,
            Error::Filesystem { .. } | Error::KindMismatch(_) | Error::MissingCounterpart(_) => 7,
            Error::MissingCheckFile(_) => 8,
        }
    }
}
