use std::io;
use thiserror::Error;

/// Error type for thread pool operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// The requested number of worker threads is not usable.
    #[error("Invalid pool size: {0}")]
    InvalidSize(u32),

    /// A worker thread could not be started.
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),

    /// The pool is shutting down and no longer admits jobs.
    #[error("Job rejected: thread pool is shut down")]
    Rejected,
}

/// Result type alias for thread pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
