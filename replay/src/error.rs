use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    #[error("Truncated battle result after {read} bytes")]
    Truncated { read: usize },

    #[error("Invalid {field} value {value} in battle result")]
    InvalidField { field: &'static str, value: u64 },

    #[error("Team of {0} members does not fit in a battle result")]
    TeamTooLarge(usize),

    #[error("Worker pool is shut down")]
    PoolClosed,

    #[error("Worker thread panicked")]
    WorkerPanicked,
}
