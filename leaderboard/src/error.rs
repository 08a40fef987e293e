use thiserror::Error;

/// FeedError is returned by the transport boundary. A snapshot that cannot be decoded never
/// reaches the engine.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed feed message: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Empty feed message")]
    Empty,
}

/// Degradation describes a recoverable problem of one reconciliation pass. The pass still
/// completes, the rendered leaderboard is only partial.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    #[error("No entry matches the reference driver")]
    MissingReference,

    #[error("Reference position {position} is outside [1, {total}]")]
    InvalidWindow { position: u32, total: u32 },

    #[error("Dropped {count} entries without a usable car index")]
    OrphanEntries { count: usize },
}

pub type Result<T> = std::result::Result<T, FeedError>;
