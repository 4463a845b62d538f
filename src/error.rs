use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while preparing a proofreading run.
///
/// Anything returned from here is fatal for the run; per-line and per-token
/// problems are skipped where they occur and never reach this type.
#[derive(Debug, Error)]
pub enum ProofreadError {
    #[error("required file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no {0} configured")]
    NotConfigured(&'static str),

    #[error("no post with id {0}")]
    UnknownPost(u64),

    #[error("failed to build word set: {0}")]
    WordSet(#[from] fst::Error),
}

pub type Result<T> = std::result::Result<T, ProofreadError>;
