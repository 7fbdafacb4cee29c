//! Unified error types surfaced by the runtime API.
//!
//! Wraps snapshot rejections from the engine and failures of worker tasks so
//! clients can bubble them up with consistent context.
use arena_core::{EngineError, ErrorSeverity, SnapshotError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("a series needs at least one battle")]
    EmptySeries,
}

impl RuntimeError {
    /// Severity of the underlying failure; worker failures are internal.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Snapshot(err) => err.severity(),
            Self::WorkerJoin(_) => ErrorSeverity::Internal,
            Self::EmptySeries => ErrorSeverity::Validation,
        }
    }

    /// Stable identifier for logs and reports.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Snapshot(err) => err.error_code(),
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::EmptySeries => "RUNTIME_EMPTY_SERIES",
        }
    }
}
