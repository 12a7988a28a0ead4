//! Portfolio export: validation, asset bundling, ZIP assembly and the
//! background worker that drives each job through its checkpoints.

pub mod archive;
pub mod assets;
pub mod job;
pub mod pipeline;
pub mod queue;
pub mod validation;

use thiserror::Error;

use crate::store::StoreError;

pub use job::{ExportJob, ExportProgress, ExportRequest};
pub use queue::ExportQueue;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Portfolio not found")]
    PortfolioNotFound,

    #[error("Portfolio validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Invalid asset '{filename}': {reason}")]
    Asset { filename: String, reason: String },

    #[error("Failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Failed to write archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export timed out after {0}s")]
    TimedOut(u64),

    #[error("Export queue is full")]
    QueueFull,

    #[error("Export queue is closed")]
    QueueClosed,

    #[error("Export task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
