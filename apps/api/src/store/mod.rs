//! Storage seams. Handlers and the export worker only see these traits; the
//! in-memory implementations stand in for a real datastore.

pub mod jobs;
pub mod portfolios;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::export::job::ExportProgress;
use crate::models::Portfolio;

pub use jobs::InMemoryExportJobStore;
pub use portfolios::InMemoryPortfolioStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid portfolio data: {0}")]
    InvalidData(String),
}

#[async_trait]
pub trait PortfolioStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Portfolio>, StoreError>;
    async fn list(&self) -> Result<Vec<Portfolio>, StoreError>;
}

/// Progress records and finished archives, keyed by export id.
#[async_trait]
pub trait ExportJobStore: Send + Sync {
    /// Starts (or restarts) a job record.
    async fn create(&self, export_id: &str, progress: ExportProgress) -> Result<(), StoreError>;

    /// Overwrites the record of a job still in progress. Returns `false` when the
    /// job is unknown or already terminal, so a finished job is never rewritten.
    async fn update(&self, export_id: &str, progress: ExportProgress) -> Result<bool, StoreError>;

    async fn get(&self, export_id: &str) -> Result<Option<ExportProgress>, StoreError>;

    async fn put_file(&self, export_id: &str, archive: Bytes) -> Result<(), StoreError>;

    async fn get_file(&self, export_id: &str) -> Result<Option<Bytes>, StoreError>;

    async fn remove_file(&self, export_id: &str) -> Result<(), StoreError>;

    /// Drops terminal jobs (and their archives) last updated at least `older_than` ago.
    async fn purge_finished(&self, older_than: Duration) -> Result<usize, StoreError>;
}
