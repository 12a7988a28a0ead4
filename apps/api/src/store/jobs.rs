use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::export::job::ExportProgress;
use crate::store::{ExportJobStore, StoreError};

#[derive(Debug, Clone)]
struct JobRecord {
    progress: ExportProgress,
    updated_at: Instant,
}

#[derive(Debug, Default)]
pub struct InMemoryExportJobStore {
    jobs: RwLock<HashMap<String, JobRecord>>,
    files: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryExportJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExportJobStore for InMemoryExportJobStore {
    async fn create(&self, export_id: &str, progress: ExportProgress) -> Result<(), StoreError> {
        self.files.write().await.remove(export_id);
        self.jobs.write().await.insert(
            export_id.to_string(),
            JobRecord {
                progress,
                updated_at: Instant::now(),
            },
        );
        Ok(())
    }

    async fn update(&self, export_id: &str, progress: ExportProgress) -> Result<bool, StoreError> {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(export_id) {
            Some(record) if !record.progress.is_finished() => {
                record.progress = progress;
                record.updated_at = Instant::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get(&self, export_id: &str) -> Result<Option<ExportProgress>, StoreError> {
        Ok(self
            .jobs
            .read()
            .await
            .get(export_id)
            .map(|r| r.progress.clone()))
    }

    async fn put_file(&self, export_id: &str, archive: Bytes) -> Result<(), StoreError> {
        self.files
            .write()
            .await
            .insert(export_id.to_string(), archive);
        Ok(())
    }

    async fn get_file(&self, export_id: &str) -> Result<Option<Bytes>, StoreError> {
        // Bytes clones share the buffer.
        Ok(self.files.read().await.get(export_id).cloned())
    }

    async fn remove_file(&self, export_id: &str) -> Result<(), StoreError> {
        self.files.write().await.remove(export_id);
        Ok(())
    }

    async fn purge_finished(&self, older_than: Duration) -> Result<usize, StoreError> {
        let mut jobs = self.jobs.write().await;
        let expired: Vec<String> = jobs
            .iter()
            .filter(|(_, r)| r.progress.is_finished() && r.updated_at.elapsed() >= older_than)
            .map(|(id, _)| id.clone())
            .collect();

        let mut files = self.files.write().await;
        for id in &expired {
            jobs.remove(id);
            files.remove(id);
        }
        Ok(expired.len())
    }
}
