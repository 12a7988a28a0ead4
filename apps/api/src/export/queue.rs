//! Background export worker.
//!
//! `POST /api/generate` pushes jobs onto a bounded channel. A single dispatcher
//! drains it and runs up to `workers` exports at once, each under the optional
//! per-job deadline. An optional sweeper purges finished jobs past retention.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::ExportSettings;
use crate::export::job::ExportJob;
use crate::export::pipeline::{fail_export, run_export};
use crate::export::ExportError;
use crate::store::{ExportJobStore, PortfolioStore};

const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Handle for submitting export jobs. Cheap to clone.
#[derive(Clone)]
pub struct ExportQueue {
    sender: mpsc::Sender<ExportJob>,
}

impl ExportQueue {
    /// Spawns the dispatcher (and the sweeper when retention is set).
    /// Must be called from within a Tokio runtime.
    pub fn start(
        settings: &ExportSettings,
        portfolios: Arc<dyn PortfolioStore>,
        jobs: Arc<dyn ExportJobStore>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(settings.queue_capacity.max(1));
        let permits = Arc::new(Semaphore::new(settings.workers.max(1)));

        tokio::spawn(dispatch(
            receiver,
            permits,
            settings.timeout,
            portfolios,
            Arc::clone(&jobs),
        ));
        if let Some(retention) = settings.retention {
            tokio::spawn(sweep(jobs, retention));
        }

        info!(
            workers = settings.workers,
            capacity = settings.queue_capacity,
            "Export worker started"
        );
        Self { sender }
    }

    /// Queues `job` without waiting. Fails when the queue is full or the worker is gone.
    pub fn enqueue(&self, job: ExportJob) -> Result<(), ExportError> {
        self.sender.try_send(job).map_err(|e| match e {
            TrySendError::Full(_) => ExportError::QueueFull,
            TrySendError::Closed(_) => ExportError::QueueClosed,
        })
    }
}

async fn dispatch(
    mut receiver: mpsc::Receiver<ExportJob>,
    permits: Arc<Semaphore>,
    timeout: Option<Duration>,
    portfolios: Arc<dyn PortfolioStore>,
    jobs: Arc<dyn ExportJobStore>,
) {
    while let Some(job) = receiver.recv().await {
        let permit = match Arc::clone(&permits).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => break,
        };
        let portfolios = Arc::clone(&portfolios);
        let jobs = Arc::clone(&jobs);
        tokio::spawn(async move {
            process(portfolios.as_ref(), jobs.as_ref(), &job, timeout).await;
            drop(permit);
        });
    }
    info!("Export queue closed, dispatcher stopping");
}

/// Runs one job to a terminal state.
pub async fn process(
    portfolios: &dyn PortfolioStore,
    jobs: &dyn ExportJobStore,
    job: &ExportJob,
    timeout: Option<Duration>,
) {
    let export_id = job.export_id.as_str();
    info!(export_id, portfolio_id = %job.request.portfolio_id, "Export started");

    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, run_export(portfolios, jobs, job))
            .await
            .unwrap_or_else(|_| Err(ExportError::TimedOut(limit.as_secs()))),
        None => run_export(portfolios, jobs, job).await,
    };

    match result {
        Ok(()) => info!(export_id, "Export completed"),
        Err(e) => {
            warn!(export_id, error = %e, "Export failed");
            fail_export(jobs, export_id, &e).await;
        }
    }
}

async fn sweep(jobs: Arc<dyn ExportJobStore>, retention: Duration) {
    let mut ticker = tokio::time::interval(retention.min(MAX_SWEEP_INTERVAL));
    loop {
        ticker.tick().await;
        match jobs.purge_finished(retention).await {
            Ok(0) => {}
            Ok(purged) => info!(purged, "Purged finished export jobs"),
            Err(e) => error!(error = %e, "Export retention sweep failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::job::{ExportProgress, ExportRequest, ExportStatus};
    use crate::models::Portfolio;
    use crate::store::{InMemoryExportJobStore, StoreError};
    use async_trait::async_trait;

    /// Never answers before the test deadline.
    struct SlowStore;

    #[async_trait]
    impl PortfolioStore for SlowStore {
        async fn get(&self, _id: &str) -> Result<Option<Portfolio>, StoreError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }

        async fn list(&self) -> Result<Vec<Portfolio>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn job(id: &str) -> ExportJob {
        ExportJob {
            export_id: id.to_string(),
            request: ExportRequest {
                portfolio_id: "p1".to_string(),
                ..ExportRequest::default()
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_records_error_at_last_checkpoint() {
        let jobs = InMemoryExportJobStore::new();
        jobs.create("e1", ExportProgress::processing(0, "Starting export..."))
            .await
            .unwrap();

        process(&SlowStore, &jobs, &job("e1"), Some(Duration::from_secs(5))).await;

        let progress = jobs.get("e1").await.unwrap().unwrap();
        assert_eq!(progress.status, ExportStatus::Error);
        assert_eq!(progress.progress, 10);
        assert_eq!(progress.error.as_deref(), Some("Export timed out after 5s"));
    }

    #[tokio::test]
    async fn test_enqueue_reports_closed_queue() {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);
        let queue = ExportQueue { sender };
        assert!(matches!(queue.enqueue(job("e1")), Err(ExportError::QueueClosed)));
    }

    #[tokio::test]
    async fn test_enqueue_reports_full_queue() {
        let (sender, _receiver) = mpsc::channel(1);
        let queue = ExportQueue { sender };
        queue.enqueue(job("e1")).unwrap();
        assert!(matches!(queue.enqueue(job("e2")), Err(ExportError::QueueFull)));
    }

    #[tokio::test]
    async fn test_started_queue_processes_jobs() {
        let jobs: Arc<dyn ExportJobStore> = Arc::new(InMemoryExportJobStore::new());
        let portfolios: Arc<dyn PortfolioStore> = Arc::new(
            crate::store::InMemoryPortfolioStore::from_json("[]").unwrap(),
        );
        let queue = ExportQueue::start(&ExportSettings::default(), portfolios, Arc::clone(&jobs));

        jobs.create("e1", ExportProgress::processing(0, "Starting export..."))
            .await
            .unwrap();
        queue.enqueue(job("e1")).unwrap();

        let mut progress = None;
        for _ in 0..100 {
            let current = jobs.get("e1").await.unwrap().unwrap();
            if current.is_finished() {
                progress = Some(current);
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let progress = progress.expect("export did not finish");
        assert_eq!(progress.error.as_deref(), Some("Portfolio not found"));
    }
}
