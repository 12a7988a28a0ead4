use std::sync::Arc;

use crate::config::ExportSettings;
use crate::export::ExportQueue;
use crate::store::{ExportJobStore, PortfolioStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub portfolios: Arc<dyn PortfolioStore>,
    /// Export progress records and finished archives.
    pub jobs: Arc<dyn ExportJobStore>,
    pub exports: ExportQueue,
}

impl AppState {
    /// Wires the stores to a freshly started export worker.
    pub fn new(
        export: &ExportSettings,
        portfolios: Arc<dyn PortfolioStore>,
        jobs: Arc<dyn ExportJobStore>,
    ) -> Self {
        let exports = ExportQueue::start(export, Arc::clone(&portfolios), Arc::clone(&jobs));
        Self {
            portfolios,
            jobs,
            exports,
        }
    }
}
