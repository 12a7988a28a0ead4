//! One export job, start to finish. Each checkpoint overwrites the job's
//! progress record; the first error ends the job at the checkpoint it reached.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, warn};

use crate::catalog;
use crate::export::archive::{build_archive, ArchiveInput};
use crate::export::assets::{AssetManager, BundledAsset};
use crate::export::job::{download_url, ExportFormat, ExportJob, ExportProgress};
use crate::export::validation::validate_portfolio;
use crate::export::ExportError;
use crate::models::{Portfolio, PortfolioTemplate};
use crate::render::{minify_html, render_portfolio_page, theme_stylesheet, StylesheetMode};
use crate::store::{ExportJobStore, PortfolioStore};

pub const LOADING: (u8, &str) = (10, "Loading portfolio data...");
pub const VALIDATING: (u8, &str) = (20, "Validating portfolio...");
pub const GENERATING: (u8, &str) = (40, "Generating HTML...");
pub const PROCESSING_ASSETS: (u8, &str) = (60, "Processing assets...");
pub const ARCHIVING: (u8, &str) = (80, "Creating archive...");

/// Runs every checkpoint for `job` and stores the finished archive.
/// The caller records a returned error as the job's terminal state.
pub async fn run_export(
    portfolios: &dyn PortfolioStore,
    jobs: &dyn ExportJobStore,
    job: &ExportJob,
) -> Result<(), ExportError> {
    let export_id = job.export_id.as_str();
    let request = &job.request;

    checkpoint(jobs, export_id, LOADING).await?;
    let portfolio = portfolios
        .get(&request.portfolio_id)
        .await?
        .ok_or(ExportError::PortfolioNotFound)?;

    checkpoint(jobs, export_id, VALIDATING).await?;
    validate_portfolio(&portfolio)?;

    checkpoint(jobs, export_id, GENERATING).await?;
    if request.format != ExportFormat::Html {
        debug!(export_id, format = %request.format, "Only the HTML bundle is produced for this format");
    }
    let template = resolve_template(request.template_id.as_deref(), &portfolio);
    let portfolio = Arc::new(portfolio);
    let options = request.options.clone();
    let (index_html, stylesheet) = {
        let portfolio = Arc::clone(&portfolio);
        blocking(move || {
            Ok(render_index(
                &portfolio,
                template,
                options.include_assets,
                options.minify_code,
            ))
        })
        .await?
    };

    checkpoint(jobs, export_id, PROCESSING_ASSETS).await?;
    let assets: Vec<BundledAsset> = if request.options.include_assets {
        let portfolio = Arc::clone(&portfolio);
        let optimize = request.options.optimize_images;
        blocking(move || {
            let mut manager = AssetManager::new(optimize);
            manager.add_all(&portfolio.assets)?;
            Ok(manager.into_assets())
        })
        .await?
    } else {
        Vec::new()
    };
    debug!(export_id, assets = assets.len(), "Assets collected");

    checkpoint(jobs, export_id, ARCHIVING).await?;
    let format = request.format;
    let archive = blocking(move || {
        build_archive(&ArchiveInput {
            portfolio_title: &portfolio.title,
            template_id: template.id,
            format,
            index_html: &index_html,
            stylesheet: stylesheet.as_deref(),
            assets: &assets,
            exported_at: Utc::now(),
        })
    })
    .await?;

    // Stored before completion so a completed job is always downloadable.
    jobs.put_file(export_id, Bytes::from(archive)).await?;
    if !jobs
        .update(export_id, ExportProgress::completed(download_url(export_id)))
        .await?
    {
        jobs.remove_file(export_id).await?;
    }
    Ok(())
}

/// Records `error` as the terminal state, keeping the last checkpoint's progress.
pub async fn fail_export(jobs: &dyn ExportJobStore, export_id: &str, error: &ExportError) {
    let reached = match jobs.get(export_id).await {
        Ok(Some(progress)) => progress.progress,
        Ok(None) => 0,
        Err(e) => {
            warn!(export_id, error = %e, "Could not read export progress");
            0
        }
    };
    match jobs
        .update(export_id, ExportProgress::failed(reached, error.to_string()))
        .await
    {
        // A job cut off after its archive was stored must not stay downloadable.
        Ok(true) => {
            if let Err(e) = jobs.remove_file(export_id).await {
                warn!(export_id, error = %e, "Could not drop archive of failed export");
            }
        }
        Ok(false) => {}
        Err(e) => warn!(export_id, error = %e, "Could not record export failure"),
    }
}

async fn checkpoint(
    jobs: &dyn ExportJobStore,
    export_id: &str,
    (progress, message): (u8, &str),
) -> Result<(), ExportError> {
    debug!(export_id, progress, "{message}");
    jobs.update(export_id, ExportProgress::processing(progress, message))
        .await?;
    Ok(())
}

/// The requested template, else the portfolio's, else the default.
fn resolve_template(requested: Option<&str>, portfolio: &Portfolio) -> &'static PortfolioTemplate {
    let id = requested
        .filter(|id| !id.trim().is_empty())
        .unwrap_or(&portfolio.theme.id);
    catalog::find_template(id).unwrap_or_else(|| {
        warn!(template_id = id, "Unknown template, exporting with the default");
        catalog::default_template()
    })
}

/// `index.html` plus the stylesheet to ship beside it when assets are bundled.
fn render_index(
    portfolio: &Portfolio,
    template: &PortfolioTemplate,
    include_assets: bool,
    minify: bool,
) -> (String, Option<String>) {
    let mode = if include_assets {
        StylesheetMode::Linked
    } else {
        StylesheetMode::Inline
    };
    let page = render_portfolio_page(portfolio, template, mode);
    let page = if minify { minify_html(&page) } else { page };
    let stylesheet = include_assets.then(|| theme_stylesheet(&template.theme_for(portfolio)));
    (page, stylesheet)
}

async fn blocking<T, F>(work: F) -> Result<T, ExportError>
where
    F: FnOnce() -> Result<T, ExportError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ExportError::Task(e.to_string()))?
}
