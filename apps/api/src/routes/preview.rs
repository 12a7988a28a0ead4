use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use crate::catalog;
use crate::errors::AppError;
use crate::render::{render_portfolio_page, StylesheetMode};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PreviewQuery {
    pub template: Option<String>,
}

/// GET /api/preview/:portfolio_id?template=…
/// Renders the portfolio as a complete, uncached HTML page.
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(portfolio_id): Path<String>,
    Query(params): Query<PreviewQuery>,
) -> Result<Response, AppError> {
    let portfolio = state
        .portfolios
        .get(&portfolio_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))?;

    let template_id = params
        .template
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| portfolio.theme.id.clone());
    let template = catalog::find_template(&template_id)
        .ok_or_else(|| AppError::NotFound("Template not found".to_string()))?;

    debug!(portfolio_id = %portfolio.id, template_id = template.id, "Rendering preview");
    let html = render_portfolio_page(&portfolio, template, StylesheetMode::Inline);

    let headers = [
        (header::CONTENT_TYPE, "text/html; charset=utf-8"),
        (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
        (header::PRAGMA, "no-cache"),
        (header::EXPIRES, "0"),
    ];
    Ok((headers, html).into_response())
}
