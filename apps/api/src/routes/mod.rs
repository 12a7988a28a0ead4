pub mod generate;
pub mod health;
pub mod preview;
pub mod templates;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Export API
        .route(
            "/api/generate",
            get(generate::handle_generate_status).post(generate::handle_generate),
        )
        // Preview
        .route("/api/preview/:portfolio_id", get(preview::handle_preview))
        // Template gallery
        .route("/api/templates", get(templates::handle_list_templates))
        .route("/api/templates/:id", get(templates::handle_get_template))
        .with_state(state)
}
