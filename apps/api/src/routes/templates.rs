use axum::{
    extract::{Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::errors::AppError;
use crate::models::{PortfolioTemplate, TemplateCategory};

#[derive(Deserialize)]
pub struct TemplateQuery {
    pub category: Option<String>,
}

#[derive(Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<&'static PortfolioTemplate>,
}

/// GET /api/templates?category=…
pub async fn handle_list_templates(
    Query(params): Query<TemplateQuery>,
) -> Result<Json<TemplateListResponse>, AppError> {
    let templates = match params.category.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(raw) => {
            let category = TemplateCategory::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown template category '{raw}'")))?;
            catalog::templates_by_category(category)
        }
        None => catalog::all_templates().iter().collect(),
    };
    Ok(Json(TemplateListResponse { templates }))
}

/// GET /api/templates/:id
pub async fn handle_get_template(
    Path(id): Path<String>,
) -> Result<Json<&'static PortfolioTemplate>, AppError> {
    catalog::find_template(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Template not found".to_string()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{body_json, get, router_with, send};

    #[tokio::test]
    async fn test_lists_all_templates() {
        let router = router_with(json!([]));
        let body = body_json(send(&router, get("/api/templates")).await).await;
        let ids: Vec<&str> = body["templates"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec![
                "modern-professional",
                "creative-portfolio",
                "developer-focus",
                "minimal-clean",
                "academic-research"
            ]
        );
    }

    #[tokio::test]
    async fn test_filters_by_category() {
        let router = router_with(json!([]));
        let body = body_json(send(&router, get("/api/templates?category=developer")).await).await;
        let templates = body["templates"].as_array().unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0]["id"], "developer-focus");
        assert!(templates[0]["colorSchemes"].as_array().unwrap().len() >= 1);

        let response = send(&router, get("/api/templates?category=nope")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_template_by_id() {
        let router = router_with(json!([]));
        let response = send(&router, get("/api/templates/minimal-clean")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["category"], "minimal");

        let response = send(&router, get("/api/templates/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Template not found");
    }
}
