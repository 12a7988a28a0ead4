use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::export::job::{new_export_id, STARTING_MESSAGE};
use crate::export::pipeline::fail_export;
use crate::export::{ExportJob, ExportProgress, ExportRequest};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuery {
    pub export_id: Option<String>,
    pub action: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub export_id: String,
    pub message: String,
}

/// POST /api/generate
/// Seeds the job record and hands the export to the background worker.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if req.portfolio_id.trim().is_empty() {
        return Err(AppError::Validation("portfolioId is required".to_string()));
    }

    let export_id = new_export_id(&req.portfolio_id);
    state
        .jobs
        .create(&export_id, ExportProgress::processing(0, STARTING_MESSAGE))
        .await?;

    info!(
        export_id = %export_id,
        portfolio_id = %req.portfolio_id,
        format = %req.format,
        "Export requested"
    );
    let job = ExportJob {
        export_id: export_id.clone(),
        request: req,
    };
    if let Err(e) = state.exports.enqueue(job) {
        fail_export(state.jobs.as_ref(), &export_id, &e).await;
        return Err(e.into());
    }

    Ok(Json(GenerateResponse {
        export_id,
        message: "Export started".to_string(),
    }))
}

/// GET /api/generate?exportId=…[&action=download]
/// `exportId` is a query value, so clients percent-encode it (as `downloadUrl` does).
pub async fn handle_generate_status(
    State(state): State<AppState>,
    Query(params): Query<GenerateQuery>,
) -> Result<Response, AppError> {
    let export_id = params
        .export_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("exportId is required".to_string()))?;

    if params.action.as_deref() == Some("download") {
        let archive = state
            .jobs
            .get_file(&export_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Export file not found".to_string()))?;
        let headers = [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"portfolio-{}.zip\"",
                    attachment_name(&export_id)
                ),
            ),
        ];
        return Ok((headers, archive).into_response());
    }

    let progress = state
        .jobs
        .get(&export_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Export not found".to_string()))?;
    Ok(Json(progress).into_response())
}

/// Export ids carry portfolio ids verbatim; keep the header value plain.
fn attachment_name(export_id: &str) -> String {
    export_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum::Router;
    use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
    use serde_json::{json, Value};

    use crate::routes::test_support::{body_bytes, body_json, get, post_json, router_with, send};

    fn jane_doe() -> Value {
        json!([{
            "id": "jane",
            "title": "Jane Doe's Portfolio",
            "sections": [
                { "type": "hero", "content": { "name": "Jane Doe", "title": "Designer" } },
                { "type": "projects", "content": { "items": [{ "name": "X", "description": "Y" }] } }
            ],
            "assets": [{ "filename": "uploads/me.png", "kind": "image", "data": "aGVsbG8=" }]
        }])
    }

    async fn start_export(router: &Router, body: Value) -> String {
        let response = send(router, post_json("/api/generate", body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        body["exportId"].as_str().unwrap().to_string()
    }

    async fn wait_until_finished(router: &Router, export_id: &str) -> Value {
        let encoded = utf8_percent_encode(export_id, NON_ALPHANUMERIC);
        for _ in 0..200 {
            let response = send(router, get(&format!("/api/generate?exportId={encoded}"))).await;
            assert_eq!(response.status(), StatusCode::OK);
            let progress = body_json(response).await;
            if progress["status"] != "processing" {
                return progress;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("export {export_id} never finished");
    }

    #[tokio::test]
    async fn test_jane_doe_export_downloads_zip_with_name() {
        let router = router_with(jane_doe());
        let export_id = start_export(
            &router,
            json!({
                "portfolioId": "jane",
                "format": "html",
                "options": { "includeAssets": false, "minifyCode": false }
            }),
        )
        .await;
        assert!(export_id.starts_with("export_jane_"));

        let progress = wait_until_finished(&router, &export_id).await;
        assert_eq!(progress["status"], "completed");
        assert_eq!(progress["progress"], 100);
        let download_url = progress["downloadUrl"].as_str().unwrap().to_string();

        let response = send(&router, get(&download_url)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/zip");
        assert_eq!(
            response.headers()["content-disposition"],
            format!("attachment; filename=\"portfolio-{export_id}.zip\"").as_str()
        );

        let bytes = body_bytes(response).await;
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut index = String::new();
        archive
            .by_name("index.html")
            .unwrap()
            .read_to_string(&mut index)
            .unwrap();
        assert!(index.contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_include_assets_adds_image_folder() {
        let router = router_with(jane_doe());
        let export_id = start_export(
            &router,
            json!({ "portfolioId": "jane", "options": { "includeAssets": true } }),
        )
        .await;
        let progress = wait_until_finished(&router, &export_id).await;
        assert_eq!(progress["status"], "completed");

        let response = send(
            &router,
            get(&format!("/api/generate?exportId={export_id}&action=download")),
        )
        .await;
        let bytes = body_bytes(response).await;
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"images/me.png"));
        assert!(names.contains(&"styles/main.css"));
    }

    #[tokio::test]
    async fn test_reserved_characters_in_portfolio_id_survive_download_url() {
        let mut portfolios = jane_doe();
        portfolios[0]["id"] = json!("a&b");
        let router = router_with(portfolios);
        let export_id = start_export(&router, json!({ "portfolioId": "a&b" })).await;
        assert!(export_id.starts_with("export_a&b_"));

        let progress = wait_until_finished(&router, &export_id).await;
        assert_eq!(progress["status"], "completed");
        let download_url = progress["downloadUrl"].as_str().unwrap().to_string();
        assert!(download_url.starts_with("/api/generate?exportId=export_a%26b_"));

        let response = send(&router, get(&download_url)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()["content-disposition"]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"portfolio-export_a_b_"));
        assert!(!body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_portfolio_ends_in_error_status() {
        let router = router_with(jane_doe());
        let export_id = start_export(&router, json!({ "portfolioId": "ghost" })).await;
        let progress = wait_until_finished(&router, &export_id).await;
        assert_eq!(progress["status"], "error");
        assert_eq!(progress["error"], "Portfolio not found");
        assert_eq!(progress["progress"], 10);
    }

    #[tokio::test]
    async fn test_unknown_export_is_404() {
        let router = router_with(json!([]));
        let response = send(&router, get("/api/generate?exportId=doesnotexist")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Export not found");

        let response = send(
            &router,
            get("/api/generate?exportId=doesnotexist&action=download"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Export file not found");
    }

    #[tokio::test]
    async fn test_missing_ids_are_bad_requests() {
        let router = router_with(json!([]));
        let response = send(&router, get("/api/generate")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&router, post_json("/api/generate", json!({ "portfolioId": "" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}
