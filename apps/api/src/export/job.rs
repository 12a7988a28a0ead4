use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

pub const STARTING_MESSAGE: &str = "Starting export...";
pub const COMPLETED_MESSAGE: &str = "Export completed successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Processing,
    Completed,
    Error,
}

/// The record clients poll while an export runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportProgress {
    pub status: ExportStatus,
    pub progress: u8,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportProgress {
    pub fn processing(progress: u8, message: impl Into<String>) -> Self {
        Self {
            status: ExportStatus::Processing,
            progress,
            message: message.into(),
            download_url: None,
            error: None,
        }
    }

    pub fn completed(download_url: impl Into<String>) -> Self {
        Self {
            status: ExportStatus::Completed,
            progress: 100,
            message: COMPLETED_MESSAGE.to_string(),
            download_url: Some(download_url.into()),
            error: None,
        }
    }

    /// Terminal failure; `progress` stays at the last checkpoint reached.
    pub fn failed(progress: u8, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            status: ExportStatus::Error,
            progress,
            message: format!("Export failed: {error}"),
            download_url: None,
            error: Some(error),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status != ExportStatus::Processing
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Html,
    Pdf,
    Json,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub include_assets: bool,
    pub minify_code: bool,
    /// Accepted for compatibility; images are bundled unmodified.
    pub optimize_images: bool,
    /// Accepted for compatibility; no source maps are produced.
    pub include_source_maps: bool,
}

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub portfolio_id: String,
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub options: ExportOptions,
    /// Renders with this template instead of the portfolio's own theme.
    #[serde(default)]
    pub template_id: Option<String>,
}

/// A queued unit of work for the export worker.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub export_id: String,
    pub request: ExportRequest,
}

/// `export_{portfolioId}_{unix_millis}`
pub fn new_export_id(portfolio_id: &str) -> String {
    format!("export_{}_{}", portfolio_id, Utc::now().timestamp_millis())
}

/// Query-value escaping; export ids embed caller-supplied portfolio ids.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn download_url(export_id: &str) -> String {
    format!(
        "/api/generate?exportId={}&action=download",
        utf8_percent_encode(export_id, QUERY_VALUE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_defaults_to_html_without_options() {
        let req: ExportRequest = serde_json::from_value(json!({ "portfolioId": "p1" })).unwrap();
        assert_eq!(req.format, ExportFormat::Html);
        assert_eq!(req.options, ExportOptions::default());
        assert!(req.template_id.is_none());
    }

    #[test]
    fn test_request_reads_camel_case_options() {
        let req: ExportRequest = serde_json::from_value(json!({
            "portfolioId": "p1",
            "format": "pdf",
            "options": { "includeAssets": true, "minifyCode": true }
        }))
        .unwrap();
        assert_eq!(req.format, ExportFormat::Pdf);
        assert!(req.options.include_assets && req.options.minify_code);
        assert!(!req.options.optimize_images);
    }

    #[test]
    fn test_export_id_shape() {
        let id = new_export_id("p1");
        let millis = id.strip_prefix("export_p1_").unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn test_progress_json_omits_absent_fields() {
        let value = serde_json::to_value(ExportProgress::processing(0, STARTING_MESSAGE)).unwrap();
        assert_eq!(
            value,
            json!({ "status": "processing", "progress": 0, "message": "Starting export..." })
        );

        let done = serde_json::to_value(ExportProgress::completed(download_url("e1"))).unwrap();
        assert_eq!(done["downloadUrl"], "/api/generate?exportId=e1&action=download");
        assert_eq!(done["progress"], 100);
    }

    #[test]
    fn test_download_url_escapes_reserved_characters() {
        assert_eq!(
            download_url("export_a&b_1"),
            "/api/generate?exportId=export_a%26b_1&action=download"
        );
        assert_eq!(
            download_url("export_x y#z+%_1"),
            "/api/generate?exportId=export_x%20y%23z%2B%25_1&action=download"
        );
    }

    #[test]
    fn test_failed_keeps_checkpoint() {
        let failed = ExportProgress::failed(20, "Portfolio title is required");
        assert!(failed.is_finished());
        assert_eq!(failed.progress, 20);
        assert_eq!(failed.error.as_deref(), Some("Portfolio title is required"));
    }
}
