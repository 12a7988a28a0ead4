use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};

use crate::export::ExportError;
use crate::models::{AssetKind, PortfolioAsset};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "avif"];
const FONT_EXTENSIONS: &[&str] = &["woff", "woff2", "ttf", "otf"];

/// A decoded asset ready to be written into the archive.
#[derive(Debug, Clone, PartialEq)]
pub struct BundledAsset {
    pub filename: String,
    pub kind: AssetKind,
    pub bytes: Vec<u8>,
}

impl BundledAsset {
    /// Archive path, e.g. `images/avatar.png`.
    pub fn archive_path(&self) -> String {
        format!("{}/{}", folder(self.kind), self.filename)
    }
}

pub fn folder(kind: AssetKind) -> &'static str {
    match kind {
        AssetKind::Image => "images",
        AssetKind::Font => "fonts",
    }
}

/// Collects a portfolio's uploaded images and fonts for bundling.
#[derive(Debug, Default)]
pub struct AssetManager {
    assets: Vec<BundledAsset>,
    optimize_images: bool,
}

impl AssetManager {
    pub fn new(optimize_images: bool) -> Self {
        Self {
            assets: Vec::new(),
            optimize_images,
        }
    }

    /// Decodes and adds `asset`. A second asset with the same folder and
    /// filename replaces the first.
    pub fn add(&mut self, asset: &PortfolioAsset) -> Result<(), ExportError> {
        let filename = sanitize_filename(&asset.filename, asset.kind)?;
        let bytes = decode(&asset.data).map_err(|reason| ExportError::Asset {
            filename: filename.clone(),
            reason,
        })?;

        if self.optimize_images && asset.kind == AssetKind::Image {
            debug!(%filename, "Image optimization requested; bundling original bytes");
        }

        let bundled = BundledAsset {
            filename,
            kind: asset.kind,
            bytes,
        };
        match self
            .assets
            .iter_mut()
            .find(|a| a.kind == bundled.kind && a.filename == bundled.filename)
        {
            Some(existing) => {
                warn!(path = %bundled.archive_path(), "Duplicate asset, replacing earlier upload");
                *existing = bundled;
            }
            None => self.assets.push(bundled),
        }
        Ok(())
    }

    pub fn add_all(&mut self, assets: &[PortfolioAsset]) -> Result<(), ExportError> {
        assets.iter().try_for_each(|asset| self.add(asset))
    }

    pub fn into_assets(self) -> Vec<BundledAsset> {
        self.assets
    }
}

/// Keeps only the final path component and checks the extension against `kind`.
fn sanitize_filename(raw: &str, kind: AssetKind) -> Result<String, ExportError> {
    let invalid = |reason: &str| ExportError::Asset {
        filename: raw.to_string(),
        reason: reason.to_string(),
    };

    let name = raw
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name.starts_with('.') || name.chars().any(char::is_control) {
        return Err(invalid("filename is empty or not allowed"));
    }

    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or_else(|| invalid("filename has no extension"))?;
    let (allowed, label) = match kind {
        AssetKind::Image => (IMAGE_EXTENSIONS, "image"),
        AssetKind::Font => (FONT_EXTENSIONS, "font"),
    };
    if !allowed.contains(&extension.as_str()) {
        return Err(invalid(&format!(
            "extension .{extension} is not allowed for {label} assets"
        )));
    }
    Ok(name.to_string())
}

/// Accepts bare base64 or a `data:<mime>;base64,` URL.
fn decode(data: &str) -> Result<Vec<u8>, String> {
    let payload = match data.trim().strip_prefix("data:") {
        Some(rest) => rest
            .split_once(";base64,")
            .map(|(_, b64)| b64)
            .ok_or_else(|| "data URL is not base64 encoded".to_string())?,
        None => data.trim(),
    };
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| format!("invalid base64 data: {e}"))?;
    if bytes.is_empty() {
        return Err("asset data is empty".to_string());
    }
    Ok(bytes)
}
