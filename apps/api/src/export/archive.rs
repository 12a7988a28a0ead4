use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::export::assets::BundledAsset;
use crate::export::job::ExportFormat;
use crate::export::ExportError;
use crate::render::document::STYLESHEET_PATH;

pub const INDEX_PATH: &str = "index.html";
pub const README_PATH: &str = "README.md";

/// Everything that goes into one export archive.
pub struct ArchiveInput<'a> {
    pub portfolio_title: &'a str,
    pub template_id: &'a str,
    pub format: ExportFormat,
    pub index_html: &'a str,
    /// Written to `styles/main.css` when present.
    pub stylesheet: Option<&'a str>,
    pub assets: &'a [BundledAsset],
    pub exported_at: DateTime<Utc>,
}

/// Builds the ZIP in memory: `index.html`, optional `styles/`, `images/` and
/// `fonts/` entries, and a generated `README.md`.
pub fn build_archive(input: &ArchiveInput<'_>) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut files = Vec::new();

    zip.start_file(INDEX_PATH, options)?;
    zip.write_all(input.index_html.as_bytes())?;
    files.push(INDEX_PATH.to_string());

    if let Some(css) = input.stylesheet {
        zip.start_file(STYLESHEET_PATH, options)?;
        zip.write_all(css.as_bytes())?;
        files.push(STYLESHEET_PATH.to_string());
    }

    for asset in input.assets {
        let path = asset.archive_path();
        zip.start_file(path.as_str(), options)?;
        zip.write_all(&asset.bytes)?;
        files.push(path);
    }

    files.push(README_PATH.to_string());
    zip.start_file(README_PATH, options)?;
    zip.write_all(readme(input, &files).as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

fn readme(input: &ArchiveInput<'_>, files: &[String]) -> String {
    let title = if input.portfolio_title.trim().is_empty() {
        "Portfolio"
    } else {
        input.portfolio_title
    };
    let mut out = format!(
        "# {title}\n\n\
         Exported portfolio website.\n\n\
         - Template: {}\n\
         - Export format: {}\n\
         - Exported at: {}\n\n\
         ## Files\n\n",
        input.template_id,
        input.format,
        input.exported_at.to_rfc3339(),
    );
    for file in files {
        out.push_str(&format!("- `{file}`\n"));
    }
    out.push_str(
        "\n## Usage\n\n\
         Open `index.html` in a browser, or upload the folder to any static host.\n",
    );
    out
}
