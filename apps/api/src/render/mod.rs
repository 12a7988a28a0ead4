//! Server-side portfolio rendering: view-model extraction, per-template layouts,
//! the document wrapper and the minifier.

pub mod document;
pub mod extractor;
pub mod html;
pub mod layout;
pub mod minify;
pub mod sections;
pub mod view_model;

use crate::models::{Portfolio, PortfolioTemplate};

pub use document::{render_document, theme_stylesheet, DocumentParts, StylesheetMode};
pub use extractor::extract_view_model;
pub use minify::minify_html;
pub use sections::generate_template_html;

/// Full HTML page for `portfolio` rendered with `template`.
/// Shared by the preview endpoint and the export pipeline.
pub fn render_portfolio_page(
    portfolio: &Portfolio,
    template: &PortfolioTemplate,
    stylesheet: StylesheetMode,
) -> String {
    let vm = extract_view_model(portfolio);
    let body = generate_template_html(template.id, &vm);
    let theme = template.theme_for(portfolio);
    render_document(&DocumentParts::for_portfolio(
        portfolio, &theme, &body, stylesheet,
    ))
}
