//! Template Registry: the static gallery of selectable portfolio templates.
//!
//! Reference data only. Built once on first access and shared for the process lifetime.

mod templates;

use std::sync::OnceLock;

use crate::models::portfolio::{ColorPalette, FontSet, Spacing, ThemeConfig};
use crate::models::template::{PortfolioTemplate, TemplateCategory};

pub const DEFAULT_TEMPLATE_ID: &str = "modern-professional";

static CATALOG: OnceLock<Vec<PortfolioTemplate>> = OnceLock::new();

pub fn all_templates() -> &'static [PortfolioTemplate] {
    CATALOG.get_or_init(templates::build_catalog)
}

pub fn find_template(id: &str) -> Option<&'static PortfolioTemplate> {
    all_templates().iter().find(|t| t.id == id)
}

pub fn templates_by_category(category: TemplateCategory) -> Vec<&'static PortfolioTemplate> {
    all_templates()
        .iter()
        .filter(|t| t.category == category)
        .collect()
}

pub fn default_template() -> &'static PortfolioTemplate {
    // The catalog is static and always contains the default id.
    find_template(DEFAULT_TEMPLATE_ID).unwrap_or(&all_templates()[0])
}

/// Neutral theme used when a template ships without color schemes.
pub fn base_theme(id: &str) -> ThemeConfig {
    ThemeConfig {
        id: id.to_string(),
        name: "Default".to_string(),
        colors: ColorPalette {
            primary: "#2563eb".to_string(),
            secondary: "#64748b".to_string(),
            accent: "#0ea5e9".to_string(),
            background: "#ffffff".to_string(),
            foreground: "#0f172a".to_string(),
            muted: "#f1f5f9".to_string(),
            border: "#e2e8f0".to_string(),
        },
        fonts: FontSet {
            heading: "Inter".to_string(),
            body: "Inter".to_string(),
            mono: "JetBrains Mono".to_string(),
        },
        spacing: Spacing::default(),
        border_radius: "0.5rem".to_string(),
    }
}
