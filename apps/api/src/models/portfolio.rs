use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::catalog;

/// A user's portfolio: content sections, theme and publishing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub settings: Settings,
    /// Uploaded images and fonts bundled by the export.
    #[serde(default)]
    pub assets: Vec<PortfolioAsset>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Portfolio {
    /// Visible sections in ascending `order`. Ties keep their declaration order.
    pub fn visible_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().filter(|s| s.is_visible).collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    pub fn has_section(&self, kind: SectionType) -> bool {
        self.sections.iter().any(|s| s.section_type == kind)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Hero,
    About,
    Experience,
    Education,
    Skills,
    Projects,
    Contact,
}

impl SectionType {
    /// Sections that count as real content for export validation.
    pub fn is_content(self) -> bool {
        matches!(
            self,
            SectionType::About
                | SectionType::Experience
                | SectionType::Projects
                | SectionType::Skills
        )
    }
}

/// One content block. `content` shape depends on `section_type`; the extractor
/// reads it through alias chains rather than a fixed schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default = "new_section_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub content: Value,
}

fn new_section_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    pub id: String,
    pub name: String,
    pub colors: ColorPalette,
    pub fonts: FontSet,
    pub spacing: Spacing,
    pub border_radius: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        catalog::default_template().default_scheme()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub foreground: String,
    pub muted: String,
    pub border: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        catalog::default_template().default_scheme().colors
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontSet {
    pub heading: String,
    pub body: String,
    pub mono: String,
}

impl Default for FontSet {
    fn default() -> Self {
        catalog::default_template().default_scheme().fonts
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Spacing {
    pub section: String,
    pub container: String,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            section: "5rem".to_string(),
            container: "1.5rem".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub is_public: bool,
    pub seo: SeoSettings,
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeoSettings {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Font,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAsset {
    pub filename: String,
    pub kind: AssetKind,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Base64 payload.
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_portfolio_fills_defaults() {
        let portfolio: Portfolio = serde_json::from_value(json!({
            "id": "p1",
            "title": "Mine",
            "sections": [{ "type": "hero", "content": { "name": "Ann" } }]
        }))
        .unwrap();

        assert_eq!(portfolio.theme.id, catalog::DEFAULT_TEMPLATE_ID);
        assert!(portfolio.sections[0].is_visible);
        assert!(!portfolio.sections[0].id.is_empty());
        assert!(portfolio.assets.is_empty());
    }

    #[test]
    fn test_partial_theme_keeps_given_colors() {
        let theme: ThemeConfig = serde_json::from_value(json!({
            "id": "developer-focus",
            "colors": { "primary": "#00ff00" }
        }))
        .unwrap();
        assert_eq!(theme.id, "developer-focus");
        assert_eq!(theme.colors.primary, "#00ff00");
        assert!(!theme.colors.background.is_empty());
        assert!(!theme.fonts.heading.is_empty());
    }

    #[test]
    fn test_visible_sections_sorted_and_filtered() {
        let portfolio: Portfolio = serde_json::from_value(json!({
            "id": "p1",
            "sections": [
                { "type": "projects", "order": 3 },
                { "type": "hero", "order": 0 },
                { "type": "about", "order": 1, "isVisible": false }
            ]
        }))
        .unwrap();
        let kinds: Vec<SectionType> = portfolio
            .visible_sections()
            .iter()
            .map(|s| s.section_type)
            .collect();
        assert_eq!(kinds, vec![SectionType::Hero, SectionType::Projects]);
    }
}
