use serde::{Deserialize, Serialize};

use crate::models::portfolio::{Portfolio, ThemeConfig};

/// Static catalog entry describing a selectable visual template.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: TemplateCategory,
    pub features: Vec<&'static str>,
    pub layout: LayoutConfig,
    pub typography: TypographyConfig,
    pub components: ComponentConfig,
    pub color_schemes: Vec<ThemeConfig>,
}

impl PortfolioTemplate {
    /// First color scheme, used whenever a portfolio has not picked one.
    pub fn default_scheme(&self) -> ThemeConfig {
        self.color_schemes
            .first()
            .cloned()
            .unwrap_or_else(|| crate::catalog::base_theme(self.id))
    }

    /// The portfolio's own theme when it was made for this template, otherwise
    /// this template's default scheme.
    pub fn theme_for(&self, portfolio: &Portfolio) -> ThemeConfig {
        if portfolio.theme.id == self.id {
            portfolio.theme.clone()
        } else {
            self.default_scheme()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Business,
    Creative,
    Developer,
    Minimal,
    Academic,
}

impl TemplateCategory {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "business" => Some(Self::Business),
            "creative" => Some(Self::Creative),
            "developer" => Some(Self::Developer),
            "minimal" => Some(Self::Minimal),
            "academic" => Some(Self::Academic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub hero_style: &'static str,
    pub navigation: &'static str,
    pub max_width: &'static str,
    pub columns: u8,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypographyConfig {
    pub heading: &'static str,
    pub body: &'static str,
    pub mono: &'static str,
    pub scale: f32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentConfig {
    pub skill_style: &'static str,
    pub project_style: &'static str,
    pub experience_style: &'static str,
}
