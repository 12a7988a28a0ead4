pub mod portfolio;
pub mod template;

pub use portfolio::{AssetKind, Portfolio, PortfolioAsset, SectionType};
pub use template::{PortfolioTemplate, TemplateCategory};
