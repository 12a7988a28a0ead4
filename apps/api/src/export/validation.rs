use crate::export::ExportError;
use crate::models::{Portfolio, SectionType};

/// Checks the minimum a portfolio needs before it can be exported.
/// Every violated rule is reported, not just the first.
pub fn validate_portfolio(portfolio: &Portfolio) -> Result<(), ExportError> {
    let mut errors = Vec::new();

    if portfolio.title.trim().is_empty() {
        errors.push("Portfolio title is required".to_string());
    }
    if portfolio.sections.is_empty() {
        errors.push("At least one section is required".to_string());
    }
    if !portfolio.has_section(SectionType::Hero) {
        errors.push("Hero section is required".to_string());
    }
    if !portfolio.sections.iter().any(|s| s.section_type.is_content()) {
        errors.push(
            "At least one content section (about, experience, projects, or skills) is required"
                .to_string(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ExportError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn portfolio(value: serde_json::Value) -> Portfolio {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_portfolio_passes() {
        let p = portfolio(json!({
            "id": "p1",
            "title": "Mine",
            "sections": [{ "type": "hero" }, { "type": "skills" }]
        }));
        assert!(validate_portfolio(&p).is_ok());
    }

    #[test]
    fn test_missing_hero_is_reported() {
        let p = portfolio(json!({
            "id": "p1",
            "title": "Mine",
            "sections": [{ "type": "about" }]
        }));
        let message = validate_portfolio(&p).unwrap_err().to_string();
        assert!(message.contains("Hero section is required"));
        assert!(!message.contains("content section"));
    }

    #[test]
    fn test_zero_sections_reports_every_violation() {
        let p = portfolio(json!({ "id": "p1", "title": "" }));
        let message = validate_portfolio(&p).unwrap_err().to_string();
        assert_eq!(
            message,
            "Portfolio validation failed: Portfolio title is required, \
             At least one section is required, Hero section is required, \
             At least one content section (about, experience, projects, or skills) is required"
        );
    }

    #[test]
    fn test_hidden_sections_still_count() {
        let p = portfolio(json!({
            "id": "p1",
            "title": "Mine",
            "sections": [
                { "type": "hero", "isVisible": false },
                { "type": "projects" }
            ]
        }));
        assert!(validate_portfolio(&p).is_ok());
    }
}
