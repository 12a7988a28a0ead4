use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Renderer-ready view model
// ────────────────────────────────────────────────────────────────────────────

/// Normalized shape handed to the renderer. Required strings are always
/// populated; everything optional stays `Option` so markup can skip it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<SkillItem>,
    pub projects: Vec<ProjectItem>,
    pub social_links: Vec<SocialLinkItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl ExperienceItem {
    /// "2021 – Present", "2019 – 2021", or a single bound when only one is known.
    pub fn period(&self) -> Option<String> {
        let end = if self.current {
            Some("Present".to_string())
        } else {
            self.end_date.clone()
        };
        join_period(self.start_date.as_deref(), end.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub degree: String,
    pub institution: String,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

impl EducationItem {
    pub fn period(&self) -> Option<String> {
        join_period(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillItem {
    pub name: String,
    /// 0–100 when the source gave a number or a recognised label.
    pub level: Option<u8>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: Option<String>,
    pub github: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinkItem {
    pub platform: String,
    pub url: String,
}

fn join_period(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (Some(s), Some(e)) => Some(format!("{s} – {e}")),
        (Some(s), None) => Some(s.to_string()),
        (None, Some(e)) => Some(e.to_string()),
        (None, None) => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback preview data
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_NAME: &str = "John Doe";
pub const DEFAULT_TITLE: &str = "Full Stack Developer";
pub const DEFAULT_BIO: &str =
    "Passionate developer building thoughtful, accessible products for the web.";

/// Placeholder content substituted wherever a portfolio leaves a gap.
pub fn default_preview_data() -> ViewModel {
    ViewModel {
        personal_info: PersonalInfo {
            name: DEFAULT_NAME.to_string(),
            title: DEFAULT_TITLE.to_string(),
            bio: DEFAULT_BIO.to_string(),
            email: Some("john.doe@example.com".to_string()),
            phone: None,
            location: Some("San Francisco, CA".to_string()),
            website: None,
            avatar: None,
        },
        experience: vec![
            ExperienceItem {
                title: "Senior Software Engineer".to_string(),
                company: "Tech Corp".to_string(),
                start_date: Some("2021".to_string()),
                end_date: None,
                current: true,
                description: Some(
                    "Leading development of scalable web applications and mentoring engineers."
                        .to_string(),
                ),
                location: None,
            },
            ExperienceItem {
                title: "Software Engineer".to_string(),
                company: "StartupXYZ".to_string(),
                start_date: Some("2019".to_string()),
                end_date: Some("2021".to_string()),
                current: false,
                description: Some(
                    "Built customer-facing features across the full stack.".to_string(),
                ),
                location: None,
            },
        ],
        education: Vec::new(),
        skills: ["JavaScript", "TypeScript", "React", "Node.js", "Python", "SQL"]
            .iter()
            .zip([90u8, 85, 88, 80, 75, 70])
            .map(|(name, level)| SkillItem {
                name: name.to_string(),
                level: Some(level),
                category: None,
            })
            .collect(),
        projects: vec![
            ProjectItem {
                title: "E-commerce Platform".to_string(),
                description: "Full-stack storefront with payments and inventory management."
                    .to_string(),
                technologies: vec!["React".into(), "Node.js".into(), "PostgreSQL".into()],
                link: None,
                github: None,
                image: None,
            },
            ProjectItem {
                title: "Task Management App".to_string(),
                description: "Collaborative task tracker with real-time updates.".to_string(),
                technologies: vec!["TypeScript".into(), "WebSockets".into()],
                link: None,
                github: None,
                image: None,
            },
        ],
        social_links: vec![
            SocialLinkItem {
                platform: "GitHub".to_string(),
                url: "https://github.com".to_string(),
            },
            SocialLinkItem {
                platform: "LinkedIn".to_string(),
                url: "https://linkedin.com".to_string(),
            },
        ],
    }
}
