//! Data Extractor: maps free-form section content onto the renderer's view model.
//!
//! Section content has no fixed schema, so every field is read through an alias
//! chain where the first non-empty match wins. Gaps are filled from
//! `default_preview_data()`; extraction never fails.

use serde_json::Value;

use crate::models::portfolio::{Portfolio, SectionType};
use crate::render::view_model::{
    default_preview_data, EducationItem, ExperienceItem, PersonalInfo, ProjectItem, SkillItem,
    SocialLinkItem, ViewModel,
};

const ITEM_KEYS: &[&str] = &["items", "entries"];

#[derive(Default)]
struct PartialInfo {
    name: Option<String>,
    title: Option<String>,
    bio: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    location: Option<String>,
    website: Option<String>,
    avatar: Option<String>,
}

/// Builds the view model for `portfolio`. Pure: the same portfolio always yields
/// an identical view model.
pub fn extract_view_model(portfolio: &Portfolio) -> ViewModel {
    let mut info = PartialInfo::default();
    let mut experience = Vec::new();
    let mut education = Vec::new();
    let mut skills = Vec::new();
    let mut projects = Vec::new();
    let mut social_links = Vec::new();

    for section in portfolio.visible_sections() {
        let content = &section.content;
        match section.section_type {
            SectionType::Hero => {
                fill(&mut info.name, first_str(content, &["name", "fullName"]));
                fill(&mut info.title, first_str(content, &["title", "headline", "role"]));
                fill(
                    &mut info.bio,
                    first_str(content, &["bio", "summary", "subtitle", "description"]),
                );
                fill(&mut info.avatar, first_str(content, &["avatar", "image", "photo"]));
                fill(&mut info.location, first_str(content, &["location"]));
                fill(&mut info.email, first_str(content, &["email"]));
            }
            SectionType::About => {
                fill(
                    &mut info.bio,
                    first_str(content, &["bio", "content", "text", "description"]),
                );
                fill(&mut info.location, first_str(content, &["location"]));
                fill(&mut info.email, first_str(content, &["email"]));
            }
            SectionType::Experience => {
                experience.extend(
                    items(content, &["experiences"])
                        .iter()
                        .filter_map(experience_item),
                );
            }
            SectionType::Education => {
                education.extend(
                    items(content, &["education"])
                        .iter()
                        .filter_map(education_item),
                );
            }
            SectionType::Projects => {
                projects.extend(items(content, &["projects"]).iter().filter_map(project_item));
            }
            SectionType::Skills => {
                skills.extend(skill_items(content));
            }
            SectionType::Contact => {
                fill(&mut info.email, first_str(content, &["email"]));
                fill(&mut info.phone, first_str(content, &["phone", "telephone"]));
                fill(&mut info.location, first_str(content, &["location", "address"]));
                fill(&mut info.website, first_str(content, &["website", "site"]));
                social_links.extend(social_items(content));
            }
        }
    }

    social_links.extend(
        portfolio
            .settings
            .social_links
            .iter()
            .filter(|link| !link.url.trim().is_empty())
            .map(|link| SocialLinkItem {
                platform: link.platform.clone(),
                url: link.url.clone(),
            }),
    );
    dedup_by_url(&mut social_links);

    let defaults = default_preview_data();
    let personal_info = finish_info(info, defaults.personal_info);

    ViewModel {
        personal_info,
        experience: or_default(experience, defaults.experience),
        education,
        skills: or_default(skills, defaults.skills),
        projects: or_default(projects, defaults.projects),
        social_links: or_default(social_links, defaults.social_links),
    }
}

/// Without a name the whole identity block falls back to the placeholder person;
/// with one, only the required strings are guaranteed (possibly empty).
fn finish_info(info: PartialInfo, defaults: PersonalInfo) -> PersonalInfo {
    match info.name {
        Some(name) => PersonalInfo {
            name,
            title: info.title.unwrap_or_default(),
            bio: info.bio.unwrap_or_default(),
            email: info.email,
            phone: info.phone,
            location: info.location,
            website: info.website,
            avatar: info.avatar,
        },
        None => PersonalInfo {
            name: defaults.name,
            title: info.title.unwrap_or(defaults.title),
            bio: info.bio.unwrap_or(defaults.bio),
            email: info.email.or(defaults.email),
            phone: info.phone.or(defaults.phone),
            location: info.location.or(defaults.location),
            website: info.website.or(defaults.website),
            avatar: info.avatar.or(defaults.avatar),
        },
    }
}

fn experience_item(value: &Value) -> Option<ExperienceItem> {
    let title = first_str(value, &["title", "position", "role"]);
    let company = first_str(value, &["company", "organization", "employer"]);
    if title.is_none() && company.is_none() {
        return None;
    }
    Some(ExperienceItem {
        title: title.unwrap_or_default(),
        company: company.unwrap_or_default(),
        start_date: first_str(value, &["startDate", "start", "from"]),
        end_date: first_str(value, &["endDate", "end", "to"]),
        current: value.get("current").and_then(Value::as_bool).unwrap_or(false),
        description: first_str(value, &["description", "summary"]),
        location: first_str(value, &["location"]),
    })
}

fn education_item(value: &Value) -> Option<EducationItem> {
    let degree = first_str(value, &["degree", "title"]);
    let institution = first_str(value, &["institution", "school", "university"]);
    if degree.is_none() && institution.is_none() {
        return None;
    }
    Some(EducationItem {
        degree: degree.unwrap_or_default(),
        institution: institution.unwrap_or_default(),
        field: first_str(value, &["field", "fieldOfStudy", "major"]),
        start_date: first_str(value, &["startDate", "start", "from"]),
        end_date: first_str(value, &["endDate", "end", "to", "graduationDate"]),
        description: first_str(value, &["description", "summary"]),
    })
}

fn project_item(value: &Value) -> Option<ProjectItem> {
    let title = first_str(value, &["title", "name"])?;
    Some(ProjectItem {
        title,
        description: first_str(value, &["description", "summary"]).unwrap_or_default(),
        technologies: string_list(value, &["technologies", "tech", "tags", "stack"]),
        link: first_str(value, &["link", "url", "liveUrl", "demoUrl"]),
        github: first_str(value, &["github", "githubUrl", "repository", "repo"]),
        image: first_str(value, &["image", "thumbnail"]),
    })
}

fn skill_items(content: &Value) -> Vec<SkillItem> {
    let mut skills: Vec<SkillItem> = items(content, &["skills"])
        .iter()
        .filter_map(|v| skill_item(v, None))
        .collect();

    if let Some(categories) = content.get("categories").and_then(Value::as_array) {
        for category in categories {
            let name = first_str(category, &["name", "title", "category"]);
            let entries = category
                .get("skills")
                .or_else(|| category.get("items"))
                .and_then(Value::as_array);
            for entry in entries.into_iter().flatten() {
                skills.extend(skill_item(entry, name.as_deref()));
            }
        }
    }

    skills
}

fn skill_item(value: &Value, category: Option<&str>) -> Option<SkillItem> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(SkillItem {
            name: s.trim().to_string(),
            level: None,
            category: category.map(str::to_string),
        }),
        Value::Object(_) => Some(SkillItem {
            name: first_str(value, &["name", "skill"])?,
            level: ["level", "proficiency"]
                .iter()
                .find_map(|k| value.get(*k).and_then(parse_level)),
            category: first_str(value, &["category"]).or_else(|| category.map(str::to_string)),
        }),
        _ => None,
    }
}

/// Accepts 0–100, a 1–5 rating, a numeric string, or a proficiency label.
fn parse_level(value: &Value) -> Option<u8> {
    let numeric = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "expert" | "master" => return Some(95),
            "advanced" => return Some(85),
            "proficient" | "intermediate" => return Some(65),
            "beginner" | "basic" | "novice" => return Some(40),
            other => other.trim_end_matches('%').parse::<f64>().ok(),
        },
        _ => None,
    }?;
    if !numeric.is_finite() || numeric < 0.0 {
        return None;
    }
    let scaled = if numeric <= 5.0 { numeric * 20.0 } else { numeric };
    Some(scaled.min(100.0).round() as u8)
}

fn social_items(content: &Value) -> Vec<SocialLinkItem> {
    ["socialLinks", "social", "links"]
        .iter()
        .find_map(|k| content.get(*k).and_then(Value::as_array))
        .map(|links| {
            links
                .iter()
                .filter_map(|link| {
                    Some(SocialLinkItem {
                        platform: first_str(link, &["platform", "name", "label"])
                            .unwrap_or_else(|| "Link".to_string()),
                        url: first_str(link, &["url", "href", "link"])?,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// JSON helpers
// ────────────────────────────────────────────────────────────────────────────

fn fill(slot: &mut Option<String>, candidate: Option<String>) {
    if slot.is_none() {
        *slot = candidate;
    }
}

fn or_default<T>(found: Vec<T>, fallback: Vec<T>) -> Vec<T> {
    if found.is_empty() {
        fallback
    } else {
        found
    }
}

fn first_str(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// The item array of a list section: the content itself when it is an array,
/// else the first array found under the generic or section-specific keys.
fn items<'a>(content: &'a Value, extra_keys: &[&str]) -> &'a [Value] {
    if let Value::Array(list) = content {
        return list;
    }
    ITEM_KEYS
        .iter()
        .chain(extra_keys)
        .find_map(|k| content.get(*k).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn string_list(value: &Value, keys: &[&str]) -> Vec<String> {
    for key in keys {
        match value.get(*key) {
            Some(Value::Array(list)) => {
                return list
                    .iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s.trim().to_string()),
                        other => first_str(other, &["name", "label"]),
                    })
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            Some(Value::String(s)) if !s.trim().is_empty() => {
                return s
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect();
            }
            _ => {}
        }
    }
    Vec::new()
}

fn dedup_by_url(links: &mut Vec<SocialLinkItem>) {
    let mut seen = std::collections::HashSet::new();
    links.retain(|link| seen.insert(link.url.trim().to_ascii_lowercase()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::view_model::{DEFAULT_NAME, DEFAULT_TITLE};
    use serde_json::json;

    fn portfolio(sections: Value) -> Portfolio {
        serde_json::from_value(json!({
            "id": "p1",
            "title": "Test",
            "sections": sections,
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_portfolio_gets_default_person() {
        let vm = extract_view_model(&portfolio(json!([])));
        assert_eq!(vm.personal_info.name, DEFAULT_NAME);
        assert_eq!(vm.personal_info.title, DEFAULT_TITLE);
        assert!(!vm.experience.is_empty());
        assert!(!vm.projects.is_empty());
        assert!(!vm.skills.is_empty());
        assert!(vm.education.is_empty());
    }

    #[test]
    fn test_hero_aliases() {
        let vm = extract_view_model(&portfolio(json!([
            { "type": "hero", "content": { "fullName": "Jane Doe", "headline": "Designer", "photo": "/me.png" } }
        ])));
        assert_eq!(vm.personal_info.name, "Jane Doe");
        assert_eq!(vm.personal_info.title, "Designer");
        assert_eq!(vm.personal_info.avatar.as_deref(), Some("/me.png"));
    }

    #[test]
    fn test_named_person_does_not_inherit_default_contact() {
        let vm = extract_view_model(&portfolio(json!([
            { "type": "hero", "content": { "name": "Jane Doe" } }
        ])));
        assert!(vm.personal_info.email.is_none());
        assert_eq!(vm.personal_info.bio, "");
    }

    #[test]
    fn test_about_supplies_bio_when_hero_has_none() {
        let vm = extract_view_model(&portfolio(json!([
            { "type": "hero", "content": { "name": "Jane" } },
            { "type": "about", "content": { "text": "I make things." } }
        ])));
        assert_eq!(vm.personal_info.bio, "I make things.");
    }

    #[test]
    fn test_project_aliases_and_comma_technologies() {
        let vm = extract_view_model(&portfolio(json!([
            { "type": "projects", "content": { "items": [
                { "name": "X", "summary": "Y", "tech": "Rust, Axum ,", "repo": "https://github.com/x" }
            ] } }
        ])));
        assert_eq!(vm.projects.len(), 1);
        let project = &vm.projects[0];
        assert_eq!(project.title, "X");
        assert_eq!(project.description, "Y");
        assert_eq!(project.technologies, vec!["Rust", "Axum"]);
        assert_eq!(project.github.as_deref(), Some("https://github.com/x"));
    }

    #[test]
    fn test_experience_position_and_employer() {
        let vm = extract_view_model(&portfolio(json!([
            { "type": "experience", "content": { "experiences": [
                { "position": "Lead", "employer": "Acme", "from": "2020", "current": true },
                { "description": "no title or company" }
            ] } }
        ])));
        assert_eq!(vm.experience.len(), 1);
        assert_eq!(vm.experience[0].title, "Lead");
        assert_eq!(vm.experience[0].company, "Acme");
        assert_eq!(vm.experience[0].period().as_deref(), Some("2020 – Present"));
    }

    #[test]
    fn test_skills_strings_objects_and_categories() {
        let vm = extract_view_model(&portfolio(json!([
            { "type": "skills", "content": {
                "items": ["Rust", { "skill": "Go", "proficiency": "advanced" }, { "name": "SQL", "level": 4 }],
                "categories": [{ "name": "Design", "skills": ["Figma"] }]
            } }
        ])));
        let names: Vec<&str> = vm.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Go", "SQL", "Figma"]);
        assert_eq!(vm.skills[1].level, Some(85));
        assert_eq!(vm.skills[2].level, Some(80));
        assert_eq!(vm.skills[3].category.as_deref(), Some("Design"));
    }

    #[test]
    fn test_hidden_sections_are_ignored() {
        let vm = extract_view_model(&portfolio(json!([
            { "type": "hero", "isVisible": false, "content": { "name": "Hidden" } }
        ])));
        assert_eq!(vm.personal_info.name, DEFAULT_NAME);
    }

    #[test]
    fn test_social_links_merge_and_dedupe() {
        let mut p = portfolio(json!([
            { "type": "hero", "content": { "name": "Jane" } },
            { "type": "contact", "content": { "email": "jane@x.io", "links": [
                { "name": "GitHub", "href": "https://github.com/jane" }
            ] } }
        ]));
        p.settings.social_links = vec![
            crate::models::portfolio::SocialLink {
                platform: "GitHub".into(),
                url: "https://github.com/jane".into(),
            },
            crate::models::portfolio::SocialLink {
                platform: "Dribbble".into(),
                url: "https://dribbble.com/jane".into(),
            },
        ];
        let vm = extract_view_model(&p);
        assert_eq!(vm.personal_info.email.as_deref(), Some("jane@x.io"));
        assert_eq!(vm.social_links.len(), 2);
        assert_eq!(vm.social_links[1].platform, "Dribbble");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let p = portfolio(json!([
            { "type": "hero", "content": { "name": "Jane Doe", "title": "Designer" } },
            { "type": "projects", "content": { "items": [{ "name": "X", "description": "Y" }] } }
        ]));
        assert_eq!(extract_view_model(&p), extract_view_model(&p));
    }
}
