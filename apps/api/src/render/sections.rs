//! Template renderer: turns a view model into page body markup under a layout.
//!
//! One code path serves every template; the `LayoutDescriptor` decides order,
//! variants and classes. Empty collections drop their section entirely and
//! optional fields render only when present.

use crate::render::html::{escape, safe_url, Html};
use crate::render::layout::{
    layout_for, ExperienceStyle, HeroVariant, LayoutDescriptor, ProjectStyle, SectionSlot,
    SkillStyle,
};
use crate::render::view_model::{
    EducationItem, ExperienceItem, ProjectItem, SkillItem, ViewModel,
};

/// Renders the body markup for `template_id`, falling back to the default layout.
pub fn generate_template_html(template_id: &str, vm: &ViewModel) -> String {
    render_template(vm, layout_for(template_id))
}

pub fn render_template(vm: &ViewModel, layout: &LayoutDescriptor) -> String {
    let mut html = Html::new();
    let present: Vec<SectionSlot> = layout
        .sections
        .iter()
        .copied()
        .filter(|slot| has_content(vm, *slot))
        .collect();

    html.push(format!(
        "<div class=\"portfolio portfolio-{} {}\">",
        layout.template_id, layout.body_class
    ));

    if layout.navigation {
        render_nav(&mut html, vm, layout, &present);
    }
    render_hero(&mut html, vm, layout);

    html.push("<main>");
    for slot in &present {
        html.push(format!(
            "<section id=\"{}\" class=\"{}\"><div class=\"{}\">",
            slot.anchor(),
            layout.section_class,
            layout.container_class
        ));
        html.push(format!(
            "<h2 class=\"{}\">{}{}</h2>",
            layout.heading_class,
            escape(layout.heading_prefix),
            escape(layout.headings.for_slot(*slot))
        ));
        match slot {
            SectionSlot::About => render_about(&mut html, vm, layout),
            SectionSlot::Experience => render_experience(&mut html, &vm.experience, layout),
            SectionSlot::Education => render_education(&mut html, &vm.education, layout),
            SectionSlot::Projects => render_projects(&mut html, &vm.projects, layout),
            SectionSlot::Skills => render_skills(&mut html, &vm.skills, layout),
            SectionSlot::Contact => render_contact(&mut html, vm, layout),
        }
        html.push("</div></section>");
    }
    html.push("</main>");

    render_footer(&mut html, vm, layout);
    html.push("</div>");
    html.finish()
}

fn has_content(vm: &ViewModel, slot: SectionSlot) -> bool {
    let info = &vm.personal_info;
    match slot {
        SectionSlot::About => !info.bio.trim().is_empty(),
        SectionSlot::Experience => !vm.experience.is_empty(),
        SectionSlot::Education => !vm.education.is_empty(),
        SectionSlot::Projects => !vm.projects.is_empty(),
        SectionSlot::Skills => !vm.skills.is_empty(),
        SectionSlot::Contact => {
            info.email.is_some()
                || info.phone.is_some()
                || info.website.is_some()
                || !vm.social_links.is_empty()
        }
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

fn render_nav(html: &mut Html, vm: &ViewModel, layout: &LayoutDescriptor, present: &[SectionSlot]) {
    html.push(format!(
        "<nav class=\"sticky top-0 z-50 backdrop-blur border-b border-black/5\"><div class=\"{} flex items-center justify-between h-16\">",
        layout.container_class
    ));
    html.push(format!(
        "<a href=\"#top\" class=\"font-bold text-lg\" style=\"color: var(--color-primary)\">{}</a>",
        escape(&vm.personal_info.name)
    ));
    html.push("<div class=\"hidden md:flex gap-6 text-sm\">");
    for slot in present {
        html.push(format!(
            "<a href=\"#{}\" class=\"{}\">{}</a>",
            slot.anchor(),
            layout.link_class,
            escape(layout.headings.for_slot(*slot))
        ));
    }
    html.push("</div></div></nav>");
}

// ────────────────────────────────────────────────────────────────────────────
// Hero
// ────────────────────────────────────────────────────────────────────────────

fn render_avatar(html: &mut Html, vm: &ViewModel, class: &str) {
    let info = &vm.personal_info;
    match info.avatar.as_deref().and_then(safe_url) {
        Some(src) => html.push(format!(
            "<img src=\"{src}\" alt=\"{}\" class=\"{class} object-cover\">",
            escape(&info.name)
        )),
        None => html.push(format!(
            "<div class=\"{class} flex items-center justify-center text-4xl font-bold text-white\" style=\"background: var(--color-primary)\">{}</div>",
            escape(&initials(&info.name))
        )),
    }
}

fn render_hero(html: &mut Html, vm: &ViewModel, layout: &LayoutDescriptor) {
    let info = &vm.personal_info;
    let title = Some(info.title.as_str());
    html.push("<header id=\"top\" class=\"hero\">");
    match layout.hero {
        HeroVariant::Split => {
            html.push(format!(
                "<div class=\"{} py-24 grid md:grid-cols-2 gap-12 items-center\"><div>",
                layout.container_class
            ));
            html.text("h1", "text-5xl font-bold mb-4", &info.name);
            html.text_opt("p", "text-2xl mb-6 text-[color:var(--color-primary)]", title);
            html.text_opt("p", &format!("text-lg {}", layout.muted_class), Some(info.bio.as_str()));
            html.push("<div class=\"mt-8 flex gap-4\"><a href=\"#contact\" class=\"px-6 py-3 rounded-lg text-white\" style=\"background: var(--color-primary)\">Contact Me</a><a href=\"#projects\" class=\"px-6 py-3 rounded-lg border\">View Work</a></div>");
            html.push("</div><div class=\"flex justify-center\" data-parallax=\"0.2\">");
            render_avatar(html, vm, "w-64 h-64 rounded-full shadow-xl");
            html.push("</div></div>");
        }
        HeroVariant::Gradient => {
            html.push("<div class=\"min-h-screen flex items-center justify-center text-center text-white\" style=\"background: linear-gradient(135deg, var(--color-primary), var(--color-secondary))\">");
            html.push("<div class=\"px-6\" data-parallax=\"0.3\">");
            render_avatar(html, vm, "w-32 h-32 rounded-full mx-auto mb-8 ring-4 ring-white/50");
            html.text("h1", "text-6xl md:text-7xl font-extrabold mb-6", &info.name);
            html.text_opt("p", "text-2xl font-light mb-4", title);
            html.text_opt("p", "text-lg max-w-2xl mx-auto opacity-90", Some(info.bio.as_str()));
            html.push("</div></div>");
        }
        HeroVariant::Terminal => {
            html.push(format!(
                "<div class=\"{} py-24\"><div class=\"bg-slate-900 border border-slate-700 rounded-lg shadow-2xl\">",
                layout.container_class
            ));
            html.push("<div class=\"flex gap-2 px-4 py-3 border-b border-slate-700\"><span class=\"w-3 h-3 rounded-full bg-red-500\"></span><span class=\"w-3 h-3 rounded-full bg-yellow-500\"></span><span class=\"w-3 h-3 rounded-full bg-green-500\"></span></div>");
            html.push("<div class=\"p-6 space-y-3\">");
            html.push("<p class=\"text-green-400\">$ whoami</p>");
            html.text("h1", "text-4xl font-bold text-white", &info.name);
            if !info.title.is_empty() {
                html.push("<p class=\"text-green-400\">$ cat role.txt</p>");
                html.text("p", "text-xl text-sky-300", &info.title);
            }
            if !info.bio.is_empty() {
                html.push("<p class=\"text-green-400\">$ cat README.md</p>");
                html.text("p", layout.muted_class, &info.bio);
            }
            html.push("<p class=\"text-green-400\">$ <span class=\"animate-pulse\">_</span></p>");
            html.push("</div></div></div>");
        }
        HeroVariant::Minimal => {
            html.push(format!("<div class=\"{} pt-24 pb-12\">", layout.container_class));
            html.text("h1", "text-4xl font-semibold tracking-tight mb-2", &info.name);
            html.text_opt("p", &format!("text-xl {}", layout.muted_class), title);
            html.text_opt("p", &format!("mt-2 {}", layout.muted_class), info.location.as_deref());
            html.push("</div>");
        }
        HeroVariant::Academic => {
            html.push(format!(
                "<div class=\"{} py-16 flex flex-col md:flex-row gap-10 items-start\">",
                layout.container_class
            ));
            render_avatar(html, vm, "w-40 h-48 rounded shadow");
            html.push("<div>");
            html.text("h1", "text-4xl font-bold text-blue-900 mb-2", &info.name);
            html.text_opt("p", "text-xl italic mb-2", title);
            html.text_opt("p", layout.muted_class, info.location.as_deref());
            if let Some(email) = info.email.as_deref() {
                html.link(&format!("mailto:{email}"), layout.link_class, email);
            }
            html.push("</div></div>");
        }
    }
    html.push("</header>");
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn render_about(html: &mut Html, vm: &ViewModel, layout: &LayoutDescriptor) {
    for paragraph in vm.personal_info.bio.split("\n\n").filter(|p| !p.trim().is_empty()) {
        html.text("p", "text-lg leading-relaxed mb-4", paragraph.trim());
    }
    if layout.hero == HeroVariant::Minimal {
        return;
    }
    html.text_opt("p", layout.muted_class, vm.personal_info.location.as_deref());
}

fn render_experience(html: &mut Html, items: &[ExperienceItem], layout: &LayoutDescriptor) {
    match layout.experience_style {
        ExperienceStyle::Timeline => {
            html.push("<div class=\"relative border-l-2 pl-8 space-y-10\" style=\"border-color: var(--color-primary)\">");
            for item in items {
                html.push("<div class=\"relative\"><span class=\"absolute -left-10 top-1 w-4 h-4 rounded-full\" style=\"background: var(--color-primary)\"></span>");
                experience_body(html, item, layout);
                html.push("</div>");
            }
            html.push("</div>");
        }
        ExperienceStyle::Cards => {
            html.push("<div class=\"grid md:grid-cols-2 gap-8\">");
            for item in items {
                html.push(format!("<div class=\"{}\">", layout.card_class));
                experience_body(html, item, layout);
                html.push("</div>");
            }
            html.push("</div>");
        }
        ExperienceStyle::Log => {
            html.push("<div class=\"space-y-6\">");
            for item in items {
                html.push(format!("<div class=\"{}\">", layout.card_class));
                if let Some(period) = item.period() {
                    html.text("p", "text-xs text-green-400 mb-2", &format!("[{period}]"));
                }
                html.text("h3", "text-lg font-bold text-white", &item.title);
                if !item.company.is_empty() {
                    html.text("p", "text-sky-300", &format!("@ {}", item.company));
                }
                html.text_opt("p", &format!("mt-2 {}", layout.muted_class), item.description.as_deref());
                html.push("</div>");
            }
            html.push("</div>");
        }
        ExperienceStyle::List => {
            html.push("<div>");
            for item in items {
                html.push(format!("<div class=\"{}\">", layout.card_class));
                experience_body(html, item, layout);
                html.push("</div>");
            }
            html.push("</div>");
        }
    }
}

fn experience_body(html: &mut Html, item: &ExperienceItem, layout: &LayoutDescriptor) {
    html.text("h3", "text-xl font-semibold", &item.title);
    let mut meta: Vec<String> = Vec::new();
    if !item.company.is_empty() {
        meta.push(item.company.clone());
    }
    if let Some(location) = &item.location {
        meta.push(location.clone());
    }
    if let Some(period) = item.period() {
        meta.push(period);
    }
    if !meta.is_empty() {
        html.text("p", &format!("text-sm {}", layout.muted_class), &meta.join(" · "));
    }
    html.text_opt("p", "mt-3 leading-relaxed", item.description.as_deref());
}

fn render_education(html: &mut Html, items: &[EducationItem], layout: &LayoutDescriptor) {
    html.push("<div class=\"space-y-6\">");
    for item in items {
        html.push(format!("<div class=\"{}\">", layout.card_class));
        let degree = match &item.field {
            Some(field) if !item.degree.is_empty() => format!("{}, {}", item.degree, field),
            Some(field) => field.clone(),
            None => item.degree.clone(),
        };
        html.text_opt("h3", "text-lg font-semibold", Some(degree.as_str()));
        html.text_opt("p", "", Some(item.institution.as_str()));
        html.text_opt("p", &format!("text-sm {}", layout.muted_class), item.period().as_deref());
        html.text_opt("p", "mt-2", item.description.as_deref());
        html.push("</div>");
    }
    html.push("</div>");
}

fn render_projects(html: &mut Html, items: &[ProjectItem], layout: &LayoutDescriptor) {
    let grid = match layout.project_style {
        ProjectStyle::Cards => "grid md:grid-cols-2 lg:grid-cols-3 gap-8",
        ProjectStyle::Gallery => "grid md:grid-cols-2 lg:grid-cols-3 gap-10",
        ProjectStyle::Repository => "grid md:grid-cols-2 gap-6",
        ProjectStyle::List | ProjectStyle::Citations => "space-y-2",
    };
    html.push(format!("<div class=\"{grid}\">"));
    for (index, item) in items.iter().enumerate() {
        html.push(format!("<article class=\"{}\">", layout.card_class));
        match layout.project_style {
            ProjectStyle::Gallery => {
                if let Some(src) = item.image.as_deref().and_then(safe_url) {
                    html.push(format!(
                        "<img src=\"{src}\" alt=\"{}\" class=\"w-full h-48 object-cover rounded-xl mb-6\">",
                        escape(&item.title)
                    ));
                }
                html.text("h3", "text-2xl font-bold mb-3", &item.title);
            }
            ProjectStyle::Repository => {
                html.text("h3", "text-lg font-bold text-sky-400", &format!("~/{}", item.title));
            }
            ProjectStyle::Citations => {
                html.text("h3", "font-semibold", &format!("[{}] {}", index + 1, item.title));
            }
            ProjectStyle::Cards | ProjectStyle::List => {
                html.text("h3", "text-xl font-semibold mb-2", &item.title);
            }
        }
        html.text_opt("p", &format!("mb-4 {}", layout.muted_class), Some(item.description.as_str()));
        if !item.technologies.is_empty() {
            html.push("<div class=\"flex flex-wrap gap-2 mb-4\">");
            for tech in &item.technologies {
                html.text("span", layout.tag_class, tech);
            }
            html.push("</div>");
        }
        if item.link.is_some() || item.github.is_some() {
            html.push("<div class=\"flex gap-4\">");
            if let Some(link) = &item.link {
                html.link(link, layout.link_class, "Live Demo");
            }
            if let Some(github) = &item.github {
                html.link(github, layout.link_class, "Source");
            }
            html.push("</div>");
        }
        html.push("</article>");
    }
    html.push("</div>");
}

fn render_skills(html: &mut Html, items: &[SkillItem], layout: &LayoutDescriptor) {
    match layout.skill_style {
        SkillStyle::Bars => {
            html.push("<div class=\"grid md:grid-cols-2 gap-6\">");
            for skill in items {
                html.push("<div>");
                html.push("<div class=\"flex justify-between mb-1\">");
                html.text("span", "font-medium", &skill.name);
                if let Some(level) = skill.level {
                    html.text("span", layout.muted_class, &format!("{level}%"));
                }
                html.push("</div>");
                let width = skill.level.unwrap_or(75);
                html.push(format!(
                    "<div class=\"w-full h-2 rounded-full bg-slate-100\"><div class=\"h-2 rounded-full\" style=\"width: {width}%; background: var(--color-primary)\"></div></div>"
                ));
                html.push("</div>");
            }
            html.push("</div>");
        }
        SkillStyle::Tags => {
            html.push("<div class=\"flex flex-wrap justify-center gap-3\">");
            for skill in items {
                html.text("span", layout.tag_class, &skill.name);
            }
            html.push("</div>");
        }
        SkillStyle::Grid => {
            html.push("<div class=\"grid grid-cols-2 md:grid-cols-4 gap-4\">");
            for skill in items {
                html.push(format!("<div class=\"{} text-center\">", layout.card_class));
                html.text("span", "text-green-300", &skill.name);
                html.push("</div>");
            }
            html.push("</div>");
        }
        SkillStyle::List => {
            // Grouped by category, in first-seen order.
            let mut groups: Vec<(Option<&str>, Vec<&str>)> = Vec::new();
            for skill in items {
                let category = skill.category.as_deref();
                match groups.iter_mut().find(|(c, _)| *c == category) {
                    Some((_, names)) => names.push(skill.name.as_str()),
                    None => groups.push((category, vec![skill.name.as_str()])),
                }
            }
            html.push("<dl class=\"space-y-2\">");
            for (category, names) in groups {
                if let Some(category) = category {
                    html.text("dt", "font-semibold", category);
                }
                html.text("dd", layout.muted_class, &names.join(", "));
            }
            html.push("</dl>");
        }
    }
}

fn render_contact(html: &mut Html, vm: &ViewModel, layout: &LayoutDescriptor) {
    let info = &vm.personal_info;
    html.push("<div class=\"space-y-3\">");
    if let Some(email) = info.email.as_deref() {
        html.push("<p>");
        html.link(&format!("mailto:{email}"), layout.link_class, email);
        html.push("</p>");
    }
    if let Some(phone) = info.phone.as_deref() {
        html.push("<p>");
        html.link(&format!("tel:{}", phone.replace(' ', "")), layout.link_class, phone);
        html.push("</p>");
    }
    if let Some(website) = info.website.as_deref() {
        html.push("<p>");
        html.link(website, layout.link_class, website);
        html.push("</p>");
    }
    if !vm.social_links.is_empty() {
        html.push("<div class=\"flex flex-wrap gap-4 pt-4\">");
        for link in &vm.social_links {
            html.link(&link.url, layout.link_class, &link.platform);
        }
        html.push("</div>");
    }
    html.push("</div>");
}

fn render_footer(html: &mut Html, vm: &ViewModel, layout: &LayoutDescriptor) {
    html.push(format!(
        "<footer class=\"py-10 text-center text-sm {}\"><div class=\"{}\">",
        layout.muted_class, layout.container_class
    ));
    html.push(format!("<p>&copy; {}", escape(&vm.personal_info.name)));
    if !layout.footer_note.is_empty() {
        html.push(format!(" · {}", escape(layout.footer_note)));
    }
    html.push("</p></div></footer>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::render::view_model::{default_preview_data, DEFAULT_NAME};

    #[test]
    fn test_every_template_renders_owner_name() {
        let mut vm = default_preview_data();
        vm.personal_info.name = "Jane Doe".to_string();
        for template in catalog::all_templates() {
            let html = generate_template_html(template.id, &vm);
            assert!(!html.is_empty());
            assert!(html.contains("Jane Doe"), "{}", template.id);
            assert!(html.contains(&format!("portfolio-{}", template.id)));
        }
    }

    #[test]
    fn test_default_name_rendered_without_owner() {
        let vm = default_preview_data();
        for template in catalog::all_templates() {
            assert!(generate_template_html(template.id, &vm).contains(DEFAULT_NAME));
        }
    }

    #[test]
    fn test_empty_education_omits_section() {
        let vm = default_preview_data();
        assert!(vm.education.is_empty());
        let html = generate_template_html("academic-research", &vm);
        assert!(!html.contains("id=\"education\""));
        assert!(html.contains("id=\"projects\""));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut vm = default_preview_data();
        vm.personal_info.name = "<script>alert(1)</script>".to_string();
        let html = generate_template_html("minimal-clean", &vm);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unsafe_project_links_dropped() {
        let mut vm = default_preview_data();
        vm.projects[0].link = Some("javascript:alert(1)".to_string());
        let html = generate_template_html("modern-professional", &vm);
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("jane van doe"), "JV");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_developer_headings_use_comment_prefix() {
        let html = generate_template_html("developer-focus", &default_preview_data());
        assert!(html.contains("// projects"));
    }
}
