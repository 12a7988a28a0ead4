//! Per-template layout descriptors.
//!
//! Each template is data: which sections appear in which order, the hero and list
//! variants, and the utility classes applied to shared markup. The single renderer in
//! `sections.rs` interprets a descriptor; adding a template means adding a descriptor.

use crate::catalog::DEFAULT_TEMPLATE_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionSlot {
    About,
    Experience,
    Education,
    Projects,
    Skills,
    Contact,
}

impl SectionSlot {
    pub fn anchor(self) -> &'static str {
        match self {
            SectionSlot::About => "about",
            SectionSlot::Experience => "experience",
            SectionSlot::Education => "education",
            SectionSlot::Projects => "projects",
            SectionSlot::Skills => "skills",
            SectionSlot::Contact => "contact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroVariant {
    Split,
    Gradient,
    Terminal,
    Minimal,
    Academic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceStyle {
    Timeline,
    Cards,
    Log,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStyle {
    Cards,
    Gallery,
    Repository,
    List,
    Citations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillStyle {
    Bars,
    Tags,
    Grid,
    List,
}

#[derive(Debug)]
pub struct Headings {
    pub about: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
    pub projects: &'static str,
    pub skills: &'static str,
    pub contact: &'static str,
}

impl Headings {
    pub fn for_slot(&self, slot: SectionSlot) -> &'static str {
        match slot {
            SectionSlot::About => self.about,
            SectionSlot::Experience => self.experience,
            SectionSlot::Education => self.education,
            SectionSlot::Projects => self.projects,
            SectionSlot::Skills => self.skills,
            SectionSlot::Contact => self.contact,
        }
    }
}

#[derive(Debug)]
pub struct LayoutDescriptor {
    pub template_id: &'static str,
    pub body_class: &'static str,
    pub container_class: &'static str,
    pub navigation: bool,
    pub hero: HeroVariant,
    pub sections: &'static [SectionSlot],
    pub section_class: &'static str,
    pub heading_class: &'static str,
    /// Prepended to every section heading, e.g. `// ` for the terminal look.
    pub heading_prefix: &'static str,
    pub headings: Headings,
    pub card_class: &'static str,
    pub tag_class: &'static str,
    pub muted_class: &'static str,
    pub link_class: &'static str,
    pub experience_style: ExperienceStyle,
    pub project_style: ProjectStyle,
    pub skill_style: SkillStyle,
    pub footer_note: &'static str,
}

const STANDARD_HEADINGS: Headings = Headings {
    about: "About Me",
    experience: "Experience",
    education: "Education",
    projects: "Projects",
    skills: "Skills",
    contact: "Get In Touch",
};

static MODERN_PROFESSIONAL: LayoutDescriptor = LayoutDescriptor {
    template_id: "modern-professional",
    body_class: "bg-white text-slate-900 antialiased",
    container_class: "max-w-6xl mx-auto px-6",
    navigation: true,
    hero: HeroVariant::Split,
    sections: &[
        SectionSlot::About,
        SectionSlot::Experience,
        SectionSlot::Projects,
        SectionSlot::Skills,
        SectionSlot::Education,
        SectionSlot::Contact,
    ],
    section_class: "py-20 border-b border-slate-100",
    heading_class: "text-3xl font-bold mb-10 text-slate-900",
    heading_prefix: "",
    headings: STANDARD_HEADINGS,
    card_class: "bg-white rounded-lg shadow-md p-6 border border-slate-100",
    tag_class: "px-3 py-1 text-sm rounded-full bg-blue-50 text-blue-700",
    muted_class: "text-slate-500",
    link_class: "text-blue-600 hover:underline",
    experience_style: ExperienceStyle::Timeline,
    project_style: ProjectStyle::Cards,
    skill_style: SkillStyle::Bars,
    footer_note: "Built with Portfolio Builder",
};

static CREATIVE_PORTFOLIO: LayoutDescriptor = LayoutDescriptor {
    template_id: "creative-portfolio",
    body_class: "bg-gradient-to-br from-purple-50 via-white to-pink-50 text-gray-900",
    container_class: "max-w-7xl mx-auto px-6",
    navigation: true,
    hero: HeroVariant::Gradient,
    sections: &[
        SectionSlot::About,
        SectionSlot::Projects,
        SectionSlot::Skills,
        SectionSlot::Experience,
        SectionSlot::Education,
        SectionSlot::Contact,
    ],
    section_class: "py-24",
    heading_class: "text-4xl font-extrabold mb-12 text-center bg-clip-text text-transparent bg-gradient-to-r from-purple-600 to-pink-500",
    heading_prefix: "",
    headings: Headings {
        about: "Hello There",
        experience: "Journey",
        education: "Learning",
        projects: "Selected Work",
        skills: "Toolbox",
        contact: "Let's Create Together",
    },
    card_class: "bg-white/80 backdrop-blur rounded-2xl shadow-xl p-8 hover:-translate-y-1 transition-transform",
    tag_class: "px-4 py-1 text-sm rounded-full bg-gradient-to-r from-purple-500 to-pink-500 text-white",
    muted_class: "text-gray-500",
    link_class: "text-purple-600 font-semibold hover:text-pink-500",
    experience_style: ExperienceStyle::Cards,
    project_style: ProjectStyle::Gallery,
    skill_style: SkillStyle::Tags,
    footer_note: "Designed with passion",
};

static DEVELOPER_FOCUS: LayoutDescriptor = LayoutDescriptor {
    template_id: "developer-focus",
    body_class: "bg-slate-950 text-slate-200 font-mono",
    container_class: "max-w-5xl mx-auto px-6",
    navigation: true,
    hero: HeroVariant::Terminal,
    sections: &[
        SectionSlot::About,
        SectionSlot::Projects,
        SectionSlot::Experience,
        SectionSlot::Skills,
        SectionSlot::Education,
        SectionSlot::Contact,
    ],
    section_class: "py-16 border-t border-slate-800",
    heading_class: "text-2xl font-bold mb-8 text-green-400",
    heading_prefix: "// ",
    headings: Headings {
        about: "about",
        experience: "experience",
        education: "education",
        projects: "projects",
        skills: "stack",
        contact: "contact",
    },
    card_class: "bg-slate-900 border border-slate-800 rounded-md p-6 hover:border-green-500",
    tag_class: "px-2 py-0.5 text-xs rounded bg-slate-800 text-green-300 border border-slate-700",
    muted_class: "text-slate-400",
    link_class: "text-sky-400 hover:text-green-400",
    experience_style: ExperienceStyle::Log,
    project_style: ProjectStyle::Repository,
    skill_style: SkillStyle::Grid,
    footer_note: "Compiled with care",
};

static MINIMAL_CLEAN: LayoutDescriptor = LayoutDescriptor {
    template_id: "minimal-clean",
    body_class: "bg-white text-gray-900",
    container_class: "max-w-3xl mx-auto px-6",
    navigation: false,
    hero: HeroVariant::Minimal,
    sections: &[
        SectionSlot::About,
        SectionSlot::Experience,
        SectionSlot::Projects,
        SectionSlot::Skills,
        SectionSlot::Education,
        SectionSlot::Contact,
    ],
    section_class: "py-12",
    heading_class: "text-sm uppercase tracking-widest text-gray-400 mb-6",
    heading_prefix: "",
    headings: Headings {
        about: "About",
        experience: "Work",
        education: "Education",
        projects: "Projects",
        skills: "Skills",
        contact: "Contact",
    },
    card_class: "py-4 border-b border-gray-100",
    tag_class: "text-sm text-gray-500",
    muted_class: "text-gray-500",
    link_class: "underline underline-offset-4 hover:text-gray-500",
    experience_style: ExperienceStyle::List,
    project_style: ProjectStyle::List,
    skill_style: SkillStyle::List,
    footer_note: "",
};

static ACADEMIC_RESEARCH: LayoutDescriptor = LayoutDescriptor {
    template_id: "academic-research",
    body_class: "bg-[#fffdf7] text-gray-800 font-serif",
    container_class: "max-w-4xl mx-auto px-8",
    navigation: true,
    hero: HeroVariant::Academic,
    sections: &[
        SectionSlot::About,
        SectionSlot::Education,
        SectionSlot::Experience,
        SectionSlot::Projects,
        SectionSlot::Skills,
        SectionSlot::Contact,
    ],
    section_class: "py-12 border-b border-stone-200",
    heading_class: "text-2xl font-bold mb-6 text-blue-900 border-b-2 border-blue-900 pb-2",
    heading_prefix: "",
    headings: Headings {
        about: "Research Interests",
        experience: "Academic Appointments",
        education: "Education",
        projects: "Research & Publications",
        skills: "Methods & Expertise",
        contact: "Contact",
    },
    card_class: "mb-6",
    tag_class: "text-sm italic text-stone-600",
    muted_class: "text-stone-500",
    link_class: "text-blue-900 underline",
    experience_style: ExperienceStyle::List,
    project_style: ProjectStyle::Citations,
    skill_style: SkillStyle::List,
    footer_note: "Last updated with Portfolio Builder",
};

static LAYOUTS: [&LayoutDescriptor; 5] = [
    &MODERN_PROFESSIONAL,
    &CREATIVE_PORTFOLIO,
    &DEVELOPER_FOCUS,
    &MINIMAL_CLEAN,
    &ACADEMIC_RESEARCH,
];

pub fn find_layout(template_id: &str) -> Option<&'static LayoutDescriptor> {
    LAYOUTS.iter().copied().find(|l| l.template_id == template_id)
}

/// Layout for `template_id`, or the default template's layout when unknown.
pub fn layout_for(template_id: &str) -> &'static LayoutDescriptor {
    find_layout(template_id)
        .or_else(|| find_layout(DEFAULT_TEMPLATE_ID))
        .unwrap_or(&MODERN_PROFESSIONAL)
}
