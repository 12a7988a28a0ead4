use crate::models::portfolio::{ColorPalette, FontSet, Spacing, ThemeConfig};
use crate::models::template::{
    ComponentConfig, LayoutConfig, PortfolioTemplate, TemplateCategory, TypographyConfig,
};

struct Palette<'a> {
    name: &'a str,
    primary: &'a str,
    secondary: &'a str,
    accent: &'a str,
    background: &'a str,
    foreground: &'a str,
    muted: &'a str,
    border: &'a str,
}

fn scheme(template_id: &str, fonts: (&str, &str, &str), radius: &str, p: Palette<'_>) -> ThemeConfig {
    ThemeConfig {
        id: template_id.to_string(),
        name: p.name.to_string(),
        colors: ColorPalette {
            primary: p.primary.to_string(),
            secondary: p.secondary.to_string(),
            accent: p.accent.to_string(),
            background: p.background.to_string(),
            foreground: p.foreground.to_string(),
            muted: p.muted.to_string(),
            border: p.border.to_string(),
        },
        fonts: FontSet {
            heading: fonts.0.to_string(),
            body: fonts.1.to_string(),
            mono: fonts.2.to_string(),
        },
        spacing: Spacing::default(),
        border_radius: radius.to_string(),
    }
}

pub(super) fn build_catalog() -> Vec<PortfolioTemplate> {
    vec![
        modern_professional(),
        creative_portfolio(),
        developer_focus(),
        minimal_clean(),
        academic_research(),
    ]
}

fn modern_professional() -> PortfolioTemplate {
    let id = "modern-professional";
    let fonts = ("Inter", "Inter", "JetBrains Mono");
    PortfolioTemplate {
        id,
        name: "Modern Professional",
        description: "Clean corporate layout with a split hero and timeline experience",
        category: TemplateCategory::Business,
        features: vec!["Responsive design", "Timeline experience", "Skill bars", "Contact section"],
        layout: LayoutConfig {
            hero_style: "split",
            navigation: "sticky",
            max_width: "6xl",
            columns: 2,
        },
        typography: TypographyConfig {
            heading: fonts.0,
            body: fonts.1,
            mono: fonts.2,
            scale: 1.25,
        },
        components: ComponentConfig {
            skill_style: "bars",
            project_style: "cards",
            experience_style: "timeline",
        },
        color_schemes: vec![
            scheme(id, fonts, "0.5rem", Palette {
                name: "Corporate Blue",
                primary: "#2563eb",
                secondary: "#64748b",
                accent: "#0ea5e9",
                background: "#ffffff",
                foreground: "#0f172a",
                muted: "#f1f5f9",
                border: "#e2e8f0",
            }),
            scheme(id, fonts, "0.5rem", Palette {
                name: "Emerald",
                primary: "#059669",
                secondary: "#475569",
                accent: "#10b981",
                background: "#ffffff",
                foreground: "#111827",
                muted: "#ecfdf5",
                border: "#d1fae5",
            }),
        ],
    }
}

fn creative_portfolio() -> PortfolioTemplate {
    let id = "creative-portfolio";
    let fonts = ("Playfair Display", "Poppins", "Fira Code");
    PortfolioTemplate {
        id,
        name: "Creative Portfolio",
        description: "Bold gradients and a project gallery for designers and artists",
        category: TemplateCategory::Creative,
        features: vec!["Gradient hero", "Project gallery", "Parallax scrolling", "Skill tags"],
        layout: LayoutConfig {
            hero_style: "fullscreen",
            navigation: "floating",
            max_width: "7xl",
            columns: 3,
        },
        typography: TypographyConfig {
            heading: fonts.0,
            body: fonts.1,
            mono: fonts.2,
            scale: 1.333,
        },
        components: ComponentConfig {
            skill_style: "tags",
            project_style: "gallery",
            experience_style: "cards",
        },
        color_schemes: vec![
            scheme(id, fonts, "1rem", Palette {
                name: "Sunset",
                primary: "#9333ea",
                secondary: "#ec4899",
                accent: "#f59e0b",
                background: "#fdf4ff",
                foreground: "#1e1b4b",
                muted: "#fae8ff",
                border: "#f5d0fe",
            }),
            scheme(id, fonts, "1rem", Palette {
                name: "Ocean",
                primary: "#0891b2",
                secondary: "#6366f1",
                accent: "#f43f5e",
                background: "#f0f9ff",
                foreground: "#082f49",
                muted: "#e0f2fe",
                border: "#bae6fd",
            }),
        ],
    }
}

fn developer_focus() -> PortfolioTemplate {
    let id = "developer-focus";
    let fonts = ("JetBrains Mono", "Inter", "JetBrains Mono");
    PortfolioTemplate {
        id,
        name: "Developer Focus",
        description: "Terminal-inspired dark theme highlighting projects and tech stacks",
        category: TemplateCategory::Developer,
        features: vec!["Terminal hero", "Repository links", "Tech stack badges", "Dark mode"],
        layout: LayoutConfig {
            hero_style: "terminal",
            navigation: "sticky",
            max_width: "5xl",
            columns: 2,
        },
        typography: TypographyConfig {
            heading: fonts.0,
            body: fonts.1,
            mono: fonts.2,
            scale: 1.2,
        },
        components: ComponentConfig {
            skill_style: "grid",
            project_style: "repository",
            experience_style: "log",
        },
        color_schemes: vec![
            scheme(id, fonts, "0.375rem", Palette {
                name: "Terminal Green",
                primary: "#22c55e",
                secondary: "#38bdf8",
                accent: "#facc15",
                background: "#0b1120",
                foreground: "#e2e8f0",
                muted: "#1e293b",
                border: "#334155",
            }),
            scheme(id, fonts, "0.375rem", Palette {
                name: "Dracula",
                primary: "#bd93f9",
                secondary: "#ff79c6",
                accent: "#50fa7b",
                background: "#282a36",
                foreground: "#f8f8f2",
                muted: "#44475a",
                border: "#6272a4",
            }),
        ],
    }
}

fn minimal_clean() -> PortfolioTemplate {
    let id = "minimal-clean";
    let fonts = ("Inter", "Inter", "IBM Plex Mono");
    PortfolioTemplate {
        id,
        name: "Minimal Clean",
        description: "Typography-first single column with generous whitespace",
        category: TemplateCategory::Minimal,
        features: vec!["Single column", "Typography focus", "Fast loading"],
        layout: LayoutConfig {
            hero_style: "minimal",
            navigation: "none",
            max_width: "3xl",
            columns: 1,
        },
        typography: TypographyConfig {
            heading: fonts.0,
            body: fonts.1,
            mono: fonts.2,
            scale: 1.2,
        },
        components: ComponentConfig {
            skill_style: "list",
            project_style: "list",
            experience_style: "list",
        },
        color_schemes: vec![
            scheme(id, fonts, "0", Palette {
                name: "Monochrome",
                primary: "#111111",
                secondary: "#6b7280",
                accent: "#111111",
                background: "#ffffff",
                foreground: "#111111",
                muted: "#f9fafb",
                border: "#e5e7eb",
            }),
            scheme(id, fonts, "0", Palette {
                name: "Paper",
                primary: "#44403c",
                secondary: "#78716c",
                accent: "#b45309",
                background: "#fafaf9",
                foreground: "#1c1917",
                muted: "#f5f5f4",
                border: "#e7e5e4",
            }),
        ],
    }
}

fn academic_research() -> PortfolioTemplate {
    let id = "academic-research";
    let fonts = ("Merriweather", "Source Serif Pro", "Source Code Pro");
    PortfolioTemplate {
        id,
        name: "Academic Research",
        description: "Formal serif layout for researchers, with education and publications first",
        category: TemplateCategory::Academic,
        features: vec!["Education first", "Research projects", "Publication-style entries", "Print friendly"],
        layout: LayoutConfig {
            hero_style: "academic",
            navigation: "sidebar",
            max_width: "4xl",
            columns: 1,
        },
        typography: TypographyConfig {
            heading: fonts.0,
            body: fonts.1,
            mono: fonts.2,
            scale: 1.25,
        },
        components: ComponentConfig {
            skill_style: "list",
            project_style: "citations",
            experience_style: "list",
        },
        color_schemes: vec![
            scheme(id, fonts, "0.25rem", Palette {
                name: "Oxford",
                primary: "#1e3a8a",
                secondary: "#7c2d12",
                accent: "#b45309",
                background: "#fffdf7",
                foreground: "#1f2937",
                muted: "#f8f5ec",
                border: "#e7e2d3",
            }),
            scheme(id, fonts, "0.25rem", Palette {
                name: "Cambridge",
                primary: "#0f766e",
                secondary: "#334155",
                accent: "#a16207",
                background: "#ffffff",
                foreground: "#1e293b",
                muted: "#f0fdfa",
                border: "#ccfbf1",
            }),
        ],
    }
}
