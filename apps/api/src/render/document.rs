//! Full HTML document wrapper: head metadata, theme variables, fonts and the
//! page script around a rendered template body.

use crate::models::portfolio::{Portfolio, ThemeConfig};
use crate::render::html::escape;

pub const STYLESHEET_PATH: &str = "styles/main.css";

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// How the theme stylesheet reaches the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylesheetMode {
    Inline,
    /// `<link>` to `styles/main.css`; the caller ships the file.
    Linked,
}

pub struct DocumentParts<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub keywords: &'a [String],
    pub theme: &'a ThemeConfig,
    pub body: &'a str,
    pub stylesheet: StylesheetMode,
}

impl<'a> DocumentParts<'a> {
    /// SEO fields win over the portfolio's own title and description.
    pub fn for_portfolio(
        portfolio: &'a Portfolio,
        theme: &'a ThemeConfig,
        body: &'a str,
        stylesheet: StylesheetMode,
    ) -> Self {
        let seo = &portfolio.settings.seo;
        let title = seo
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&portfolio.title);
        let description = seo
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(&portfolio.description);
        Self {
            title: if title.trim().is_empty() { "Portfolio" } else { title },
            description,
            keywords: &seo.keywords,
            theme,
            body,
            stylesheet,
        }
    }
}

pub fn render_document(parts: &DocumentParts<'_>) -> String {
    let mut doc = String::with_capacity(parts.body.len() + 4096);
    doc.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    doc.push_str("<meta charset=\"UTF-8\">\n");
    doc.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    doc.push_str(&format!("<title>{}</title>\n", escape(parts.title)));
    if !parts.description.trim().is_empty() {
        doc.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n",
            escape(parts.description)
        ));
    }
    if !parts.keywords.is_empty() {
        doc.push_str(&format!(
            "<meta name=\"keywords\" content=\"{}\">\n",
            escape(&parts.keywords.join(", "))
        ));
    }
    doc.push_str(&format!(
        "<meta property=\"og:title\" content=\"{}\">\n",
        escape(parts.title)
    ));
    doc.push_str(&format!("<script src=\"{TAILWIND_CDN}\"></script>\n"));
    if let Some(href) = google_fonts_href(parts.theme) {
        doc.push_str("<link rel=\"preconnect\" href=\"https://fonts.googleapis.com\">\n");
        doc.push_str(&format!("<link rel=\"stylesheet\" href=\"{href}\">\n"));
    }
    match parts.stylesheet {
        StylesheetMode::Inline => {
            doc.push_str("<style>\n");
            doc.push_str(&theme_stylesheet(parts.theme));
            doc.push_str("</style>\n");
        }
        StylesheetMode::Linked => {
            doc.push_str(&format!("<link rel=\"stylesheet\" href=\"{STYLESHEET_PATH}\">\n"));
        }
    }
    doc.push_str("</head>\n<body>\n");
    doc.push_str(parts.body);
    doc.push_str("\n<script>\n");
    doc.push_str(PAGE_SCRIPT);
    doc.push_str("</script>\n</body>\n</html>\n");
    doc
}

/// CSS variables for the theme plus the base rules that consume them.
pub fn theme_stylesheet(theme: &ThemeConfig) -> String {
    let c = &theme.colors;
    let f = &theme.fonts;
    format!(
        ":root {{
  --color-primary: {primary};
  --color-secondary: {secondary};
  --color-accent: {accent};
  --color-background: {background};
  --color-foreground: {foreground};
  --color-muted: {muted};
  --color-border: {border};
  --font-heading: {heading};
  --font-body: {body};
  --font-mono: {mono};
  --spacing-section: {section};
  --spacing-container: {container};
  --radius: {radius};
}}
html {{ scroll-behavior: smooth; }}
body {{
  margin: 0;
  background-color: var(--color-background);
  color: var(--color-foreground);
  font-family: var(--font-body), system-ui, sans-serif;
}}
h1, h2, h3, h4 {{ font-family: var(--font-heading), system-ui, sans-serif; }}
code, pre {{ font-family: var(--font-mono), monospace; }}
a {{ transition: color 0.2s ease; }}
section {{ scroll-margin-top: 4rem; }}
.fade-in {{ opacity: 0; transform: translateY(20px); transition: opacity 0.6s ease, transform 0.6s ease; }}
.fade-in.visible {{ opacity: 1; transform: none; }}
",
        primary = css_value(&c.primary),
        secondary = css_value(&c.secondary),
        accent = css_value(&c.accent),
        background = css_value(&c.background),
        foreground = css_value(&c.foreground),
        muted = css_value(&c.muted),
        border = css_value(&c.border),
        heading = css_font(&f.heading),
        body = css_font(&f.body),
        mono = css_font(&f.mono),
        section = css_value(&theme.spacing.section),
        container = css_value(&theme.spacing.container),
        radius = css_value(&theme.border_radius),
    )
}

/// Drops characters that could close the declaration or the style element.
fn css_value(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\'' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn css_font(raw: &str) -> String {
    format!("\"{}\"", css_value(raw))
}

fn google_fonts_href(theme: &ThemeConfig) -> Option<String> {
    let mut families: Vec<String> = Vec::new();
    for font in [&theme.fonts.heading, &theme.fonts.body, &theme.fonts.mono] {
        let name: String = font
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
            .collect();
        let name = name.trim().replace(' ', "+");
        if !name.is_empty() && !families.contains(&name) {
            families.push(name);
        }
    }
    if families.is_empty() {
        return None;
    }
    let query: Vec<String> = families
        .iter()
        .map(|f| format!("family={f}:wght@400;600;700"))
        .collect();
    Some(format!(
        "https://fonts.googleapis.com/css2?{}&amp;display=swap",
        query.join("&amp;")
    ))
}

/// Smooth anchor scrolling, fade-in on scroll and a light parallax on
/// `[data-parallax]` elements.
const PAGE_SCRIPT: &str = r##"document.addEventListener('DOMContentLoaded', function () {
  document.querySelectorAll('a[href^="#"]').forEach(function (anchor) {
    anchor.addEventListener('click', function (event) {
      var target = document.querySelector(anchor.getAttribute('href'));
      if (target) {
        event.preventDefault();
        target.scrollIntoView({ behavior: 'smooth', block: 'start' });
      }
    });
  });
  var observer = new IntersectionObserver(function (entries) {
    entries.forEach(function (entry) {
      if (entry.isIntersecting) {
        entry.target.classList.add('visible');
      }
    });
  }, { threshold: 0.1 });
  document.querySelectorAll('section').forEach(function (section) {
    section.classList.add('fade-in');
    observer.observe(section);
  });
  var parallax = document.querySelectorAll('[data-parallax]');
  window.addEventListener('scroll', function () {
    var offset = window.pageYOffset;
    parallax.forEach(function (el) {
      var speed = parseFloat(el.getAttribute('data-parallax')) || 0;
      el.style.transform = 'translateY(' + offset * speed + 'px)';
    });
  }, { passive: true });
});
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn theme() -> ThemeConfig {
        catalog::find_template("developer-focus").unwrap().default_scheme()
    }

    #[test]
    fn test_inline_document_has_theme_variables() {
        let theme = theme();
        let doc = render_document(&DocumentParts {
            title: "Jane <Dev>",
            description: "",
            keywords: &[],
            theme: &theme,
            body: "<p>body</p>",
            stylesheet: StylesheetMode::Inline,
        });
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Jane &lt;Dev&gt;</title>"));
        assert!(doc.contains("--color-primary: #22c55e;"));
        assert!(doc.contains("<p>body</p>"));
        assert!(!doc.contains(STYLESHEET_PATH));
        assert!(!doc.contains("name=\"description\""));
        assert!(doc.contains(r##"document.querySelectorAll('a[href^="#"]')"##));
        assert!(doc.trim_end().ends_with("});\n</script>\n</body>\n</html>"));
    }

    #[test]
    fn test_linked_document_references_stylesheet() {
        let theme = theme();
        let doc = render_document(&DocumentParts {
            title: "t",
            description: "d",
            keywords: &["rust".to_string()],
            theme: &theme,
            body: "",
            stylesheet: StylesheetMode::Linked,
        });
        assert!(doc.contains("href=\"styles/main.css\""));
        assert!(!doc.contains("--color-primary"));
        assert!(doc.contains("content=\"rust\""));
    }

    #[test]
    fn test_css_values_cannot_break_out() {
        let mut theme = theme();
        theme.colors.primary = "red;}</style><script>".to_string();
        let css = theme_stylesheet(&theme);
        assert!(!css.contains("</style>"));
        assert!(css.contains("--color-primary: red/stylescript;"));
    }

    #[test]
    fn test_google_fonts_dedupes_families() {
        let href = google_fonts_href(&theme()).unwrap();
        assert_eq!(href.matches("JetBrains+Mono").count(), 1);
        assert!(href.contains("family=Inter"));
    }
}
