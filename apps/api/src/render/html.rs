/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Returns an escaped URL when its scheme is safe to place in `href`/`src`.
/// Relative paths and fragments pass; `javascript:` and friends are dropped.
pub fn safe_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    if url.is_empty() {
        return None;
    }
    let lower = url.to_ascii_lowercase();
    let allowed = ["http://", "https://", "mailto:", "tel:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme));
    let relative = !lower.contains(':') || lower.starts_with('/') || lower.starts_with('#');
    (allowed || relative).then(|| escape(url))
}

/// Growable HTML buffer with small helpers for the repetitive bits.
pub struct Html {
    buf: String,
}

impl Html {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(16 * 1024),
        }
    }

    pub fn push(&mut self, s: impl AsRef<str>) {
        self.buf.push_str(s.as_ref());
    }

    /// `<tag class="...">escaped text</tag>`
    pub fn text(&mut self, tag: &str, class: &str, text: &str) {
        self.buf.push_str(&format!(
            "<{tag} class=\"{class}\">{}</{tag}>",
            escape(text)
        ));
    }

    /// Like [`Html::text`] but skips empty or missing values.
    pub fn text_opt(&mut self, tag: &str, class: &str, text: Option<&str>) {
        if let Some(t) = text.filter(|t| !t.trim().is_empty()) {
            self.text(tag, class, t);
        }
    }

    /// External link opened in a new tab; nothing is written for unsafe URLs.
    pub fn link(&mut self, href: &str, class: &str, label: &str) {
        if let Some(url) = safe_url(href) {
            self.buf.push_str(&format!(
                "<a href=\"{url}\" class=\"{class}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                escape(label)
            ));
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
