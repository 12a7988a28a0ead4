/// Elements whose content is copied through untouched.
const PRESERVED: [&str; 3] = ["pre", "textarea", "script"];

/// Strips HTML comments, collapses whitespace runs to one space and drops
/// whitespace between tags. `<pre>`, `<textarea>` and `<script>` bodies are
/// kept verbatim.
pub fn minify_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        if rest.starts_with("<!--") {
            rest = match rest.find("-->") {
                Some(end) => &rest[end + 3..],
                None => "",
            };
            continue;
        }

        if let Some(tag) = preserved_tag(rest) {
            let end = preserved_end(rest, tag);
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }

        if c.is_whitespace() {
            let trimmed = rest.trim_start();
            let after_tag = out.is_empty() || out.ends_with('>');
            let before_tag = trimmed.is_empty() || trimmed.starts_with('<');
            if !(after_tag && before_tag) && !out.ends_with(' ') {
                out.push(' ');
            }
            rest = trimmed;
            continue;
        }

        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    // A space left before a dropped trailing comment or at the very end.
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

fn preserved_tag(rest: &str) -> Option<&'static str> {
    let name_start = rest.strip_prefix('<')?;
    PRESERVED.into_iter().find(|tag| {
        let Some(name) = name_start.get(..tag.len()) else {
            return false;
        };
        let boundary = name_start[tag.len()..]
            .chars()
            .next()
            .map_or(true, |c| c == '>' || c == '/' || c.is_whitespace());
        name.eq_ignore_ascii_case(tag) && boundary
    })
}

/// Byte offset just past the matching closing tag, or the end of input.
fn preserved_end(rest: &str, tag: &str) -> usize {
    // ASCII lowercasing keeps byte offsets aligned with `rest`.
    let lower = rest.to_ascii_lowercase();
    let close = format!("</{tag}");
    match lower.find(&close) {
        Some(start) => match lower[start..].find('>') {
            Some(gt) => start + gt + 1,
            None => rest.len(),
        },
        None => rest.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_comments_and_inter_tag_whitespace() {
        let html = "<div>\n  <p>Hello   world</p>\n  <!-- note -->\n</div>\n";
        assert_eq!(minify_html(html), "<div><p>Hello world</p></div>");
    }

    #[test]
    fn test_keeps_single_space_between_inline_text() {
        assert_eq!(
            minify_html("<span>a</span>\n  and <b>b</b>"),
            "<span>a</span> and <b>b</b>"
        );
        assert_eq!(minify_html("text <!-- x --> more"), "text more");
    }

    #[test]
    fn test_preserved_elements_are_verbatim() {
        let html = "<div>\n<PRE class=\"x\">  a\n    b  </PRE>\n<textarea>\n  keep </textarea></div>";
        assert_eq!(
            minify_html(html),
            "<div><PRE class=\"x\">  a\n    b  </PRE><textarea>\n  keep </textarea></div>"
        );
    }

    #[test]
    fn test_script_body_untouched() {
        let html = "<script>\n  var a = 1;   // keep\n</script>\n<p> x </p>";
        assert_eq!(
            minify_html(html),
            "<script>\n  var a = 1;   // keep\n</script><p> x </p>"
        );
    }

    #[test]
    fn test_similar_tag_names_are_not_preserved() {
        assert_eq!(minify_html("<preview>  a  </preview>"), "<preview> a </preview>");
    }

    #[test]
    fn test_unterminated_comment_drops_tail() {
        assert_eq!(minify_html("<p>a</p><!-- open"), "<p>a</p>");
    }
}
