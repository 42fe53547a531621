//! Markdown Rendering
//!
//! Advisor replies arrive as markdown. They are rendered to HTML for
//! `inner_html`, so raw HTML in the reply is escaped and link targets are
//! limited to web and mail URLs.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Render markdown to HTML that is safe to inject
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Keep relative, http(s) and mailto targets; anything else with a scheme becomes `#`
fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let lower = url.trim().to_ascii_lowercase();
    let allowed = ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme));

    if allowed || !lower.contains(':') {
        url
    } else {
        CowStr::Borrowed("#")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_formatting() {
        let html = render_markdown("Try **deep breathing**.\n\n- walk\n- rest");
        assert!(html.contains("<strong>deep breathing</strong>"));
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>walk</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("hello <img src=x onerror=alert(1)>\n\n<script>alert(1)</script>");
        assert!(!html.contains("<script"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_are_neutralised() {
        let html = render_markdown("[click](javascript:alert(1))");
        assert!(html.contains(r##"href="#""##));
        assert!(!html.contains("javascript"));

        let html = render_markdown("[help](https://988lifeline.org)");
        assert!(html.contains(r#"href="https://988lifeline.org""#));
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(render_markdown("Take care."), "<p>Take care.</p>\n");
    }
}
