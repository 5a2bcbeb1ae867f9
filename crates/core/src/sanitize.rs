//! Sanitizers for remote-supplied content.
//!
//! Ticket and reply bodies arrive as markup from the remote system and
//! are stored as sanitized HTML; titles are reduced to plain text.

use std::collections::HashSet;
use std::sync::LazyLock;

use ammonia::Builder;

static RICH_TEXT: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut b = Builder::new();

    // Keep anchors as the remote sent them; rel injection would rewrite
    // stored content.
    b.link_rel(None);

    b.tags(
        [
            "a",
            "b",
            "blockquote",
            "br",
            "code",
            "div",
            "em",
            "h1",
            "h2",
            "h3",
            "h4",
            "h5",
            "h6",
            "hr",
            "i",
            "img",
            "li",
            "ol",
            "p",
            "pre",
            "s",
            "span",
            "strong",
            "table",
            "tbody",
            "td",
            "th",
            "thead",
            "tr",
            "u",
            "ul",
        ]
        .into_iter()
        .collect::<HashSet<&'static str>>(),
    );

    b.clean_content_tags(["script", "style"].into_iter().collect::<HashSet<_>>());

    b.add_tag_attributes("a", &["href", "title"]);
    b.add_tag_attributes("img", &["src", "alt", "width", "height"]);

    b.url_schemes(["http", "https", "mailto"].into_iter().collect::<HashSet<_>>());

    b
});

static TAG_STRIPPER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut b = Builder::new();
    b.tags(HashSet::new());
    b
});

/// Sanitize a ticket or reply body: benign markup is kept, scripts,
/// styles, event handlers, and unsafe URL schemes are removed.
pub fn sanitize_rich_text(input: &str) -> String {
    RICH_TEXT.clean(input).to_string()
}

/// Reduce markup to plain text: strip every tag, decode basic entities,
/// and collapse whitespace runs. Used for ticket titles.
pub fn sanitize_plain_text(input: &str) -> String {
    let stripped = TAG_STRIPPER.clean(input).to_string();
    let decoded = decode_basic_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the entities the tag stripper re-encodes in text content.
/// Ampersand must be decoded last.
fn decode_basic_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

// ── Tests ────────────────────────────────────────────────────────────
