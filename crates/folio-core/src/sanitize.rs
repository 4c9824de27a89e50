//! Whitelist sanitization for translation strings that carry markup.
//!
//! Translation content comes from configuration files and is trusted only
//! for a handful of inline formatting tags. Everything is escaped first,
//! then exactly these tags are re-enabled:
//! - `<strong>`, `<em>`, `<b>`, `<i>` (open and close)
//! - `<br>`

/// Inline tags that survive sanitization.
pub const ALLOWED_TAGS: &[&str] = &["strong", "em", "b", "i", "br"];

/// Escape text for insertion into HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Reverse of [`escape_html`] for the entities it produces, plus `&nbsp;`.
pub fn unescape_html(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Whether a translation string needs the markup path at all.
pub fn contains_markup(input: &str) -> bool {
    input.contains('<')
}

/// Escape everything, then re-enable [`ALLOWED_TAGS`] (case-insensitive).
///
/// Attributes are never allowed: `<strong class="x">` stays escaped.
pub fn sanitize_translation(input: &str) -> String {
    let mut safe = escape_html(input);
    for tag in ALLOWED_TAGS {
        safe = replace_ignore_ascii_case(&safe, &format!("&lt;{tag}&gt;"), &format!("<{tag}>"));
        safe = replace_ignore_ascii_case(&safe, &format!("&lt;/{tag}&gt;"), &format!("</{tag}>"));
    }
    safe
}

/// Remove every tag and decode entities, yielding visible text.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    unescape_html(&text)
}

fn replace_ignore_ascii_case(haystack: &str, needle: &str, replacement: &str) -> String {
    let lower = haystack.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    // ASCII lower-casing keeps byte offsets identical.
    for (start, _) in lower.match_indices(&needle) {
        out.push_str(&haystack[last..start]);
        out.push_str(replacement);
        last = start + needle.len();
    }
    out.push_str(&haystack[last..]);
    out
}
