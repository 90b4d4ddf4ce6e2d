//! Context-aware escaping.
//!
//! Every value interpolated into markup goes through [`escape`] with the
//! context of its output position. The rich-text context is the one
//! deliberate bypass of full escaping and is only ever fed the two settings
//! fields `welcome_text` and `vacation_text`.

use tracing::warn;
use url::Url;

/// Output position a value is being interpolated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeContext {
    /// Element text content.
    Text,
    /// Quoted attribute value.
    Attribute,
    /// URL-valued attribute (`href`, `src`).
    Url,
    /// Restricted rich text (allow-listed tags, everything else stripped).
    RichText,
}

/// Escape `value` for the given output context.
pub fn escape(value: &str, context: EscapeContext) -> String {
    match context {
        EscapeContext::Text => escape_text(value),
        EscapeContext::Attribute => escape_attr(value),
        EscapeContext::Url => escape_url(value),
        EscapeContext::RichText => sanitize_rich_text(value),
    }
}

/// Neutralize markup-significant characters for element text.
pub fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Neutralize markup-significant characters for a quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Schemes a URL value may carry.
const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Validate and normalize a URL, or resolve to an empty string.
///
/// Unparseable input and disallowed schemes (`javascript:`, `data:`, …)
/// never propagate; the caller renders the neutral empty value instead.
pub fn escape_url(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match Url::parse(trimmed) {
        Ok(url) if ALLOWED_SCHEMES.contains(&url.scheme()) => url.to_string(),
        Ok(url) => {
            warn!(scheme = url.scheme(), "dropping URL with disallowed scheme");
            String::new()
        }
        Err(err) => {
            warn!(%err, "dropping unparseable URL");
            String::new()
        }
    }
}

/// Tags the rich-text contexts may keep. Anchors additionally keep a
/// URL-validated `href`; every other attribute is dropped.
const ALLOWED_TAGS: [&str; 11] = [
    "p", "br", "strong", "em", "b", "i", "u", "ul", "ol", "li", "a",
];

/// Strip rich text down to the allow-listed tag set.
///
/// Disallowed tags are removed entirely (their text content remains, as
/// escaped text). Text nodes are escaped, but entities that are already
/// encoded (`&amp;`, `&#8230;`, …) are preserved rather than
/// double-escaped.
pub fn sanitize_rich_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => {
                // Only letters or '/' right after '<' start a tag; anything
                // else ("1 < 2") is plain text.
                let tag_like = matches!(
                    bytes.get(i + 1),
                    Some(b) if b.is_ascii_alphabetic() || *b == b'/'
                );
                match bytes[i + 1..].iter().position(|b| *b == b'>') {
                    Some(offset) if tag_like => {
                        let inner = &value[i + 1..i + 1 + offset];
                        push_tag(&mut out, inner);
                        i += offset + 2;
                    }
                    _ => {
                        out.push_str("&lt;");
                        i += 1;
                    }
                }
            }
            b'&' => {
                let len = encoded_entity_len(&value[i..]);
                if len > 0 {
                    out.push_str(&value[i..i + len]);
                    i += len;
                } else {
                    out.push_str("&amp;");
                    i += 1;
                }
            }
            b'>' => {
                out.push_str("&gt;");
                i += 1;
            }
            _ => {
                let ch = value[i..].chars().next().expect("in-bounds char");
                out.push(ch);
                i += ch.len_utf8();
            }
        }
    }
    out
}

/// Emit the sanitized form of one tag body (the text between `<` and `>`),
/// or nothing when the tag is not allow-listed.
fn push_tag(out: &mut String, inner: &str) {
    let inner = inner.trim().trim_end_matches('/').trim_end();
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest.trim()),
        None => (false, inner),
    };
    let name_end = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    let name = inner[..name_end].to_ascii_lowercase();
    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return;
    }
    if name == "br" {
        if !closing {
            out.push_str("<br>");
        }
        return;
    }
    if closing {
        out.push_str("</");
        out.push_str(&name);
        out.push('>');
        return;
    }
    if name == "a" {
        let href = attr_value(&inner[name_end..], "href")
            .map(|raw| escape_url(&raw))
            .unwrap_or_default();
        if href.is_empty() {
            out.push_str("<a>");
        } else {
            out.push_str("<a href=\"");
            out.push_str(&escape_attr(&href));
            out.push_str("\">");
        }
        return;
    }
    out.push('<');
    out.push_str(&name);
    out.push('>');
}

/// Extract a named attribute value from a raw tag-attribute string.
fn attr_value(attrs: &str, name: &str) -> Option<String> {
    let lower = attrs.to_ascii_lowercase();
    let mut search = 0;
    while let Some(pos) = lower[search..].find(name) {
        let at = search + pos;
        // Must be a standalone attribute name.
        let preceded_ok = at == 0
            || lower.as_bytes()[at - 1].is_ascii_whitespace();
        let after = at + name.len();
        let rest = lower[after..].trim_start();
        if preceded_ok && rest.starts_with('=') {
            let value_start = after + (lower[after..].len() - rest.len()) + 1;
            let raw = attrs[value_start..].trim_start();
            let value = match raw.as_bytes().first() {
                Some(b'"') => raw[1..].split('"').next(),
                Some(b'\'') => raw[1..].split('\'').next(),
                Some(_) => raw.split_ascii_whitespace().next(),
                None => None,
            };
            return value.map(str::to_string);
        }
        search = after;
    }
    None
}

/// Length of an already-encoded entity at the start of `s`, or 0.
fn encoded_entity_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    debug_assert_eq!(bytes[0], b'&');
    let body = &bytes[1..];
    let numeric = body.first() == Some(&b'#');
    let start = if numeric { 1 } else { 0 };
    for (i, b) in body.iter().enumerate().skip(start).take(32) {
        match *b {
            b';' if i > start => return i + 2,
            b if b.is_ascii_alphanumeric() => continue,
            _ => return 0,
        }
    }
    0
}
