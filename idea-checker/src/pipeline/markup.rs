//! Markup stripping for user-facing text
//!
//! Search descriptions carry `<strong>` highlights and HTML entities; model
//! output occasionally carries tags too.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&#x27;", "'"),
    ("&apos;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    // Last, so "&amp;lt;" decodes to "&lt;" and not "<"
    ("&amp;", "&"),
];

/// Remove tags, decode common entities and collapse whitespace
pub fn strip_markup(text: &str) -> String {
    let without_tags = TAG_RE.replace_all(text, " ");
    let decoded = ENTITIES
        .iter()
        .fold(without_tags.into_owned(), |acc, (entity, plain)| {
            acc.replace(entity, plain)
        });
    WHITESPACE_RE.replace_all(decoded.trim(), " ").into_owned()
}
