//! Deterministic, URL-safe post identifiers.

use std::path::Path;

/// Lowercase, collapse every run of non `[a-z0-9]` characters into one `-`, trim `-` at both ends.
pub fn normalize_slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }
    out
}

fn strip_date_prefix(stem: &str) -> &str {
    let b = stem.as_bytes();
    let shape = b.len() >= 11
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
        && b[10] == b'-';
    if shape { &stem[11..] } else { stem }
}

/// Slug candidate from a source path: file name without extension and `YYYY-MM-DD-` prefix.
///
/// Returns `None` when nothing usable remains after normalization.
pub fn fallback_slug(path: &str) -> Option<String> {
    let stem = Path::new(path).file_stem()?.to_str()?;
    let slug = normalize_slug(strip_date_prefix(stem));
    (!slug.is_empty()).then_some(slug)
}

/// Pick a post slug: explicit field, then filename fallback, then title.
pub fn create_slug(explicit: Option<&str>, fallback: Option<&str>, title: &str) -> String {
    [explicit, fallback]
        .into_iter()
        .flatten()
        .map(normalize_slug)
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| normalize_slug(title))
}

#[cfg(test)]
#[path = "../../tests/unit/posts/slug.rs"]
mod tests;
