//! Plain-text excerpts from lightweight markup.

/// Character budget for generated excerpts.
pub const EXCERPT_LIMIT: usize = 220;

/// Appended when an excerpt is shortened.
pub const ELLIPSIS: char = '…';

/// Use `explicit` when it has content, otherwise derive an excerpt from `content`.
pub fn create_excerpt(content: &str, explicit: Option<&str>, limit: usize) -> String {
    if let Some(e) = explicit.map(str::trim).filter(|e| !e.is_empty()) {
        return e.to_owned();
    }
    truncate_words(&strip_markup(content), limit)
}

/// Remove markup syntax and collapse whitespace.
///
/// Code fences are dropped with their contents, images are dropped, links keep their text, and
/// quote/heading/bullet/emphasis/inline-code markers and horizontal rules disappear.
pub fn strip_markup(content: &str) -> String {
    let mut parts = Vec::new();
    let mut in_fence = false;

    for line in content.lines() {
        let mut l = line.trim();
        if l.starts_with("```") || l.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        while let Some(rest) = l.strip_prefix('>') {
            l = rest.trim_start();
        }
        if is_rule(l) {
            continue;
        }
        l = strip_bullet(strip_heading(l));
        parts.push(strip_inline(l));
    }

    normalize_spacing(&parts.join(" "))
}

fn is_rule(line: &str) -> bool {
    let mut marker = None;
    let mut n = 0;
    for c in line.chars().filter(|c| !c.is_whitespace()) {
        match (marker, c) {
            (_, '-' | '*' | '_') if marker.is_none() || marker == Some(c) => {
                marker = Some(c);
                n += 1;
            }
            _ => return false,
        }
    }
    n >= 3
}

fn strip_heading(line: &str) -> &str {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return line;
    }
    let rest = &line[hashes..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        rest.trim_start()
    } else {
        line
    }
}

fn strip_bullet(line: &str) -> &str {
    for bullet in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest.trim_start();
        }
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return rest.trim_start();
        }
    }
    line
}

fn find_from(chars: &[char], from: usize, target: char) -> Option<usize> {
    chars[from..]
        .iter()
        .position(|c| *c == target)
        .map(|p| p + from)
}

/// `[text](url)` starting at `open`: returns `(text_end, url_end)` indices of `]` and `)`.
fn link_span(chars: &[char], open: usize) -> Option<(usize, usize)> {
    let close = find_from(chars, open + 1, ']')?;
    if chars.get(close + 1) != Some(&'(') {
        return None;
    }
    let end = find_from(chars, close + 2, ')')?;
    Some((close, end))
}

fn strip_inline(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '!' if chars.get(i + 1) == Some(&'[') => {
                if let Some((_, end)) = link_span(&chars, i + 1) {
                    i = end + 1;
                    continue;
                }
                out.push(c);
            }
            '[' => {
                if let Some((close, end)) = link_span(&chars, i) {
                    let text: String = chars[i + 1..close].iter().collect();
                    out.push_str(&strip_inline(&text));
                    i = end + 1;
                    continue;
                }
                out.push(c);
            }
            '`' | '*' | '~' => {}
            '_' => {
                let inside_word = i > 0
                    && chars[i - 1].is_alphanumeric()
                    && chars.get(i + 1).is_some_and(|n| n.is_alphanumeric());
                if inside_word {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
        i += 1;
    }
    out
}

fn normalize_spacing(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(collapsed.len());
    for c in collapsed.chars() {
        if matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | ')') && out.ends_with(' ') {
            out.pop();
        }
        out.push(c);
    }
    out
}

/// Shorten to at most `limit` characters on a word boundary, then append [`ELLIPSIS`].
///
/// A single word longer than `limit` is cut hard.
pub fn truncate_words(text: &str, limit: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= limit {
        return text.to_owned();
    }

    let cut = if chars[limit].is_whitespace() {
        limit
    } else {
        chars[..limit]
            .iter()
            .rposition(|c| c.is_whitespace())
            .filter(|&p| p > 0)
            .unwrap_or(limit)
    };

    let head: String = chars[..cut].iter().collect();
    let mut out = head
        .trim_end()
        .trim_end_matches([',', ';', ':'])
        .to_owned();
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/posts/excerpt.rs"]
mod tests;
