//! Front-matter block parsing.
//!
//! The block is a small YAML-like subset: `key: value`, `key:` opening a list, and `- item`
//! lines appending to the most recently opened list.

use std::collections::BTreeMap;

use crate::foundation::error::{FolioError, FolioResult};

const FENCE: &str = "---";

/// Value of one front-matter key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrontValue {
    /// `key: value`
    Scalar(String),
    /// `key:` followed by `- item` lines.
    List(Vec<String>),
}

/// Parsed front-matter keys.
pub type FrontMatter = BTreeMap<String, FrontValue>;

/// A document split into its metadata block and body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitDocument {
    /// Lines between the fences, `\n`-joined.
    pub block: String,
    /// Body after the closing fence, trimmed.
    pub body: String,
    /// 1-based document line of the first block line.
    pub block_first_line: usize,
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}

/// Split `raw` into front matter and body.
///
/// The first line must be `---`; the block ends at the next line consisting of `---`.
pub fn split_document(raw: &str, document: &str) -> FolioResult<SplitDocument> {
    let normalized = raw.replace("\r\n", "\n");
    let text = normalized
        .strip_prefix('\u{feff}')
        .unwrap_or(normalized.as_str());

    let mut lines = text.split('\n');
    match lines.next() {
        Some(first) if is_fence(first) => {}
        _ => {
            return Err(FolioError::document(
                document,
                None,
                "missing or invalid front matter (expected opening `---`)",
            ));
        }
    }

    let mut block = Vec::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if is_fence(line) {
            closed = true;
            break;
        }
        block.push(line);
    }
    if !closed {
        return Err(FolioError::document(
            document,
            None,
            "missing or invalid front matter (no closing `---`)",
        ));
    }

    let body: Vec<&str> = lines.collect();
    Ok(SplitDocument {
        block: block.join("\n"),
        body: body.join("\n").trim().to_owned(),
        block_first_line: 2,
    })
}

/// Strip one layer of matching single or double quotes.
pub fn parse_scalar(value: &str) -> String {
    let t = value.trim();
    let quoted = t.len() >= 2
        && ((t.starts_with('"') && t.ends_with('"')) || (t.starts_with('\'') && t.ends_with('\'')));
    if quoted {
        t[1..t.len() - 1].to_owned()
    } else {
        t.to_owned()
    }
}

/// Read a flow-style list (`[a, "b"]`). Returns `None` when `value` is not bracketed.
///
/// The block parser never applies this; callers expecting a list opt in per key.
pub fn parse_flow_list(value: &str) -> Option<Vec<String>> {
    let inner = value.trim().strip_prefix('[')?.strip_suffix(']')?;
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }
    Some(inner.split(',').map(parse_scalar).collect())
}

fn split_key(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(':')?;
    let key = key.trim_end();
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then_some((key, rest.trim()))
}

/// Parse the lines of a front-matter block.
///
/// `first_line` is the document line number of the block's first line and is only used for
/// error messages.
pub fn parse_front_matter(block: &str, document: &str, first_line: usize) -> FolioResult<FrontMatter> {
    let mut out = FrontMatter::new();
    let mut open_list: Option<String> = None;

    for (idx, line) in block.split('\n').enumerate() {
        let line_no = first_line + idx;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ") {
            let Some(key) = open_list.as_ref() else {
                return Err(FolioError::document(
                    document,
                    Some(line_no),
                    "list item outside of a list key",
                ));
            };
            if let Some(FrontValue::List(items)) = out.get_mut(key) {
                items.push(parse_scalar(item));
            }
            continue;
        }

        let Some((key, value)) = split_key(trimmed) else {
            return Err(FolioError::document(
                document,
                Some(line_no),
                format!("invalid front matter line \"{line}\""),
            ));
        };

        if value.is_empty() {
            out.insert(key.to_owned(), FrontValue::List(Vec::new()));
            open_list = Some(key.to_owned());
            continue;
        }

        out.insert(key.to_owned(), FrontValue::Scalar(parse_scalar(value)));
        open_list = None;
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/posts/frontmatter.rs"]
mod tests;
