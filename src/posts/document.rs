use crate::foundation::error::{FolioError, FolioResult};
use crate::posts::date::parse_date_millis;
use crate::posts::excerpt::{EXCERPT_LIMIT, create_excerpt};
use crate::posts::frontmatter::{
    FrontMatter, FrontValue, parse_flow_list, parse_front_matter, split_document,
};
use crate::posts::model::{Post, PostEntry};
use crate::posts::slug::{create_slug, fallback_slug};

fn required_string(fm: &FrontMatter, key: &str, document: &str) -> FolioResult<String> {
    match fm.get(key) {
        Some(FrontValue::Scalar(v)) if !v.trim().is_empty() => Ok(v.trim().to_owned()),
        Some(FrontValue::List(_)) => Err(FolioError::document(
            document,
            None,
            format!("front matter `{key}` must be a non-empty string, found a list"),
        )),
        _ => Err(FolioError::document(
            document,
            None,
            format!("front matter `{key}` must be a non-empty string"),
        )),
    }
}

fn optional_string<'a>(fm: &'a FrontMatter, key: &str) -> Option<&'a str> {
    match fm.get(key) {
        Some(FrontValue::Scalar(v)) => Some(v.as_str()),
        _ => None,
    }
}

fn required_tags(fm: &FrontMatter, document: &str) -> FolioResult<Vec<String>> {
    let items = match fm.get("tags") {
        Some(FrontValue::List(items)) => items.clone(),
        Some(FrontValue::Scalar(value)) => parse_flow_list(value).ok_or_else(|| {
            FolioError::document(document, None, "front matter `tags` must be a list of strings")
        })?,
        None => {
            return Err(FolioError::document(
                document,
                None,
                "front matter `tags` is missing",
            ));
        }
    };

    if items.is_empty() {
        return Err(FolioError::document(
            document,
            None,
            "front matter `tags` needs at least one tag",
        ));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, tag)| {
            let tag = tag.trim();
            if tag.is_empty() {
                Err(FolioError::document(
                    document,
                    None,
                    format!("front matter `tags[{i}]` must be a non-empty string"),
                ))
            } else {
                Ok(tag.to_owned())
            }
        })
        .collect()
}

/// Parse one source document into a post.
///
/// `path` names the document in errors and feeds the filename slug fallback.
pub(crate) fn parse_post(path: &str, raw: &str) -> FolioResult<PostEntry> {
    let split = split_document(raw, path)?;
    let fm = parse_front_matter(&split.block, path, split.block_first_line)?;

    let tags = required_tags(&fm, path)?;
    let title = required_string(&fm, "title", path)?;
    let category = required_string(&fm, "category", path)?;
    let author = required_string(&fm, "author", path)?;
    let date = required_string(&fm, "date", path)?;
    let duration = required_string(&fm, "duration", path)?;
    if split.body.is_empty() {
        return Err(FolioError::document(path, None, "post body is empty"));
    }

    let fallback = fallback_slug(path);
    let slug = create_slug(optional_string(&fm, "slug"), fallback.as_deref(), &title);
    if slug.is_empty() {
        return Err(FolioError::document(
            path,
            None,
            "could not derive a slug from `slug`, the file name, or `title`",
        ));
    }
    let excerpt = create_excerpt(&split.body, optional_string(&fm, "excerpt"), EXCERPT_LIMIT);
    let sort_key = parse_date_millis(&date);

    Ok(PostEntry {
        post: Post {
            title,
            category,
            tags,
            author,
            date,
            duration,
            content: split.body,
            slug,
            excerpt,
        },
        sort_key,
        source: path.to_owned(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/posts/document.rs"]
mod tests;
