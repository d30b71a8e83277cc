use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use include_dir::{Dir, include_dir};

use crate::foundation::error::{FolioError, FolioResult};
use crate::posts::document::parse_post;
use crate::posts::model::{Post, PostEntry};

static BUNDLED: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/content/posts");

/// Number of posts shown by the "recent" listing when no count is given.
pub const DEFAULT_RECENT_COUNT: usize = 6;

/// Combined listing filter: category match AND free-text search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostQuery {
    /// Exact category; `None` matches every post.
    pub category: Option<String>,
    /// Free-text search; `None` or blank matches every post.
    pub search: Option<String>,
}

/// Immutable, date-sorted post registry.
///
/// Built once from a fixed content set. Every query hands back owned copies.
#[derive(Clone, Debug, Default)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    /// Parse every `(path, raw)` document. The first malformed document aborts ingestion.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn from_documents<I, P, R>(documents: I) -> FolioResult<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: AsRef<str>,
    {
        let mut entries = documents
            .into_iter()
            .map(|(path, raw)| parse_post(path.as_ref(), raw.as_ref()))
            .collect::<FolioResult<Vec<PostEntry>>>()?;

        // Stable: equal keys keep input order, missing dates go last.
        entries.sort_by(|a, b| match (a.sort_key, b.sort_key) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.sort_key.is_none() {
                tracing::debug!(source = %entry.source, date = %entry.post.date, "unparseable post date");
            }
            if !seen.insert(entry.post.slug.as_str()) {
                tracing::warn!(
                    slug = %entry.post.slug,
                    source = %entry.source,
                    "duplicate post slug; lookups return the newer post"
                );
            }
        }

        let posts: Vec<Post> = entries.into_iter().map(|e| e.post).collect();
        tracing::debug!(count = posts.len(), "post store built");
        Ok(Self { posts })
    }

    /// Load every `*.md` file directly inside `dir`, in file-name order.
    pub fn load_dir(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref();
        let mut paths = std::fs::read_dir(dir)
            .with_context(|| format!("read content dir {}", dir.display()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("list content dir {}", dir.display()))?;
        paths.retain(|p| p.is_file() && p.extension().is_some_and(|e| e == "md"));
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("read post {}", path.display()))?;
            documents.push((path.display().to_string(), raw));
        }
        Ok(Self::from_documents(documents)?)
    }

    /// The content set compiled into the crate.
    pub fn bundled() -> FolioResult<Self> {
        Self::from_embedded(&BUNDLED)
    }

    /// Ingest every `*.md` file directly inside an embedded directory, in path order.
    ///
    /// A file that is not valid UTF-8 fails ingestion like any other malformed document.
    pub(crate) fn from_embedded(dir: &Dir<'_>) -> FolioResult<Self> {
        let mut documents = dir
            .files()
            .filter(|f| f.path().extension().is_some_and(|e| e == "md"))
            .map(|f| {
                let path = f.path().to_string_lossy().into_owned();
                match f.contents_utf8() {
                    Some(raw) => Ok((path, raw)),
                    None => Err(FolioError::document(path, None, "not valid UTF-8")),
                }
            })
            .collect::<FolioResult<Vec<(String, &str)>>>()?;
        documents.sort_by(|a, b| a.0.cmp(&b.0));
        Self::from_documents(documents)
    }

    /// Number of posts.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether the store holds no posts.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// All posts, newest first.
    pub fn all_posts(&self) -> Vec<Post> {
        self.posts.clone()
    }

    /// The `n` newest posts.
    pub fn recent_posts(&self, n: usize) -> Vec<Post> {
        self.posts.iter().take(n).cloned().collect()
    }

    /// Post with exactly this slug.
    pub fn post_by_slug(&self, slug: &str) -> Option<Post> {
        self.posts.iter().find(|p| p.slug == slug).cloned()
    }

    /// Posts in exactly this category, newest first.
    pub fn posts_by_category(&self, category: &str) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over title, category, author, content and tags.
    ///
    /// A blank query returns every post.
    pub fn search_posts(&self, query: &str) -> Vec<Post> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.all_posts();
        }
        self.posts
            .iter()
            .filter(|p| p.haystack().contains(&needle))
            .cloned()
            .collect()
    }

    /// Distinct categories in order of first appearance among sorted posts.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.posts
            .iter()
            .filter(|&p| seen.insert(p.category.as_str()))
            .map(|p| p.category.clone())
            .collect()
    }

    /// Apply a combined category and search filter.
    pub fn query(&self, query: &PostQuery) -> Vec<Post> {
        let needle = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        self.posts
            .iter()
            .filter(|p| query.category.as_deref().is_none_or(|c| p.category == c))
            .filter(|p| needle.as_deref().is_none_or(|n| p.haystack().contains(n)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/posts/store.rs"]
mod tests;
