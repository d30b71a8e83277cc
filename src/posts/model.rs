use serde::Serialize;

/// A validated blog post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Post title.
    pub title: String,
    /// Single category used for filtering.
    pub category: String,
    /// Tags in document order; never empty.
    pub tags: Vec<String>,
    /// Author name.
    pub author: String,
    /// Date exactly as written in the front matter.
    pub date: String,
    /// Free-form reading time label.
    pub duration: String,
    /// Markup body.
    pub content: String,
    /// URL path segment identifying the post.
    pub slug: String,
    /// Plain-text summary.
    pub excerpt: String,
}

impl Post {
    /// Lowercased text searched by [`crate::PostStore::search_posts`].
    pub(crate) fn haystack(&self) -> String {
        let tags = self.tags.join(" ");
        [
            self.title.as_str(),
            self.category.as_str(),
            self.author.as_str(),
            self.content.as_str(),
            tags.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}

/// A parsed post plus what the store needs to order it.
#[derive(Clone, Debug)]
pub(crate) struct PostEntry {
    pub(crate) post: Post,
    pub(crate) sort_key: Option<i64>,
    pub(crate) source: String,
}
