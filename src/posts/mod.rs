pub(crate) mod date;
pub(crate) mod document;
pub(crate) mod excerpt;
pub(crate) mod frontmatter;
pub(crate) mod model;
pub(crate) mod slug;
pub(crate) mod store;
