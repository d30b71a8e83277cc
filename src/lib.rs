//! Folio is the core of a portfolio site: an animated pixel-field background and a blog post index.
//!
//! Two independent halves share the foundation types:
//!
//! - [`PixelField`] mounts a [`FieldRenderer`] on a [`FieldHost`], draws a pointer-reactive dot grid
//!   into a premultiplied RGBA [`Surface`], and pauses itself while hidden or when reduced motion is
//!   requested. [`SimHost`] drives it deterministically off a virtual clock.
//! - [`PostStore`] ingests front-matter documents into date-sorted [`Post`] records and answers
//!   listing, lookup and search queries with owned copies.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod field;
mod foundation;
mod posts;

pub use crate::foundation::color::{ColorDef, Hsl};
pub use crate::foundation::core::{Canvas, Fps, Point, Rect, Rgba8Premul, Size, Vec2};
pub use crate::foundation::error::{FolioError, FolioResult};

pub use crate::field::config::{Background, FieldConfig};
pub use crate::field::grid::{Anchor, AnchorGrid};
pub use crate::field::host::{FieldHost, FrameRequestId, HostEvent, SubscriptionId, Topic};
pub use crate::field::mount::PixelField;
pub use crate::field::renderer::{ContainerMetrics, FieldRenderer};
pub use crate::field::shade::{FrameParams, ShadedDot, Zone, shade_dot};
pub use crate::field::sim::SimHost;
pub use crate::field::surface::Surface;

pub use crate::posts::date::parse_date_millis;
pub use crate::posts::excerpt::{ELLIPSIS, EXCERPT_LIMIT, create_excerpt, strip_markup};
pub use crate::posts::frontmatter::{
    FrontMatter, FrontValue, SplitDocument, parse_flow_list, parse_front_matter, split_document,
};
pub use crate::posts::model::Post;
pub use crate::posts::slug::{create_slug, fallback_slug, normalize_slug};
pub use crate::posts::store::{DEFAULT_RECENT_COUNT, PostQuery, PostStore};
