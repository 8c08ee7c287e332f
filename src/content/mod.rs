//! Content files: discovery, frontmatter, doc-comment slugs and route
//! registrations.

mod comment;
mod frontmatter;
mod item;
mod scan;

pub use comment::{SlugOverride, slugs_from_comment};
pub use frontmatter::{Frontmatter, LocaleBlock};
pub use item::{ContentItem, DeriveContext, Derivation, FileItem, MarkdownItem, Registration};
pub use scan::scan_content;
