//! Core types - pure abstractions shared across the codebase.

mod category;
mod url;

pub use category::ContentKind;
pub use url::{UrlPath, normalize_url_path};
