//! Pages: per-entry requests, their i18n context, localized 404s.

mod context;
mod not_found;
mod request;

pub use context::{HrefLang, I18nContext, PageContext, hreflang_links, routes_for_locale};
pub use not_found::{NOT_FOUND_SLUG, register_not_found};
pub use request::{PageRequest, page_requests};

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
