//! Locale-aware route tables for static sites.
//!
//! Content files are turned into a `route id → locale → entry` table;
//! missing translations get fallback entries, and the table yields the
//! redirects and page requests a host needs to publish a multilingual site.
//!
//! ```text
//! content/ ─► content::ContentItem ─► route::RouteTable ─► route::FallbackGenerator
//!                                            │
//!                                            ├─► route::RedirectPlanner ─► _redirects
//!                                            └─► page::PageRequest     ─► pipeline::Actions
//! ```

pub mod cache;
pub mod cli;
pub mod component;
pub mod config;
pub mod content;
pub mod core;
pub mod logger;
pub mod messages;
pub mod page;
pub mod pipeline;
pub mod route;
pub mod utils;
