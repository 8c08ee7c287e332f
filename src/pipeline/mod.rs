//! Generation pass.
//!
//! ```text
//! begin_pass ─► load_items ─► ingest (rayon) ─► fill_fallbacks
//!            ─► plan_redirects ─► create_pages (Actions) ─► persist
//! ```

mod actions;
mod context;

pub use actions::{Actions, ManifestActions};
pub use context::{BuildContext, BuildSummary};
