//! `build` command.

use std::sync::Arc;

use anyhow::Result;

use crate::config::Options;
use crate::pipeline::{BuildContext, BuildSummary, ManifestActions};

/// Run one full pass and write the page manifest and `_redirects`.
pub fn build_routes(options: Arc<Options>) -> Result<BuildSummary> {
    let mut actions = ManifestActions::for_options(&options);
    let context = BuildContext::new(options);
    context.run(&mut actions)
}
