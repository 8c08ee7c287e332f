//! `[redirects]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [redirects]
//! splat = true                 # Emit `/*` catch-all redirects per locale
//! not_found = true             # Emit localized 404 rules and pages
//! output = "public/_redirects" # Netlify-style redirects file
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::path::normalize_path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectsConfig {
    /// Emit catch-all redirects for hosts without SPA routing.
    pub splat: bool,

    /// Emit localized 404 rules.
    pub not_found: bool,

    /// Redirects file written by the build command.
    pub output: PathBuf,
}

impl Default for RedirectsConfig {
    fn default() -> Self {
        Self {
            splat: true,
            not_found: true,
            output: "public/_redirects".into(),
        }
    }
}

impl RedirectsConfig {
    pub fn normalize(&mut self, root: &Path) {
        self.output = normalize_path(&root.join(&self.output));
    }
}
