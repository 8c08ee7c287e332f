//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "public/i18n-pages.json"  # Page manifest consumed by the renderer
//! cache = ".i18n/cache"              # Route table handoff between phases
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::path::normalize_path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Page manifest path.
    pub output: PathBuf,

    /// Cache directory.
    pub cache: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "public/i18n-pages.json".into(),
            cache: ".i18n/cache".into(),
        }
    }
}

impl BuildConfig {
    pub fn normalize(&mut self, root: &Path) {
        self.output = normalize_path(&root.join(&self.output));
        self.cache = normalize_path(&root.join(&self.cache));
    }
}
