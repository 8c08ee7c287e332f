//! `[content]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [content]
//! paths = ["src/pages", "src/content"]  # Content roots, first match wins
//! exclude = ["/admin/"]                 # Route ids that are never localized
//! template_name = "tpl.tsx"             # Per-directory template file name
//! templates_dir = "src/templates"       # Where `template = "..."` is looked up
//! untranslated_component = "src/templates/untranslated.tsx"
//! slug_key = "slug"                     # Frontmatter key overriding the slug
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::core::normalize_url_path;
use crate::utils::path::normalize_path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content roots (relative to project root until finalized).
    pub paths: Vec<PathBuf>,

    /// Route ids excluded from localization.
    pub exclude: Vec<String>,

    /// File name of a directory template.
    pub template_name: String,

    /// Directory holding named templates.
    pub templates_dir: PathBuf,

    /// Component rendered for untranslated routes.
    pub untranslated_component: Option<PathBuf>,

    /// Frontmatter key overriding the slug.
    pub slug_key: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            paths: vec!["src/pages".into(), "src/content".into()],
            exclude: Vec::new(),
            template_name: "tpl.tsx".to_string(),
            templates_dir: "src/templates".into(),
            untranslated_component: None,
            slug_key: "slug".to_string(),
        }
    }
}

impl ContentConfig {
    pub const FIELD_PATHS: FieldPath = FieldPath::new("content", "paths");
    pub const FIELD_TEMPLATE_NAME: FieldPath = FieldPath::new("content", "template_name");
    pub const FIELD_UNTRANSLATED: FieldPath = FieldPath::new("content", "untranslated_component");

    /// Resolve every path against `root`.
    pub fn normalize(&mut self, root: &Path) {
        self.paths = self
            .paths
            .iter()
            .map(|p| normalize_path(&root.join(p)))
            .collect();
        self.templates_dir = normalize_path(&root.join(&self.templates_dir));
        if let Some(component) = self.untranslated_component.take() {
            self.untranslated_component = Some(normalize_path(&root.join(component)));
        }
        self.exclude = self.exclude.iter().map(|e| normalize_url_path(e)).collect();
    }

    /// Whether a route id is excluded from localization.
    pub fn is_excluded(&self, route_id: &str) -> bool {
        self.exclude.iter().any(|e| e == route_id)
    }

    /// Base name of the template file without its extension (`tpl`).
    pub fn template_stem(&self) -> &str {
        self.template_name
            .split_once('.')
            .map_or(self.template_name.as_str(), |(stem, _)| stem)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.paths.is_empty() {
            diag.error(Self::FIELD_PATHS, "at least one content path is required");
        }
        for path in &self.paths {
            if !path.exists() {
                diag.warn(
                    Self::FIELD_PATHS,
                    format!("directory '{}' not found, skipping", path.display()),
                );
            }
        }

        if self.template_name.is_empty() || self.template_name.contains('/') {
            diag.error(
                Self::FIELD_TEMPLATE_NAME,
                format!("`{}` is not a file name", self.template_name),
            );
        }

        if let Some(component) = &self.untranslated_component
            && !component.exists()
        {
            diag.warn(
                Self::FIELD_UNTRANSLATED,
                format!("'{}' does not exist yet", component.display()),
            );
        }
    }
}
