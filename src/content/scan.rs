//! Content discovery.

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use crate::config::ContentConfig;
use crate::core::ContentKind;
use crate::utils::path::has_hidden_component;

/// Every content file under the configured roots, sorted and deduplicated.
///
/// Skipped: hidden entries, non-content files, template components.
pub fn scan_content(config: &ContentConfig) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = config
        .paths
        .iter()
        .filter(|root| root.is_dir())
        .flat_map(|root| {
            WalkDir::new(root)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(|e| e.path())
                .filter(move |path| is_content(root, path, config))
        })
        .collect();
    files.sort();
    files.dedup();
    files
}

fn is_content(root: &Path, path: &Path, config: &ContentConfig) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    if has_hidden_component(relative) || path.starts_with(&config.templates_dir) {
        return false;
    }
    match ContentKind::from_path(path) {
        Some(ContentKind::Component) => !is_template(path, config),
        Some(ContentKind::Markdown) => true,
        None => false,
    }
}

/// `tpl.tsx`, and its localized variants like `tpl.it.tsx`.
fn is_template(path: &Path, config: &ContentConfig) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .is_some_and(|stem| stem == config.template_stem())
}
