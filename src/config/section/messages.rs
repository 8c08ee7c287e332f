//! `[messages]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [messages]
//! path = "src/content/settings/i18n/messages"  # One catalog per locale
//! ensure = true                                # Create missing catalogs
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::path::normalize_path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Directory with `<locale>.toml` / `<locale>.json` catalogs.
    pub path: PathBuf,

    /// Create an empty catalog for every locale lacking one.
    pub ensure: bool,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            path: "src/content/settings/i18n/messages".into(),
            ensure: true,
        }
    }
}

impl MessagesConfig {
    pub fn normalize(&mut self, root: &Path) {
        self.path = normalize_path(&root.join(&self.path));
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(
            config.messages.path,
            PathBuf::from("src/content/settings/i18n/messages")
        );
        assert!(config.messages.ensure);
    }

    #[test]
    fn test_custom() {
        let config = test_parse_config("[messages]\npath = \"i18n\"\nensure = false");
        assert_eq!(config.messages.path, PathBuf::from("i18n"));
        assert!(!config.messages.ensure);
    }
}
