//! `[i18n]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [i18n]
//! locales = ["en", "it"]             # Ordered, unique locale codes
//! default_locale = "en"              # Must be one of `locales`
//! hide_default_locale_in_url = true  # `/about/` instead of `/en/about/`
//! base_url = "https://example.com"   # Makes `hreflang` links absolute
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Locale configuration shared by every routing phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Ordered set of locale codes.
    pub locales: Vec<String>,

    /// Locale used when a content item does not declare one.
    pub default_locale: String,

    /// Whether the default locale is left out of its URLs.
    pub hide_default_locale_in_url: bool,

    /// Absolute site URL (may be empty).
    pub base_url: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_string()],
            default_locale: "en".to_string(),
            hide_default_locale_in_url: true,
            base_url: String::new(),
        }
    }
}

impl LocaleConfig {
    pub const FIELD_LOCALES: FieldPath = FieldPath::new("i18n", "locales");
    pub const FIELD_DEFAULT_LOCALE: FieldPath = FieldPath::new("i18n", "default_locale");
    pub const FIELD_BASE_URL: FieldPath = FieldPath::new("i18n", "base_url");

    /// Create a locale configuration.
    pub fn new<I, S>(locales: I, default_locale: &str, hide_default_locale_in_url: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
            default_locale: default_locale.to_string(),
            hide_default_locale_in_url,
            base_url: String::new(),
        }
    }

    /// Whether `locale` is registered.
    #[inline]
    pub fn contains(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    /// Whether `locale` is the default locale.
    #[inline]
    pub fn is_default(&self, locale: &str) -> bool {
        self.default_locale == locale
    }

    /// Number of registered locales.
    #[inline]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Absolute URL for a site path, if `base_url` is set.
    pub fn absolute_url(&self, path: &str) -> Option<String> {
        if self.base_url.is_empty() {
            return None;
        }
        let base = url::Url::parse(&self.base_url).ok()?;
        let prefix = base.path().trim_end_matches('/');
        let mut joined = base.clone();
        joined.set_path(&format!("{prefix}{path}"));
        Some(joined.to_string())
    }

    /// Validate locale invariants.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.locales.is_empty() {
            diag.error(Self::FIELD_LOCALES, "at least one locale is required");
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for locale in &self.locales {
            if locale.is_empty() || locale.contains(['/', '.', ' ']) {
                diag.error(
                    Self::FIELD_LOCALES,
                    format!("`{locale}` is not a valid locale code"),
                );
            }
            if !seen.insert(locale.as_str()) {
                diag.error(Self::FIELD_LOCALES, format!("`{locale}` is listed twice"));
            }
        }

        if !self.contains(&self.default_locale) {
            diag.error_with_hint(
                Self::FIELD_DEFAULT_LOCALE,
                format!("`{}` is not one of `i18n.locales`", self.default_locale),
                format!("add \"{}\" to `i18n.locales`", self.default_locale),
            );
        }

        if !self.base_url.is_empty() && url::Url::parse(&self.base_url).is_err() {
            diag.error(
                Self::FIELD_BASE_URL,
                format!("`{}` is not an absolute URL", self.base_url),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.i18n.locales, vec!["en"]);
        assert_eq!(config.i18n.default_locale, "en");
        assert!(config.i18n.hide_default_locale_in_url);
    }

    #[test]
    fn test_parse_section() {
        let config = test_parse_config(
            "[i18n]\nlocales = [\"en\", \"it\"]\ndefault_locale = \"it\"\nhide_default_locale_in_url = false",
        );
        assert_eq!(config.i18n.locales, vec!["en", "it"]);
        assert!(config.i18n.is_default("it"));
        assert!(!config.i18n.hide_default_locale_in_url);
    }

    #[test]
    fn test_validate_default_not_registered() {
        let config = LocaleConfig::new(["en", "it"], "de", true);
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, LocaleConfig::FIELD_DEFAULT_LOCALE);
    }

    #[test]
    fn test_validate_duplicates_and_empty() {
        let mut diag = ConfigDiagnostics::new();
        LocaleConfig::new(["en", "en"], "en", true).validate(&mut diag);
        assert_eq!(diag.len(), 1);

        let mut diag = ConfigDiagnostics::new();
        LocaleConfig::new(Vec::<String>::new(), "en", true).validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_absolute_url() {
        let mut config = LocaleConfig::new(["en"], "en", true);
        assert_eq!(config.absolute_url("/about/"), None);

        config.base_url = "https://example.com/site/".into();
        assert_eq!(
            config.absolute_url("/it/about/").as_deref(),
            Some("https://example.com/site/it/about/")
        );
    }
}
