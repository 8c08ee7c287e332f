//! Locale resolution.
//!
//! The precedence rule is data: [`LocaleResolver::STRATEGIES`] is walked in
//! order and the first strategy yielding a registered locale wins. A
//! candidate that is not registered is recorded as a [`ConfigError`] and the
//! walk continues, so resolution always ends on the default locale at worst.

use super::{ParsedPath, Recovered};
use crate::config::{ConfigError, LocaleConfig};

/// Inputs visible to every strategy.
#[derive(Debug, Clone, Copy)]
pub struct LocaleContext<'a> {
    pub parsed: &'a ParsedPath,
    /// Locale of the frontmatter block being registered, if any.
    pub frontmatter_locale: Option<&'a str>,
    pub config: &'a LocaleConfig,
}

/// A single resolution strategy.
pub type Strategy = for<'a> fn(&LocaleContext<'a>) -> Option<&'a str>;

/// Which strategy produced the locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    Frontmatter,
    Filename,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale {
    pub locale: String,
    pub source: LocaleSource,
}

fn from_frontmatter<'a>(cx: &LocaleContext<'a>) -> Option<&'a str> {
    cx.frontmatter_locale
}

fn from_filename<'a>(cx: &LocaleContext<'a>) -> Option<&'a str> {
    cx.parsed.explicit_locale.as_deref()
}

fn from_default<'a>(cx: &LocaleContext<'a>) -> Option<&'a str> {
    Some(cx.config.default_locale.as_str())
}

pub struct LocaleResolver;

impl LocaleResolver {
    pub const STRATEGIES: &'static [(LocaleSource, Strategy)] = &[
        (LocaleSource::Frontmatter, from_frontmatter),
        (LocaleSource::Filename, from_filename),
        (LocaleSource::Default, from_default),
    ];

    /// Resolve the locale of one content item (or one of its frontmatter
    /// locale blocks). `file` names the item in error messages.
    pub fn resolve(cx: &LocaleContext<'_>, file: &str) -> Recovered<ResolvedLocale> {
        let mut error = None;

        for (source, strategy) in Self::STRATEGIES {
            let Some(candidate) = strategy(cx) else {
                continue;
            };
            if cx.config.contains(candidate) {
                return Recovered {
                    value: ResolvedLocale {
                        locale: candidate.to_string(),
                        source: *source,
                    },
                    error,
                };
            }
            if error.is_none() {
                error = Some(ConfigError::UnregisteredLocale {
                    locale: candidate.to_string(),
                    file: file.to_string(),
                });
            }
        }

        // Only reachable when the default locale itself is not registered,
        // which config validation rejects.
        Recovered {
            value: ResolvedLocale {
                locale: cx.config.default_locale.clone(),
                source: LocaleSource::Default,
            },
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::PathParser;

    fn config() -> LocaleConfig {
        LocaleConfig::new(["en", "it"], "en", true)
    }

    fn resolve(file: &str, frontmatter: Option<&str>) -> Recovered<ResolvedLocale> {
        let config = config();
        let parsed = PathParser::split(file);
        let cx = LocaleContext {
            parsed: &parsed,
            frontmatter_locale: frontmatter,
            config: &config,
        };
        LocaleResolver::resolve(&cx, file)
    }

    #[test]
    fn test_no_suffix_uses_default() {
        let resolved = resolve("/about/index.md", None);
        assert!(resolved.is_ok());
        assert_eq!(resolved.value.locale, "en");
        assert_eq!(resolved.value.source, LocaleSource::Default);
    }

    #[test]
    fn test_registered_suffix() {
        let resolved = resolve("/about/index.it.md", None);
        assert!(resolved.is_ok());
        assert_eq!(resolved.value.locale, "it");
        assert_eq!(resolved.value.source, LocaleSource::Filename);
    }

    #[test]
    fn test_unregistered_suffix_falls_back_with_error() {
        let resolved = resolve("/about/index.xx.md", None);
        assert_eq!(resolved.value.locale, "en");
        assert_eq!(resolved.value.source, LocaleSource::Default);
        match resolved.error {
            Some(ConfigError::UnregisteredLocale { locale, file }) => {
                assert_eq!(locale, "xx");
                assert_eq!(file, "/about/index.xx.md");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_frontmatter_block_beats_filename() {
        let resolved = resolve("/about/index.en.md", Some("it"));
        assert!(resolved.is_ok());
        assert_eq!(resolved.value.locale, "it");
        assert_eq!(resolved.value.source, LocaleSource::Frontmatter);
    }

    #[test]
    fn test_unregistered_frontmatter_block_keeps_walking() {
        let resolved = resolve("/about/index.it.md", Some("de"));
        assert_eq!(resolved.value.locale, "it");
        assert!(matches!(
            resolved.error,
            Some(ConfigError::UnregisteredLocale { ref locale, .. }) if locale == "de"
        ));
    }

    #[test]
    fn test_strategy_order() {
        let order: Vec<_> = LocaleResolver::STRATEGIES.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            order,
            [
                LocaleSource::Frontmatter,
                LocaleSource::Filename,
                LocaleSource::Default
            ]
        );
    }
}
