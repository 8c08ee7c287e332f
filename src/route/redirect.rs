//! Redirect planning.
//!
//! Hosts match redirect files top to bottom, so rules are emitted in phases:
//!
//! 1. root redirects (`/` → `/L/`) for every visible locale
//! 2. default-locale aliases, one per default-locale route
//! 3. catch-alls of the other locales: 404 rules (`/L/*`), then splats
//! 4. catch-alls of the default locale, its `/L/*` rule first
//!
//! A `/*` rule never precedes a `/L/*` rule it would shadow, and the default
//! locale comes last so that rules carrying a `Language` condition are tried
//! first.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{RouteTable, UrlBuilder};
use crate::config::{LocaleConfig, RedirectsConfig};
use crate::core::UrlPath;

/// A single redirect, as handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RedirectRule {
    pub from_path: String,
    pub to_path: String,
    pub is_permanent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_hint: Option<String>,
}

impl RedirectRule {
    pub fn permanent(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from_path: from.into(),
            to_path: to.into(),
            is_permanent: true,
            status_code: None,
            language_hint: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self.is_permanent = false;
        self
    }

    pub fn with_language(mut self, locale: Option<&str>) -> Self {
        self.language_hint = locale.map(str::to_string);
        self
    }

    /// Effective HTTP status.
    pub fn status(&self) -> u16 {
        match self.status_code {
            Some(code) => code,
            None if self.is_permanent => 301,
            None => 302,
        }
    }
}

/// Netlify `_redirects` line: `from  to  status  [Language=xx]`.
impl fmt::Display for RedirectRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}  {}", self.from_path, self.to_path, self.status())?;
        if let Some(locale) = &self.language_hint {
            write!(f, "  Language={locale}")?;
        }
        Ok(())
    }
}

/// Which optional phases to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectOptions {
    pub splat: bool,
    pub not_found: bool,
}

impl Default for RedirectOptions {
    fn default() -> Self {
        Self {
            splat: true,
            not_found: true,
        }
    }
}

impl From<&RedirectsConfig> for RedirectOptions {
    fn from(config: &RedirectsConfig) -> Self {
        Self {
            splat: config.splat,
            not_found: config.not_found,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RedirectPlanner<'a> {
    config: &'a LocaleConfig,
    options: RedirectOptions,
}

impl<'a> RedirectPlanner<'a> {
    pub fn new(config: &'a LocaleConfig, options: RedirectOptions) -> Self {
        Self { config, options }
    }

    /// Ordered, duplicate-free redirect rules for `table`.
    pub fn plan(&self, table: &RouteTable) -> Vec<RedirectRule> {
        let urls = UrlBuilder::new(self.config);
        let locales = urls.reorder_locales();
        let mut rules = Vec::new();

        for &locale in &locales {
            if urls.is_visible(locale) {
                rules.push(
                    RedirectRule::permanent("/", format!("/{locale}/"))
                        .with_language(self.hint(locale)),
                );
            }
        }

        rules.extend(self.default_aliases(table));

        let (others, defaults): (Vec<&str>, Vec<&str>) = locales
            .iter()
            .copied()
            .partition(|&locale| !self.config.is_default(locale));
        rules.extend(others.iter().filter_map(|locale| self.not_found(&urls, locale)));
        rules.extend(others.iter().filter_map(|locale| self.splat(&urls, locale)));
        for locale in defaults {
            let (not_found, splat) = (self.not_found(&urls, locale), self.splat(&urls, locale));
            if urls.is_visible(locale) {
                rules.extend(not_found.into_iter().chain(splat));
            } else {
                rules.extend(splat.into_iter().chain(not_found));
            }
        }

        let mut seen = FxHashSet::default();
        rules.retain(|rule| seen.insert((rule.from_path.clone(), rule.language_hint.clone())));
        rules
    }

    /// Exactly one alias per default-locale route: unprefixed → prefixed when
    /// the default locale is visible, prefixed → unprefixed otherwise.
    pub fn default_aliases(&self, table: &RouteTable) -> Vec<RedirectRule> {
        let urls = UrlBuilder::new(self.config);
        let default = self.config.default_locale.as_str();
        let visible = urls.is_visible(default);

        table
            .iter()
            .filter_map(|(_, locales)| locales.get(default))
            .map(|entry| {
                let (prefixed, unprefixed) = self.split_default(&entry.url);
                if visible {
                    RedirectRule::permanent(unprefixed.as_str(), prefixed.as_str())
                } else {
                    RedirectRule::permanent(prefixed.as_str(), unprefixed.as_str())
                }
            })
            .collect()
    }

    /// `(with default prefix, without)` forms of a default-locale URL.
    fn split_default(&self, url: &UrlPath) -> (UrlPath, UrlPath) {
        let default = self.config.default_locale.as_str();
        if url.first_segment() == Some(default) {
            (url.clone(), url.without_first_segment())
        } else {
            (url.with_prefix(default), url.clone())
        }
    }

    /// `/*` → `/L/:splat` for a visible locale, `/L/*` → `/:splat` for a hidden one.
    fn splat(&self, urls: &UrlBuilder<'_>, locale: &str) -> Option<RedirectRule> {
        if !self.options.splat {
            return None;
        }
        let rule = if urls.is_visible(locale) {
            RedirectRule::permanent("/*", format!("/{locale}/:splat"))
        } else {
            RedirectRule::permanent(format!("/{locale}/*"), "/:splat")
        };
        Some(rule.with_language(self.hint(locale)))
    }

    fn not_found(&self, urls: &UrlBuilder<'_>, locale: &str) -> Option<RedirectRule> {
        if !self.options.not_found {
            return None;
        }
        let rule = if urls.is_visible(locale) {
            RedirectRule::permanent(format!("/{locale}/*"), format!("/{locale}/404/index.html"))
        } else {
            RedirectRule::permanent("/*", "/404/index.html")
        };
        Some(rule.with_status(404))
    }

    fn hint<'l>(&self, locale: &'l str) -> Option<&'l str> {
        (!self.config.is_default(locale)).then_some(locale)
    }
}
