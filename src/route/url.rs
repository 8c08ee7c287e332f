//! Localized URL construction.

use crate::config::LocaleConfig;
use crate::core::UrlPath;

/// Builds and rewrites URLs according to locale visibility.
#[derive(Debug, Clone, Copy)]
pub struct UrlBuilder<'a> {
    config: &'a LocaleConfig,
}

impl<'a> UrlBuilder<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        Self { config }
    }

    /// Whether `locale` appears as a URL prefix.
    ///
    /// False only for the default locale when it is hidden.
    #[inline]
    pub fn is_visible(&self, locale: &str) -> bool {
        !(self.config.is_default(locale) && self.config.hide_default_locale_in_url)
    }

    /// URL of `slug` in `locale`: `/slug/` or `/locale/slug/`.
    pub fn build(&self, slug: &str, locale: &str) -> UrlPath {
        if self.is_visible(locale) {
            UrlPath::new(&format!("/{locale}/{slug}"))
        } else {
            UrlPath::new(slug)
        }
    }

    /// Registered locale used as the first segment of `url`, if any.
    pub fn locale_prefix(&self, url: &UrlPath) -> Option<&'a str> {
        let first = url.first_segment()?;
        self.config
            .locales
            .iter()
            .map(String::as_str)
            .find(|locale| *locale == first)
    }

    /// Rewrite `url` for `target`.
    ///
    /// Visible target: replace the detected prefix or prepend one.
    /// Hidden target: strip the detected prefix, or keep `url` unchanged when
    /// there is none.
    pub fn relocalize(&self, url: &UrlPath, target: &str) -> UrlPath {
        let prefixed = self.locale_prefix(url).is_some();
        match (self.is_visible(target), prefixed) {
            (true, true) => url.replace_first_segment(target),
            (true, false) => url.with_prefix(target),
            (false, true) => url.without_first_segment(),
            (false, false) => url.clone(),
        }
    }

    /// Configured locales with the default one moved last.
    pub fn reorder_locales(&self) -> Vec<&'a str> {
        let default = self.config.default_locale.as_str();
        self.config
            .locales
            .iter()
            .map(String::as_str)
            .filter(|l| *l != default)
            .chain(self.config.contains(default).then_some(default))
            .collect()
    }
}
