//! Context handed to every localized page.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::LocaleConfig;
use crate::core::UrlPath;
use crate::page::JsonMap;
use crate::route::{Alternate, RouteEntry, RouteTable};

/// Page context: the locale, the url and the i18n data of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageContext {
    pub locale: String,
    pub url: UrlPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
    pub i18n: I18nContext,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct I18nContext {
    pub locales: Vec<String>,
    pub default_locale: String,
    pub current_locale: String,
    pub hide_default_locale_in_url: bool,
    /// Flattened catalog of the current locale.
    pub messages: JsonMap,
    /// `route id → url` in the current locale.
    pub routes: BTreeMap<String, UrlPath>,
    /// Locales the route is really translated in.
    pub available_locales: Vec<String>,
    /// Set on untranslated pages only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_in: Option<Vec<Alternate>>,
    /// Every locale of the route, translated or not.
    pub alternates: Vec<Alternate>,
    /// `<link rel="alternate" hreflang>` targets, `x-default` first.
    pub hreflang: Vec<HrefLang>,
}

/// One alternate link. `href` is absolute when `i18n.base_url` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HrefLang {
    pub hreflang: String,
    pub href: String,
}

/// `x-default` (the default-locale page), then one link per alternate.
pub fn hreflang_links(alternates: &[Alternate], config: &LocaleConfig) -> Vec<HrefLang> {
    let href = |url: &UrlPath| {
        config
            .absolute_url(url.as_str())
            .unwrap_or_else(|| url.to_string())
    };
    let default = alternates
        .iter()
        .find(|alt| config.is_default(&alt.locale))
        .map(|alt| HrefLang {
            hreflang: "x-default".to_string(),
            href: href(&alt.url),
        });
    default
        .into_iter()
        .chain(alternates.iter().map(|alt| HrefLang {
            hreflang: alt.locale.clone(),
            href: href(&alt.url),
        }))
        .collect()
}

impl PageContext {
    /// Context of `route_id` in `locale`.
    pub fn new(
        table: &RouteTable,
        route_id: &str,
        locale: &str,
        entry: &RouteEntry,
        config: &LocaleConfig,
        messages: JsonMap,
    ) -> Self {
        let alternates = table.alternates(route_id, config);
        let available_locales = alternates
            .iter()
            .filter(|alt| {
                table
                    .entry(route_id, &alt.locale)
                    .is_some_and(|e| !e.is_synthesized())
            })
            .map(|alt| alt.locale.clone())
            .collect();

        Self {
            locale: locale.to_string(),
            url: entry.url.clone(),
            robots: entry.robots.clone(),
            i18n: I18nContext {
                locales: config.locales.clone(),
                default_locale: config.default_locale.clone(),
                current_locale: locale.to_string(),
                hide_default_locale_in_url: config.hide_default_locale_in_url,
                messages,
                routes: routes_for_locale(table, locale, config),
                available_locales,
                available_in: entry
                    .is_synthesized()
                    .then(|| entry.available_in.clone()),
                hreflang: hreflang_links(&alternates, config),
                alternates,
            },
        }
    }
}

/// `route id → url` for `locale`, falling back to the default-locale url.
pub fn routes_for_locale(
    table: &RouteTable,
    locale: &str,
    config: &LocaleConfig,
) -> BTreeMap<String, UrlPath> {
    table
        .route_ids()
        .filter_map(|id| {
            table
                .destination(id.as_str(), locale, config)
                .map(|url| (id.to_string(), url.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{FallbackGenerator, RouteId, UrlBuilder};
    use serde_json::json;

    fn table(config: &LocaleConfig) -> RouteTable {
        let urls = UrlBuilder::new(config);
        let mut table = RouteTable::new();
        table.put(
            RouteId::new("/about/"),
            "en",
            RouteEntry::new(urls.build("/about/", "en"), "page.tsx", "about.md"),
        );
        table.put(
            RouteId::new("/blog/"),
            "en",
            RouteEntry::new(urls.build("/blog/", "en"), "page.tsx", "blog.md"),
        );
        table.put(
            RouteId::new("/blog/"),
            "it",
            RouteEntry::new(urls.build("/blog/", "it"), "page.tsx", "blog.it.md"),
        );
        table
    }

    #[test]
    fn test_translated_page() {
        let config = LocaleConfig::new(["en", "it"], "en", true);
        let table = table(&config);
        let entry = table.entry("/blog/", "it").unwrap();
        let cx = PageContext::new(&table, "/blog/", "it", entry, &config, JsonMap::new());

        assert_eq!(cx.url, "/it/blog/");
        assert_eq!(cx.robots, None);
        assert_eq!(cx.i18n.available_locales, ["en", "it"]);
        assert_eq!(cx.i18n.available_in, None);
        // about has no italian page yet: default url
        assert_eq!(cx.i18n.routes["/about/"], "/about/");
        assert_eq!(cx.i18n.routes["/blog/"], "/it/blog/");
    }

    #[test]
    fn test_hreflang_links() {
        let mut config = LocaleConfig::new(["en", "it"], "en", true);
        let table = table(&config);
        let entry = table.entry("/blog/", "en").unwrap();

        let cx = PageContext::new(&table, "/blog/", "en", entry, &config, JsonMap::new());
        let relative: Vec<(&str, &str)> = cx
            .i18n
            .hreflang
            .iter()
            .map(|link| (link.hreflang.as_str(), link.href.as_str()))
            .collect();
        assert_eq!(relative, [("x-default", "/blog/"), ("en", "/blog/"), ("it", "/it/blog/")]);

        config.base_url = "https://example.com/site/".into();
        let cx = PageContext::new(&table, "/blog/", "en", entry, &config, JsonMap::new());
        assert_eq!(cx.i18n.hreflang[0].href, "https://example.com/site/blog/");
        assert_eq!(cx.i18n.hreflang[2].href, "https://example.com/site/it/blog/");
        // link components keep site-relative urls
        assert_eq!(cx.i18n.alternates[1].url, "/it/blog/");
    }

    #[test]
    fn test_untranslated_page() {
        let config = LocaleConfig::new(["en", "it"], "en", true);
        let mut table = table(&config);
        FallbackGenerator::new(&config, Some("untranslated.tsx")).fill_missing(&mut table);

        let entry = table.entry("/about/", "it").unwrap();
        let mut messages = JsonMap::new();
        messages.insert("nav.home".into(), json!("Inizio"));
        let cx = PageContext::new(&table, "/about/", "it", entry, &config, messages);

        assert_eq!(cx.robots.as_deref(), Some("noindex,nofollow"));
        assert_eq!(cx.i18n.available_locales, ["en"]);
        assert_eq!(cx.i18n.alternates.len(), 2);
        let available_in = cx.i18n.available_in.as_ref().unwrap();
        assert_eq!(available_in.len(), 1);
        assert_eq!(available_in[0].url, "/about/");

        let value = serde_json::to_value(&cx).unwrap();
        assert_eq!(value["i18n"]["messages"]["nav.home"], json!("Inizio"));
        assert_eq!(value["i18n"]["routes"]["/about/"], json!("/it/about/"));
        assert_eq!(value["robots"], json!("noindex,nofollow"));
    }
}
