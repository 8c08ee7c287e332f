//! Route table: `route id → locale → entry`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{RouteId, UrlBuilder};
use crate::config::{ConfigError, LocaleConfig};
use crate::core::UrlPath;

/// A locale and its URL, used for cross-links between translations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternate {
    pub locale: String,
    pub url: UrlPath,
}

/// One localized page of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub url: UrlPath,

    /// Template rendering this entry. Empty for routes registered by the
    /// host itself.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub component: String,

    /// Originating content item, absent for synthesized entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    /// Locales with a real translation (synthesized entries only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available_in: Vec<Alternate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
}

impl RouteEntry {
    pub fn new(url: UrlPath, component: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            url,
            component: component.into(),
            source_id: Some(source_id.into()),
            available_in: Vec::new(),
            robots: None,
        }
    }

    /// Entry synthesized for a locale without translation.
    #[inline]
    pub fn is_synthesized(&self) -> bool {
        self.source_id.is_none() && !self.available_in.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: BTreeMap<RouteId, BTreeMap<String, RouteEntry>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the overwritten entry.
    pub fn put(
        &mut self,
        route_id: RouteId,
        locale: impl Into<String>,
        entry: RouteEntry,
    ) -> Option<RouteEntry> {
        self.routes
            .entry(route_id)
            .or_default()
            .insert(locale.into(), entry)
    }

    pub fn get(&self, route_id: &str) -> Option<&BTreeMap<String, RouteEntry>> {
        self.routes.get(route_id)
    }

    pub fn entry(&self, route_id: &str, locale: &str) -> Option<&RouteEntry> {
        self.routes.get(route_id)?.get(locale)
    }

    /// Merge `other` into `self`. Incoming entries overwrite at the
    /// `(route id, locale)` level; other existing entries survive.
    pub fn merge(&mut self, other: RouteTable) {
        for (route_id, locales) in other.routes {
            self.routes.entry(route_id).or_default().extend(locales);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RouteId, &BTreeMap<String, RouteEntry>)> {
        self.routes.iter()
    }

    /// Every `(route id, locale, entry)`, ordered by route id then locale.
    pub fn entries(&self) -> impl Iterator<Item = (&RouteId, &str, &RouteEntry)> {
        self.routes.iter().flat_map(|(id, locales)| {
            locales
                .iter()
                .map(move |(locale, entry)| (id, locale.as_str(), entry))
        })
    }

    pub fn route_ids(&self) -> impl Iterator<Item = &RouteId> {
        self.routes.keys()
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of `(route id, locale)` entries.
    pub fn entry_count(&self) -> usize {
        self.routes.values().map(BTreeMap::len).sum()
    }

    pub fn clear(&mut self) {
        self.routes.clear();
    }

    /// Drop entries whose locale is no longer configured.
    pub fn retain_locales(&mut self, config: &LocaleConfig) {
        for locales in self.routes.values_mut() {
            locales.retain(|locale, _| config.contains(locale));
        }
        self.routes.retain(|_, locales| !locales.is_empty());
    }

    // ========================================================================
    // lookups
    // ========================================================================

    /// `route id → locale → url`, the shape consumed by link components.
    pub fn url_map(&self) -> BTreeMap<&RouteId, BTreeMap<&str, &UrlPath>> {
        self.routes
            .iter()
            .map(|(id, locales)| {
                let urls = locales
                    .iter()
                    .map(|(locale, entry)| (locale.as_str(), &entry.url))
                    .collect();
                (id, urls)
            })
            .collect()
    }

    /// Route and locale whose URL equals `url`.
    pub fn find_by_url(&self, url: &UrlPath) -> Option<(&RouteId, &str)> {
        self.entries()
            .find(|(_, _, entry)| entry.url == *url)
            .map(|(id, locale, _)| (id, locale))
    }

    /// Localized URL of a route, falling back to its default-locale URL.
    pub fn destination(
        &self,
        route_id: &str,
        locale: &str,
        config: &LocaleConfig,
    ) -> Option<&UrlPath> {
        let locales = self.routes.get(route_id)?;
        locales
            .get(locale)
            .or_else(|| locales.get(&config.default_locale))
            .map(|entry| &entry.url)
    }

    /// Register a route created by the host (no source, no component).
    ///
    /// Locales outside `config` are refused and the table is left unchanged.
    pub fn register_url(
        &mut self,
        config: &LocaleConfig,
        route_id: RouteId,
        locale: &str,
        url: UrlPath,
    ) -> Result<(), ConfigError> {
        if !config.contains(locale) {
            return Err(ConfigError::UnregisteredLocale {
                locale: locale.to_string(),
                file: url.to_string(),
            });
        }
        let entry = RouteEntry {
            url,
            component: String::new(),
            source_id: None,
            available_in: Vec::new(),
            robots: None,
        };
        self.put(route_id, locale, entry);
        Ok(())
    }

    /// Other locales of a route, in configured order.
    pub fn alternates(&self, route_id: &str, config: &LocaleConfig) -> Vec<Alternate> {
        let Some(locales) = self.routes.get(route_id) else {
            return Vec::new();
        };
        config
            .locales
            .iter()
            .filter_map(|locale| {
                locales.get(locale).map(|entry| Alternate {
                    locale: locale.clone(),
                    url: entry.url.clone(),
                })
            })
            .collect()
    }

    /// Recompute every URL for `config`, keeping the slug of each entry.
    pub fn relocalize_all(&mut self, config: &LocaleConfig) {
        let urls = UrlBuilder::new(config);
        for locales in self.routes.values_mut() {
            for (locale, entry) in locales.iter_mut() {
                entry.url = urls.relocalize(&entry.url, locale);
            }
        }
    }

    // ========================================================================
    // serialization
    // ========================================================================

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(url: &str, source: &str) -> RouteEntry {
        RouteEntry::new(UrlPath::new(url), "src/templates/page.tsx", source)
    }

    fn sample() -> RouteTable {
        let mut table = RouteTable::new();
        table.put(RouteId::new("/about/"), "en", entry("/about/", "about/index.md"));
        table.put(RouteId::new("/about/"), "it", entry("/it/chi-siamo/", "about/index.it.md"));
        table.put(RouteId::new("/"), "en", entry("/", "index.md"));
        table
    }

    #[test]
    fn test_put_last_write_wins() {
        let mut table = sample();
        let previous = table.put(RouteId::new("about"), "en", entry("/about/", "about.md"));
        assert_eq!(previous.unwrap().source_id.as_deref(), Some("about/index.md"));
        assert_eq!(
            table.entry("/about/", "en").unwrap().source_id.as_deref(),
            Some("about.md")
        );
        assert_eq!(table.entry_count(), 3);
    }

    #[test]
    fn test_merge_keeps_untouched_entries() {
        let mut table = sample();
        let mut other = RouteTable::new();
        other.put(RouteId::new("/about/"), "it", entry("/it/about/", "other.md"));
        other.put(RouteId::new("/blog/"), "en", entry("/blog/", "blog.md"));
        table.merge(other);

        assert_eq!(table.len(), 3);
        assert_eq!(table.entry("/about/", "en").unwrap().url, "/about/");
        assert_eq!(table.entry("/about/", "it").unwrap().url, "/it/about/");
        assert!(table.get("/blog/").is_some());
    }

    #[test]
    fn test_round_trip() {
        let mut table = sample();
        table.put(
            RouteId::new("/about/"),
            "de",
            RouteEntry {
                url: UrlPath::new("/de/about/"),
                component: "Fallback.tsx".into(),
                source_id: None,
                available_in: vec![Alternate {
                    locale: "en".into(),
                    url: UrlPath::new("/about/"),
                }],
                robots: Some("noindex,nofollow".into()),
            },
        );
        let restored = RouteTable::from_json(&table.to_json().unwrap()).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn test_serialized_shape() {
        let mut table = RouteTable::new();
        table.put(RouteId::new("/about/"), "en", entry("/about/", "about.md"));
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(
            value,
            json!({
                "/about/": {
                    "en": {
                        "url": "/about/",
                        "component": "src/templates/page.tsx",
                        "source_id": "about.md"
                    }
                }
            })
        );
    }

    #[test]
    fn test_lookups() {
        let table = sample();
        let config = LocaleConfig::new(["en", "it", "de"], "en", true);

        let (id, locale) = table.find_by_url(&UrlPath::from_browser("/it/chi-siamo")).unwrap();
        assert_eq!((id.as_str(), locale), ("/about/", "it"));
        assert!(table.find_by_url(&UrlPath::new("/nope/")).is_none());

        assert_eq!(table.destination("/about/", "it", &config).unwrap(), "/it/chi-siamo/");
        assert_eq!(table.destination("/about/", "de", &config).unwrap(), "/about/");
        assert!(table.destination("/missing/", "en", &config).is_none());

        let map = table.url_map();
        assert_eq!(map[&RouteId::new("/about/")]["it"], "/it/chi-siamo/");

        let alternates = table.alternates("/about/", &config);
        assert_eq!(alternates.len(), 2);
        assert_eq!(alternates[0].locale, "en");
    }

    #[test]
    fn test_register_url_and_retain() {
        let config = LocaleConfig::new(["en", "it"], "en", true);
        let mut table = sample();
        table
            .register_url(&config, RouteId::new("/tags/rust/"), "it", UrlPath::new("/it/tags/rust/"))
            .unwrap();
        assert!(table.entry("/tags/rust/", "it").unwrap().component.is_empty());

        let err = table
            .register_url(&config, RouteId::new("/tags/go/"), "fr", UrlPath::new("/fr/tags/go/"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnregisteredLocale { ref locale, .. } if locale == "fr"));
        assert!(table.get("/tags/go/").is_none());

        // entries written under an older configuration
        table.put(RouteId::new("/tags/go/"), "fr", entry("/fr/tags/go/", "tags/go.fr.md"));
        table.retain_locales(&config);
        assert!(table.get("/tags/go/").is_none());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_relocalize_all() {
        let mut table = sample();
        table.relocalize_all(&LocaleConfig::new(["en", "it"], "en", false));
        assert_eq!(table.entry("/about/", "en").unwrap().url, "/en/about/");
        assert_eq!(table.entry("/", "en").unwrap().url, "/en/");
        assert_eq!(table.entry("/about/", "it").unwrap().url, "/it/chi-siamo/");
    }
}
