//! Entries for locales a route has no translation in.

use super::{Alternate, RouteEntry, RouteId, RouteTable, UrlBuilder};
use crate::config::LocaleConfig;
use crate::core::UrlPath;

/// Robots directive attached to synthesized pages.
pub const ROBOTS_NOINDEX: &str = "noindex,nofollow";

/// A synthesized `(route id, locale)` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedEntry {
    pub route_id: RouteId,
    pub locale: String,
    pub entry: RouteEntry,
}

#[derive(Debug, Clone, Copy)]
pub struct FallbackGenerator<'a> {
    config: &'a LocaleConfig,
    component: Option<&'a str>,
}

impl<'a> FallbackGenerator<'a> {
    pub fn new(config: &'a LocaleConfig, component: Option<&'a str>) -> Self {
        Self { config, component }
    }

    /// Fill every missing `(route id, locale)` of `table`.
    ///
    /// Does nothing without a fallback component. A route is filled when any
    /// configured locale is absent from it, whatever else it holds. Missing
    /// locales are visited in configured order.
    pub fn fill_missing(&self, table: &mut RouteTable) -> Vec<SynthesizedEntry> {
        let Some(component) = self.component else {
            return Vec::new();
        };

        let view: &RouteTable = table;
        let synthesized: Vec<SynthesizedEntry> = view
            .iter()
            .filter(|(_, present)| {
                self.config.locales.iter().any(|locale| !present.contains_key(locale))
            })
            .flat_map(|(route_id, _)| self.synthesize(view, route_id, component))
            .collect();

        for item in &synthesized {
            table.put(item.route_id.clone(), item.locale.clone(), item.entry.clone());
        }
        synthesized
    }

    fn synthesize(
        &self,
        table: &RouteTable,
        route_id: &RouteId,
        component: &str,
    ) -> Vec<SynthesizedEntry> {
        let urls = UrlBuilder::new(self.config);
        let available_in = table.alternates(route_id.as_str(), self.config);
        let present = |locale: &str| available_in.iter().any(|a| a.locale == locale);

        let base = self.base_url(table, route_id);

        self.config
            .locales
            .iter()
            .filter(|locale| !present(locale.as_str()))
            .map(|locale| {
                let url = match &base {
                    Some(base) => urls.relocalize(base, locale),
                    None => urls.build(route_id.slug(), locale),
                };
                SynthesizedEntry {
                    route_id: route_id.clone(),
                    locale: locale.clone(),
                    entry: RouteEntry {
                        url,
                        component: component.to_string(),
                        source_id: None,
                        available_in: available_in.clone(),
                        robots: Some(ROBOTS_NOINDEX.to_string()),
                    },
                }
            })
            .collect()
    }

    /// URL to relocalize from: default-locale entry, else the first present
    /// locale in configured order.
    fn base_url(&self, table: &RouteTable, route_id: &RouteId) -> Option<UrlPath> {
        let locales = table.get(route_id.as_str())?;
        locales
            .get(&self.config.default_locale)
            .or_else(|| self.config.locales.iter().find_map(|l| locales.get(l)))
            .map(|entry| entry.url.clone())
    }
}

/// Alternates of synthesized entries, for logging.
pub(crate) fn describe(available_in: &[Alternate]) -> String {
    available_in
        .iter()
        .map(|a| format!("{} {}", a.locale, a.url))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn config() -> LocaleConfig {
        LocaleConfig::new(["en", "it"], "en", true)
    }

    fn real(url: &str) -> RouteEntry {
        RouteEntry::new(UrlPath::new(url), "src/templates/page.tsx", "item")
    }

    #[test]
    fn test_no_component_is_noop() {
        let config = config();
        let mut table = RouteTable::new();
        table.put(RouteId::new("/about/"), "en", real("/about/"));
        let before = table.clone();

        assert!(FallbackGenerator::new(&config, None).fill_missing(&mut table).is_empty());
        assert_eq!(table, before);
    }

    #[test]
    fn test_fills_missing_translation() {
        let config = config();
        let mut table = RouteTable::new();
        table.put(RouteId::new("/about/"), "en", real("/about/"));

        let synthesized =
            FallbackGenerator::new(&config, Some("Fallback.tsx")).fill_missing(&mut table);
        assert_eq!(synthesized.len(), 1);

        let it = table.entry("/about/", "it").unwrap();
        assert_eq!(it.url, "/it/about/");
        assert_eq!(it.component, "Fallback.tsx");
        assert_eq!(it.source_id, None);
        assert_eq!(it.robots.as_deref(), Some(ROBOTS_NOINDEX));
        assert_eq!(
            it.available_in,
            vec![Alternate {
                locale: "en".into(),
                url: UrlPath::new("/about/"),
            }]
        );
        assert!(it.is_synthesized());
    }

    #[test]
    fn test_relocalizes_from_first_present_locale() {
        let config = LocaleConfig::new(["en", "it", "de"], "en", true);
        let mut table = RouteTable::new();
        table.put(RouteId::new("/about/"), "de", real("/de/ueber-uns/"));
        table.put(RouteId::new("/about/"), "it", real("/it/chi-siamo/"));

        FallbackGenerator::new(&config, Some("Fallback.tsx")).fill_missing(&mut table);
        assert_eq!(table.entry("/about/", "en").unwrap().url, "/chi-siamo/");
    }

    #[test]
    fn test_unconfigured_locale_does_not_hide_missing_one() {
        let config = config();
        let mut table = RouteTable::new();
        table.put(RouteId::new("/about/"), "en", real("/about/"));
        // left over from a cache written with `fr` configured
        table.put(RouteId::new("/about/"), "fr", real("/fr/a-propos/"));

        let synthesized =
            FallbackGenerator::new(&config, Some("Fallback.tsx")).fill_missing(&mut table);
        assert_eq!(synthesized.len(), 1);
        assert_eq!(synthesized[0].locale, "it");

        let it = table.entry("/about/", "it").unwrap();
        assert_eq!(it.url, "/it/about/");
        let listed: Vec<&str> = it.available_in.iter().map(|a| a.locale.as_str()).collect();
        assert_eq!(listed, ["en"]);
    }

    #[test]
    fn test_completeness_and_missing_order() {
        let config = LocaleConfig::new(["en", "it", "de", "fr"], "it", false);
        let mut table = RouteTable::new();
        table.put(RouteId::new("/"), "it", real("/it/"));
        table.put(RouteId::new("/blog/post/"), "fr", real("/fr/blog/post/"));
        table.put(RouteId::new("/blog/post/"), "en", real("/en/blog/post/"));
        table.put(RouteId::new("/contact/"), "en", real("/en/contact/"));
        table.put(RouteId::new("/contact/"), "it", real("/it/contact/"));
        table.put(RouteId::new("/contact/"), "de", real("/de/contact/"));
        table.put(RouteId::new("/contact/"), "fr", real("/fr/contact/"));

        let synthesized =
            FallbackGenerator::new(&config, Some("Fallback.tsx")).fill_missing(&mut table);

        let expected: BTreeSet<&str> = config.locales.iter().map(String::as_str).collect();
        for (_, locales) in table.iter() {
            let present: BTreeSet<&str> = locales.keys().map(String::as_str).collect();
            assert_eq!(present, expected);
        }

        let root: Vec<&str> = synthesized
            .iter()
            .filter(|s| s.route_id.is_root())
            .map(|s| s.locale.as_str())
            .collect();
        assert_eq!(root, ["en", "de", "fr"]);
        assert_eq!(table.entry("/", "de").unwrap().url, "/de/");
        assert!(synthesized.iter().all(|s| s.route_id.as_str() != "/contact/"));
    }

    #[test]
    fn test_describe() {
        let text = describe(&[Alternate {
            locale: "en".into(),
            url: UrlPath::new("/about/"),
        }]);
        assert_eq!(text, "en /about/");
    }
}
