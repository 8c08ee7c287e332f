//! Localized 404 pages.

use crate::config::LocaleConfig;
use crate::route::{RouteEntry, RouteId, RouteTable, UrlBuilder};

/// Slug of the not-found route.
pub const NOT_FOUND_SLUG: &str = "404";

/// Register `/404/` in every locale that lacks one.
///
/// Runs when the table already has a 404 route, or when `always` is set.
/// Missing locales copy the component of an existing 404 page; without one
/// they are registered with no component, for the host to render.
/// Returns the number of added entries.
pub fn register_not_found(table: &mut RouteTable, config: &LocaleConfig, always: bool) -> usize {
    let route_id = RouteId::new(NOT_FOUND_SLUG);
    let existing = table.get(route_id.as_str());
    if existing.is_none() && !always {
        return 0;
    }

    let template = existing.and_then(|locales| {
        locales
            .get(&config.default_locale)
            .or_else(|| locales.values().next())
            .cloned()
    });
    let missing: Vec<String> = config
        .locales
        .iter()
        .filter(|locale| table.entry(route_id.as_str(), locale).is_none())
        .cloned()
        .collect();

    let urls = UrlBuilder::new(config);
    for locale in &missing {
        let url = urls.build(NOT_FOUND_SLUG, locale);
        match &template {
            Some(template) => {
                let entry = RouteEntry {
                    url,
                    ..template.clone()
                };
                table.put(route_id.clone(), locale.as_str(), entry);
            }
            None => {
                if let Err(err) = table.register_url(config, route_id.clone(), locale, url) {
                    err.report();
                }
            }
        }
    }

    crate::debug!("route"; "registered {} localized 404 page(s)", missing.len());
    missing.len()
}
