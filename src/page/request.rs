//! Page registration requests.

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::{JsonMap, PageContext};
use crate::config::LocaleConfig;
use crate::core::UrlPath;
use crate::log;
use crate::messages::MessageCatalogs;
use crate::route::RouteTable;

/// One page the host should create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRequest {
    pub path: UrlPath,
    pub component: String,
    pub context: PageContext,
}

/// A request for every entry with a component, in table order.
///
/// Entries registered by the host itself (no component) are skipped. Each
/// locale's catalog is loaded once; a broken catalog is logged and replaced
/// by an empty one.
pub fn page_requests(
    table: &RouteTable,
    config: &LocaleConfig,
    catalogs: &MessageCatalogs,
) -> Vec<PageRequest> {
    let mut messages: FxHashMap<&str, JsonMap> = FxHashMap::default();

    table
        .entries()
        .filter(|(_, _, entry)| !entry.component.is_empty())
        .map(|(route_id, locale, entry)| {
            let catalog = messages
                .entry(locale)
                .or_insert_with(|| {
                    catalogs.load(locale).unwrap_or_else(|err| {
                        log!("error"; "{:#}", err);
                        JsonMap::new()
                    })
                })
                .clone();
            PageRequest {
                path: entry.url.clone(),
                component: entry.component.clone(),
                context: PageContext::new(table, route_id.as_str(), locale, entry, config, catalog),
            }
        })
        .collect()
}
