//! `locate` command: which route a URL belongs to, and where it leads in
//! another locale.

use anyhow::{Result, bail};

use super::routes::restore_table;
use crate::config::{ConfigError, LocaleConfig, Options};
use crate::core::UrlPath;
use crate::route::{RouteId, RouteTable};

/// A URL matched to its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub route_id: RouteId,
    /// Locale of the matched URL.
    pub locale: String,
    /// URL in the target locale (default-locale URL when untranslated).
    pub destination: UrlPath,
}

/// Match `url` and resolve it for `target`, or for the URL's own locale.
pub fn locate_url(
    table: &RouteTable,
    config: &LocaleConfig,
    url: &UrlPath,
    target: Option<&str>,
) -> Option<Located> {
    let (route_id, locale) = table.find_by_url(url)?;
    let destination = table.destination(route_id.as_str(), target.unwrap_or(locale), config)?;
    Some(Located {
        route_id: route_id.clone(),
        locale: locale.to_string(),
        destination: destination.clone(),
    })
}

pub fn locate(options: &Options, path: &str, target: Option<&str>) -> Result<()> {
    if let Some(target) = target
        && !options.i18n.contains(target)
    {
        bail!(ConfigError::Validation(format!("locale `{target}` is not configured")));
    }

    let table = restore_table(options)?;
    let url = UrlPath::from_browser(path);
    let Some(found) = locate_url(&table, &options.i18n, &url, target) else {
        bail!("no route matches `{url}`");
    };

    println!("{} {} -> {}", found.route_id, found.locale, found.destination);
    Ok(())
}
