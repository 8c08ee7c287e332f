//! `routes` command: print the cached route table.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use crate::cache::RouteCache;
use crate::config::{ConfigError, Options};
use crate::core::UrlPath;
use crate::route::RouteTable;

/// Print the route table of the last build, optionally one locale only.
pub fn print_routes(options: &Options, locale: Option<&str>, json: bool) -> Result<()> {
    if let Some(locale) = locale
        && !options.i18n.contains(locale)
    {
        bail!(ConfigError::Validation(format!(
            "locale `{locale}` is not one of [{}]",
            options.i18n.locales.join(", ")
        )));
    }

    let table = restore_table(options)?;
    let output = if json {
        render_json(&table, locale)?
    } else {
        render_text(&table, locale)
    };
    print!("{output}");
    Ok(())
}

/// Cached table of the last build.
pub(super) fn restore_table(options: &Options) -> Result<RouteTable> {
    let cache = RouteCache::for_options(options);
    match cache.try_restore()? {
        Some(table) => Ok(table),
        None => bail!("no route table in '{}', run `build` first", cache.dir().display()),
    }
}

fn render_json(table: &RouteTable, locale: Option<&str>) -> Result<String> {
    let map: BTreeMap<_, _> = table
        .url_map()
        .into_iter()
        .map(|(id, urls)| {
            let urls: BTreeMap<&str, &UrlPath> = urls
                .into_iter()
                .filter(|(l, _)| locale.is_none_or(|wanted| wanted == *l))
                .collect();
            (id, urls)
        })
        .filter(|(_, urls)| !urls.is_empty())
        .collect();
    Ok(serde_json::to_string_pretty(&map)? + "\n")
}

fn render_text(table: &RouteTable, locale: Option<&str>) -> String {
    let mut out = String::new();
    for (id, locales) in table.iter() {
        let rows: Vec<_> = locales
            .iter()
            .filter(|(l, _)| locale.is_none_or(|wanted| wanted == l.as_str()))
            .collect();
        if rows.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", id.bold());
        for (l, entry) in rows {
            let marker = if entry.is_synthesized() {
                format!("  {}", "untranslated".dimmed())
            } else {
                String::new()
            };
            let _ = writeln!(out, "  {l:<6} {}{marker}", entry.url);
        }
    }
    out
}
