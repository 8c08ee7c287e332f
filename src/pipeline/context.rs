//! Build context: the state of one generation pass.

use std::sync::Arc;

use parking_lot::Mutex;
use rayon::prelude::*;

use crate::cache::RouteCache;
use crate::component::{ComponentResolver, FsComponentResolver};
use crate::config::Options;
use crate::content::{ContentItem, DeriveContext, scan_content};
use crate::messages::MessageCatalogs;
use crate::page::{page_requests, register_not_found};
use crate::route::{
    CollisionLog, FallbackGenerator, RedirectOptions, RedirectPlanner, RedirectRule, RouteTable,
    SynthesizedEntry, describe_alternates,
};
use crate::utils::path::to_slash;
use crate::utils::plural::plural_count;
use crate::{debug, log};

use super::Actions;

/// Counters of a finished pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub items: usize,
    pub routes: usize,
    pub entries: usize,
    pub untranslated: usize,
    pub redirects: usize,
    pub pages: usize,
    pub collisions: usize,
}

/// Shared state of a pass.
///
/// The route table is guarded by a mutex: derivation runs in parallel,
/// registration is serialized in input order.
pub struct BuildContext {
    options: Arc<Options>,
    table: Mutex<RouteTable>,
    collisions: Mutex<CollisionLog>,
    catalogs: MessageCatalogs,
    components: Arc<dyn ComponentResolver>,
    cache: RouteCache,
}

impl BuildContext {
    pub fn new(options: Arc<Options>) -> Self {
        let components = Arc::new(FsComponentResolver::new(&options.content));
        Self::with_components(options, components)
    }

    /// Context with a host-provided component lookup.
    pub fn with_components(options: Arc<Options>, components: Arc<dyn ComponentResolver>) -> Self {
        Self {
            catalogs: MessageCatalogs::new(&options.messages),
            cache: RouteCache::for_options(&options),
            table: Mutex::new(RouteTable::new()),
            collisions: Mutex::new(CollisionLog::new()),
            components,
            options,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }

    /// Snapshot of the route table.
    pub fn table(&self) -> RouteTable {
        self.table.lock().clone()
    }

    // ========================================================================
    // phases
    // ========================================================================

    /// Reset the table and the cache; create missing message catalogs.
    pub fn begin_pass(&self) {
        self.table.lock().clear();
        self.collisions.lock().clear();

        if let Err(err) = self.cache.clear() {
            err.report();
        }
        if self.options.messages.ensure
            && let Err(err) = self.catalogs.ensure(self.options.i18n.locales.as_slice())
        {
            log!("error"; "{:#}", err);
        }
    }

    /// Every content item under the content roots. Unreadable items are
    /// logged and skipped.
    pub fn load_items(&self) -> Vec<ContentItem> {
        let root = self.options.root_dir();
        scan_content(&self.options.content)
            .par_iter()
            .filter_map(|path| match ContentItem::load(path, root) {
                Ok(item) => item,
                Err(err) => {
                    log!("warning"; "skipping {}: {:#}", to_slash(self.options.relative(path)), err);
                    None
                }
            })
            .collect()
    }

    /// Derive and register `items`. Returns the number of route items.
    pub fn ingest(&self, items: &[ContentItem]) -> usize {
        let cx = DeriveContext {
            options: &self.options,
            components: self.components.as_ref(),
        };
        let derivations: Vec<_> = items.par_iter().map(|item| item.derive(&cx)).collect();

        let mut table = self.table.lock();
        let mut collisions = self.collisions.lock();
        let mut routes = 0;
        for (item, derivation) in items.iter().zip(derivations) {
            derivation.report();
            if derivation.is_route() {
                routes += 1;
            }
            for reg in derivation.registrations {
                collisions.record(&reg.route_id, &reg.locale, item.id());
                debug!("route"; "{} {} -> {}", reg.route_id, reg.locale, reg.entry.url);
                table.put(reg.route_id, reg.locale, reg.entry);
            }
        }
        routes
    }

    /// Report `(route id, locale)` coordinates claimed by several items.
    pub fn report_collisions(&self) -> usize {
        self.collisions.lock().report()
    }

    /// Localize 404 pages, then synthesize entries for untranslated locales.
    pub fn fill_fallbacks(&self) -> Vec<SynthesizedEntry> {
        let mut table = self.table.lock();
        table.retain_locales(&self.options.i18n);
        register_not_found(&mut table, &self.options.i18n, self.options.redirects.not_found);

        let component = self
            .options
            .content
            .untranslated_component
            .as_deref()
            .map(to_slash);
        if component.is_none() {
            debug!("route"; "no untranslated component configured, skipping fallbacks");
        }
        let synthesized =
            FallbackGenerator::new(&self.options.i18n, component.as_deref()).fill_missing(&mut table);
        for item in &synthesized {
            debug!("route"; "{} {} untranslated, available in {}",
                item.route_id, item.locale, describe_alternates(&item.entry.available_in));
        }
        synthesized
    }

    pub fn plan_redirects(&self) -> Vec<RedirectRule> {
        let options = RedirectOptions::from(&self.options.redirects);
        RedirectPlanner::new(&self.options.i18n, options).plan(&self.table.lock())
    }

    /// Hand every page and redirect to the host. Returns the number of pages.
    pub fn create_pages(
        &self,
        actions: &mut dyn Actions,
        redirects: &[RedirectRule],
    ) -> anyhow::Result<usize> {
        let pages = page_requests(&self.table.lock(), &self.options.i18n, &self.catalogs);
        let count = pages.len();
        for page in pages {
            actions.create_page(page)?;
        }
        for rule in redirects {
            actions.create_redirect(rule.clone())?;
        }
        actions.finish()?;
        Ok(count)
    }

    /// Persist the table. Failures are logged; the pass still succeeds.
    pub fn persist(&self) -> bool {
        match self.cache.persist(&self.table.lock(), &self.options) {
            Ok(written) => written,
            Err(err) => {
                err.report();
                false
            }
        }
    }

    /// A full pass over the content roots.
    pub fn run(&self, actions: &mut dyn Actions) -> anyhow::Result<BuildSummary> {
        self.begin_pass();
        let items = self.load_items();
        let routes = self.ingest(&items);
        let collisions = self.report_collisions();
        let untranslated = self.fill_fallbacks().len();
        let redirects = self.plan_redirects();
        let pages = self.create_pages(actions, &redirects)?;
        self.persist();

        let table = self.table.lock();
        let summary = BuildSummary {
            items: items.len(),
            routes,
            entries: table.entry_count(),
            untranslated,
            redirects: redirects.len(),
            pages,
            collisions,
        };
        drop(table);

        log!("build"; "{} from {}, {} untranslated, {}",
            plural_count(summary.pages, "page"),
            plural_count(summary.routes, "route"),
            summary.untranslated,
            plural_count(summary.redirects, "redirect"));
        Ok(summary)
    }
}
