//! Collision detection for `(route id, locale)` coordinates.
//!
//! The table keeps last-write-wins semantics; this log only remembers every
//! source that wrote a coordinate so the build can warn about it.

use rustc_hash::FxHashMap;

use super::RouteId;
use crate::log;
use crate::utils::plural::plural_s;

/// Several content items registered under one `(route id, locale)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub route_id: RouteId,
    pub locale: String,
    /// Sources in registration order; the last one won.
    pub sources: Vec<String>,
}

#[derive(Debug, Default)]
pub struct CollisionLog {
    sources: FxHashMap<(RouteId, String), Vec<String>>,
}

impl CollisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, route_id: &RouteId, locale: &str, source: &str) {
        self.sources
            .entry((route_id.clone(), locale.to_string()))
            .or_default()
            .push(source.to_string());
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }

    /// Coordinates written more than once, sorted.
    pub fn collisions(&self) -> Vec<Collision> {
        let mut collisions: Vec<Collision> = self
            .sources
            .iter()
            .filter(|(_, sources)| sources.len() > 1)
            .map(|((route_id, locale), sources)| Collision {
                route_id: route_id.clone(),
                locale: locale.clone(),
                sources: sources.clone(),
            })
            .collect();
        collisions.sort_by(|a, b| (&a.route_id, &a.locale).cmp(&(&b.route_id, &b.locale)));
        collisions
    }

    /// Print collisions using the standard log format.
    ///
    /// ```text
    /// [warning] route collisions (1 route)
    /// [route] /about/ en (2 sources, last wins)
    ///   - src/content/about/index.md
    ///   - src/content/about.md
    /// ```
    pub fn report(&self) -> usize {
        let collisions = self.collisions();
        if collisions.is_empty() {
            return 0;
        }

        log!("warning"; "route collisions ({} route{})", collisions.len(), plural_s(collisions.len()));
        for collision in &collisions {
            log!("route"; "{} {} ({} sources, last wins)",
                collision.route_id, collision.locale, collision.sources.len());
            for source in &collision.sources {
                eprintln!("  - {source}");
            }
        }
        collisions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_source_is_not_a_collision() {
        let mut log = CollisionLog::new();
        log.record(&RouteId::new("/about/"), "en", "about/index.md");
        log.record(&RouteId::new("/about/"), "it", "about/index.it.md");
        assert!(log.collisions().is_empty());
        assert_eq!(log.report(), 0);
    }

    #[test]
    fn test_collisions_keep_registration_order() {
        let mut log = CollisionLog::new();
        log.record(&RouteId::new("/b/"), "en", "b.md");
        log.record(&RouteId::new("/about/"), "en", "about.md");
        log.record(&RouteId::new("/about/"), "en", "about/index.md");
        log.record(&RouteId::new("/b/"), "en", "b/index.md");

        let collisions = log.collisions();
        assert_eq!(collisions.len(), 2);
        assert_eq!(collisions[0].route_id.as_str(), "/about/");
        assert_eq!(collisions[0].sources, ["about.md", "about/index.md"]);

        log.clear();
        assert!(log.collisions().is_empty());
    }
}
