//! Locale-aware route derivation.
//!
//! Leaf-first:
//!
//! | Module     | Purpose                                                  |
//! |------------|----------------------------------------------------------|
//! | `path`     | File path → `{dir, name, explicit_locale}`               |
//! | `locale`   | Ordered locale resolution strategies                     |
//! | `id`       | Locale-independent route id                              |
//! | `url`      | Localized URLs, relocalization, locale visibility        |
//! | `table`    | `route id → locale → entry` table                        |
//! | `fallback` | Entries for untranslated locales                         |
//! | `redirect` | Ordered redirect rules                                   |
//! | `conflict` | Several sources claiming one `(route id, locale)`        |
//!
//! Everything here is pure: recoverable problems come back as a
//! [`Recovered`] value next to the safe default, and the caller decides when
//! to log them.

mod conflict;
mod fallback;
mod id;
mod locale;
mod path;
mod redirect;
mod table;
mod url;

pub use conflict::{Collision, CollisionLog};
pub use fallback::{FallbackGenerator, ROBOTS_NOINDEX, SynthesizedEntry};
pub(crate) use fallback::describe as describe_alternates;
pub use id::RouteId;
pub use locale::{LocaleContext, LocaleResolver, LocaleSource, ResolvedLocale, Strategy};
pub use path::{ParsedPath, PathParser};
pub use redirect::{RedirectOptions, RedirectPlanner, RedirectRule};
pub use table::{Alternate, RouteEntry, RouteTable};
pub use url::UrlBuilder;

use crate::config::ConfigError;

/// A value together with the recoverable error that produced it, if any.
#[derive(Debug)]
pub struct Recovered<T> {
    pub value: T,
    pub error: Option<ConfigError>,
}

impl<T> Recovered<T> {
    pub fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    pub fn with_error(value: T, error: ConfigError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    /// Log the error, if any, and return the value.
    pub fn report(self) -> T {
        if let Some(error) = &self.error {
            error.report();
        }
        self.value
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
