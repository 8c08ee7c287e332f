//! Configuration section definitions.
//!
//! Each module corresponds to a section in `i18n.toml`:
//!
//! | Module      | TOML Section   | Purpose                                |
//! |-------------|----------------|----------------------------------------|
//! | `i18n`      | `[i18n]`       | Locales and default-locale visibility  |
//! | `content`   | `[content]`    | Content roots, templates, slug key     |
//! | `messages`  | `[messages]`   | Per-locale message catalogs            |
//! | `redirects` | `[redirects]`  | Redirect rules and output file         |
//! | `build`     | `[build]`      | Page manifest and cache paths          |

mod build;
mod content;
mod i18n;
mod messages;
mod redirects;

pub use build::BuildConfig;
pub use content::ContentConfig;
pub use i18n::LocaleConfig;
pub use messages::MessagesConfig;
pub use redirects::RedirectsConfig;
