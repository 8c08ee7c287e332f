//! `i18n.toml`: locales, content roots, catalogs, redirects and output.
//!
//! ```toml
//! [i18n]
//! locales = ["en", "it"]
//! default_locale = "en"
//! hide_default_locale_in_url = true
//!
//! [content]
//! paths = ["src/content", "src/pages"]
//!
//! [redirects]
//! splat = true
//! ```
//!
//! Every section has defaults, so an empty file is valid. Paths are
//! resolved against the directory holding `i18n.toml` by [`Options::finalize`],
//! and [`Options::validate`] checks all sections before failing.

pub mod section;
pub mod types;
mod util;

pub use section::{BuildConfig, ContentConfig, LocaleConfig, MessagesConfig, RedirectsConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::{find_config_file, find_config_file_from};

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cli::{BuildArgs, Cli, Commands};
use crate::log;
use crate::utils::path::normalize_path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Where `i18n.toml` was found; empty for [`Options::for_root`].
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory all relative paths are resolved against.
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub i18n: LocaleConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
    #[serde(default)]
    pub redirects: RedirectsConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

impl Options {
    /// Find `cli.config` upward from the working directory, read it, apply
    /// `build` flags and validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let Some(config_path) = find_config_file(&cli.config) else {
            bail!(ConfigError::Validation(format!(
                "`{}` not found here or in any parent directory",
                cli.config.display()
            )));
        };

        let mut options = Self::read(&config_path)?;
        options.config_path = normalize_path(&config_path);
        if let Commands::Build { args } = &cli.command {
            options.override_with(args);
        }
        let root = config_path.parent().unwrap_or(Path::new("."));
        options.finalize(root);
        options.validate()?;
        Ok(options)
    }

    /// Default options rooted at `root`, for library use without a config file.
    pub fn for_root(root: &Path) -> Self {
        let mut options = Self::default();
        options.finalize(root);
        options
    }

    fn read(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let (options, unknown) =
            Self::parse(&text).with_context(|| format!("cannot load `{}`", path.display()))?;

        if !unknown.is_empty() {
            let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
            log!("warning"; "{}: ignoring unknown keys {}", name, unknown.join(", "));
        }
        Ok(options)
    }

    /// Parse and return the dotted paths of keys no section knows.
    fn parse(text: &str) -> Result<(Self, Vec<String>)> {
        let mut unknown = Vec::new();
        let options = serde_ignored::deserialize(toml::Deserializer::new(text), |key| {
            unknown.push(key.to_string())
        })
        .map_err(ConfigError::Toml)?;
        Ok((options, unknown))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root
    }

    /// `path` relative to the root, or unchanged when it lies elsewhere.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// `build` flags win over the file.
    fn override_with(&mut self, args: &BuildArgs) {
        if !args.content.is_empty() {
            self.content.paths.clone_from(&args.content);
        }
        if let Some(output) = &args.output {
            self.build.output.clone_from(output);
        }
        if let Some(redirects) = &args.redirects {
            self.redirects.output.clone_from(redirects);
        }
        self.redirects.splat &= !args.no_splat;
    }

    /// Resolve every configured path against `root`.
    pub(crate) fn finalize(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.content.normalize(&root);
        self.messages.normalize(&root);
        self.redirects.normalize(&root);
        self.build.normalize(&root);
        self.root = root;
    }

    /// Check all sections, print warnings, fail with every error at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();
        self.i18n.validate(&mut diag);
        self.content.validate(&mut diag);
        diag.print_warnings();
        diag.into_result()
            .map_err(|diag| ConfigError::Diagnostics(diag).into())
    }
}

/// Parse without resolving paths. Unknown keys are silently dropped.
impl FromStr for Options {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text).map_err(ConfigError::Toml)?)
    }
}

/// Parse a snippet, failing on unknown keys so typos in tests surface.
#[cfg(test)]
pub fn test_parse_config(text: &str) -> Options {
    let (options, unknown) = Options::parse(text).unwrap();
    assert!(unknown.is_empty(), "unknown keys in test config: {unknown:?}");
    options
}

/// Options for `locales` with `default` as default locale, rooted at `root`.
#[cfg(test)]
pub fn test_options(root: &Path, locales: &[&str], default: &str, hide_default: bool) -> Options {
    let mut options = Options::for_root(root);
    options.i18n = LocaleConfig::new(locales.iter().copied(), default, hide_default);
    options
}
