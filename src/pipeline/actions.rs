//! Host actions: where pages and redirects go.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Options;
use crate::page::PageRequest;
use crate::route::RedirectRule;
use crate::utils::plural::plural_count;
use crate::log;

/// Page and redirect registration, implemented by the host.
pub trait Actions {
    fn create_page(&mut self, page: PageRequest) -> Result<()>;

    fn create_redirect(&mut self, rule: RedirectRule) -> Result<()>;

    /// Called once after the last page and redirect.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects everything and writes a page manifest and a `_redirects` file.
#[derive(Debug, Default)]
pub struct ManifestActions {
    manifest: PathBuf,
    redirects_file: PathBuf,
    pages: Vec<PageRequest>,
    redirects: Vec<RedirectRule>,
}

impl ManifestActions {
    pub fn new(manifest: impl Into<PathBuf>, redirects_file: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            redirects_file: redirects_file.into(),
            ..Self::default()
        }
    }

    pub fn for_options(options: &Options) -> Self {
        Self::new(&options.build.output, &options.redirects.output)
    }

    pub fn pages(&self) -> &[PageRequest] {
        &self.pages
    }

    pub fn redirects(&self) -> &[RedirectRule] {
        &self.redirects
    }

    /// `_redirects` content, one rule per line.
    pub fn redirects_text(&self) -> String {
        self.redirects
            .iter()
            .map(|rule| format!("{rule}\n"))
            .collect()
    }
}

impl Actions for ManifestActions {
    fn create_page(&mut self, page: PageRequest) -> Result<()> {
        self.pages.push(page);
        Ok(())
    }

    fn create_redirect(&mut self, rule: RedirectRule) -> Result<()> {
        self.redirects.push(rule);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let manifest = serde_json::to_string_pretty(&self.pages)?;
        write_file(&self.manifest, &manifest)?;
        write_file(&self.redirects_file, &self.redirects_text())?;

        log!("build"; "wrote {} to {}", plural_count(self.pages.len(), "page"), self.manifest.display());
        log!("redirect"; "wrote {} to {}",
            plural_count(self.redirects.len(), "redirect"),
            self.redirects_file.display());
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write '{}'", path.display()))
}
