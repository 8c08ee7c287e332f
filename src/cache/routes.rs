//! `routes.json` / `options.json` persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Options;
use crate::route::RouteTable;
use crate::{debug, log};

/// Route table file name
pub const ROUTES_FILE: &str = "routes.json";

/// Resolved options file name
pub const OPTIONS_FILE: &str = "options.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("corrupt cache file '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode cache: {0}")]
    Encode(#[from] serde_json::Error),
}

impl PersistenceError {
    pub fn report(&self) {
        log!("cache"; "{}", self);
    }
}

/// Cache directory holding the last pass' route table and options.
#[derive(Debug, Clone)]
pub struct RouteCache {
    dir: PathBuf,
}

impl RouteCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache of a project, at `[build].cache`.
    pub fn for_options(options: &Options) -> Self {
        Self::new(&options.build.cache)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn routes_file(&self) -> PathBuf {
        self.dir.join(ROUTES_FILE)
    }

    pub fn options_file(&self) -> PathBuf {
        self.dir.join(OPTIONS_FILE)
    }

    pub fn exists(&self) -> bool {
        self.routes_file().is_file()
    }

    /// Remove the cached route table.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        let path = self.routes_file();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Write { path, source }),
        }
    }

    /// Write the table and options. Unchanged files are not rewritten.
    ///
    /// Returns whether anything was written.
    pub fn persist(&self, table: &RouteTable, options: &Options) -> Result<bool, PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let routes = table.to_json()?;
        let options = serde_json::to_string_pretty(options)?;

        let mut written = write_if_changed(&self.routes_file(), &routes)?;
        written |= write_if_changed(&self.options_file(), &options)?;

        debug!("cache"; "{} routes {} to {}",
            table.len(),
            if written { "saved" } else { "unchanged" },
            self.dir.display());
        Ok(written)
    }

    /// Cached table, `None` when there is none.
    pub fn try_restore(&self) -> Result<Option<RouteTable>, PersistenceError> {
        let path = self.routes_file();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(PersistenceError::Read { path, source }),
        };
        RouteTable::from_json(&text)
            .map(Some)
            .map_err(|source| PersistenceError::Decode { path, source })
    }

    /// Cached table, or an empty one. Failures are logged.
    pub fn restore(&self) -> RouteTable {
        match self.try_restore() {
            Ok(table) => table.unwrap_or_default(),
            Err(err) => {
                err.report();
                RouteTable::new()
            }
        }
    }
}

fn write_if_changed(path: &Path, content: &str) -> Result<bool, PersistenceError> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        return Ok(false);
    }
    fs::write(path, content).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}
