//! Per-locale message catalogs.
//!
//! A catalog is `<dir>/<locale>.{toml,json,yml,yaml}`. Pages receive
//! it flattened: `{"nav": {"home": "Home"}}` becomes `{"nav.home": "Home"}`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::config::MessagesConfig;
use crate::{debug, log};

/// Catalog file formats, in lookup order.
const FORMATS: &[&str] = &["toml", "json", "yml", "yaml"];

#[derive(Debug, Clone)]
pub struct MessageCatalogs {
    dir: PathBuf,
}

impl MessageCatalogs {
    pub fn new(config: &MessagesConfig) -> Self {
        Self::at(&config.path)
    }

    pub fn at(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Existing catalog file of `locale`.
    fn file(&self, locale: &str) -> Option<PathBuf> {
        FORMATS
            .iter()
            .map(|ext| self.dir.join(format!("{locale}.{ext}")))
            .find(|path| path.is_file())
    }

    pub fn exists(&self, locale: &str) -> bool {
        self.file(locale).is_some()
    }

    /// Flattened catalog of `locale`. A missing catalog is empty.
    pub fn load(&self, locale: &str) -> Result<Map<String, Value>> {
        let Some(path) = self.file(locale) else {
            debug!("messages"; "no catalog for {} in {}", locale, self.dir.display());
            return Ok(Map::new());
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        let invalid = |format: &str| format!("invalid {format} in '{}'", path.display());
        let value: Value = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text).with_context(|| invalid("JSON"))?,
            Some("yml" | "yaml") => {
                serde_saphyr::from_str(&text).with_context(|| invalid("YAML"))?
            }
            _ => toml::from_str(&text).with_context(|| invalid("TOML"))?,
        };

        Ok(flatten_messages(&value))
    }

    /// Create an empty catalog for every locale without one.
    /// Returns the created files.
    pub fn ensure<S: AsRef<str>>(&self, locales: &[S]) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        for locale in locales {
            let locale = locale.as_ref();
            if self.exists(locale) {
                continue;
            }
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("failed to create '{}'", self.dir.display()))?;
            let path = self.dir.join(format!("{locale}.toml"));
            fs::write(&path, "")
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            log!("messages"; "created {}", path.display());
            created.push(path);
        }
        Ok(created)
    }
}

/// Flatten nested objects into dotted keys. Arrays and scalars are leaves.
pub fn flatten_messages(value: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(&mut out, String::new(), value);
    out
}

fn flatten_into(out: &mut Map<String, Value>, prefix: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(out, key, child);
            }
        }
        leaf if !prefix.is_empty() => {
            out.insert(prefix, leaf.clone());
        }
        _ => {}
    }
}
