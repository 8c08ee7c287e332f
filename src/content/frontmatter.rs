//! Frontmatter extraction from YAML-like (`---`) or TOML (`+++`) blocks.
//!
//! The YAML side is deliberately small: `key: value` pairs, nesting by
//! indentation, scalar values, comma lists. That covers what routing reads
//! (`template`, the slug key, `locales.<code>.slug`).

use anyhow::{Result, anyhow};
use serde_json::{Map, Value};

/// Parsed frontmatter as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter(Map<String, Value>);

/// One `[locales.<code>]` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleBlock {
    pub locale: String,
    pub slug: Option<String>,
}

impl Frontmatter {
    /// Key holding per-locale blocks.
    pub const LOCALES_KEY: &'static str = "locales";

    /// Extract frontmatter and return (frontmatter, body).
    pub fn extract(content: &str) -> Result<Option<(Self, &str)>> {
        match detect_frontmatter(content) {
            Some((fm, body, is_toml)) => {
                let map = if is_toml {
                    toml::from_str::<Map<String, Value>>(fm)
                        .map_err(|e| anyhow!("invalid TOML frontmatter: {}", e))?
                } else {
                    parse_yaml_like(fm)
                };
                Ok(Some((Self(map), body)))
            }
            None => Ok(None),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-empty string value of `key`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn template(&self) -> Option<&str> {
        self.get_str("template")
    }

    /// Per-locale blocks in declaration order.
    pub fn locale_blocks(&self, slug_key: &str) -> Vec<LocaleBlock> {
        let Some(Value::Object(blocks)) = self.0.get(Self::LOCALES_KEY) else {
            return Vec::new();
        };
        blocks
            .iter()
            .map(|(locale, block)| LocaleBlock {
                locale: locale.clone(),
                slug: block
                    .get(slug_key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .map(str::to_string),
            })
            .collect()
    }
}

/// Split a `---` (YAML-like) or `+++` (TOML) fenced header off `content`:
/// `(header, body, is_toml)`.
fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if let Some(rest) = trimmed.strip_prefix(fence)
            && let Some(end) = rest.find(&format!("\n{fence}"))
        {
            let fm = rest[..end].trim_matches(['\r', '\n']);
            let body = rest[end + 1 + fence.len()..].trim_start_matches(['\r', '\n']);
            return Some((fm, body, is_toml));
        }
    }

    None
}

/// Parse YAML-like frontmatter with indentation nesting.
fn parse_yaml_like(content: &str) -> Map<String, Value> {
    let mut root = Map::new();
    // (indent, key path) of open objects
    let mut stack: Vec<(usize, Vec<String>)> = Vec::new();

    for raw in content.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent = raw.len() - raw.trim_start().len();
        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let key = unquote(key.trim()).to_string();
        let value = value.trim();

        while stack.last().is_some_and(|(level, _)| *level >= indent) {
            stack.pop();
        }
        let mut path = stack.last().map(|(_, p)| p.clone()).unwrap_or_default();
        let Some(parent) = object_at(&mut root, &path) else {
            continue;
        };

        if value.is_empty() {
            parent.insert(key.clone(), Value::Object(Map::new()));
            path.push(key);
            stack.push((indent, path));
        } else {
            parent.insert(key, parse_yaml_value(value));
        }
    }

    root
}

/// Object at `path`, created on the way. Scalars in the way are replaced.
fn object_at<'m>(
    root: &'m mut Map<String, Value>,
    path: &[String],
) -> Option<&'m mut Map<String, Value>> {
    let mut current = root;
    for key in path {
        let slot = current
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = slot.as_object_mut()?;
    }
    Some(current)
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

/// Scalar or inline list: `true`, `~`, `3`, `1.5`, `"a, b"`, `[a, b]`, `a, b`.
/// Anything else is a string.
fn parse_yaml_value(s: &str) -> Value {
    if s.starts_with(['"', '\'']) {
        return Value::String(unquote(s).to_string());
    }
    match s.to_ascii_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" | "~" => return Value::Null,
        _ => {}
    }
    if let Ok(int) = s.parse::<i64>() {
        return int.into();
    }
    if let Some(float) = s.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        return Value::Number(float);
    }

    let list = s
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .or_else(|| s.contains(',').then_some(s));
    match list {
        Some(items) => items
            .split(',')
            .map(|item| unquote(item.trim()))
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect(),
        None => Value::String(s.to_string()),
    }
}
