//! `i18n.toml` key addressed by diagnostics.

use std::fmt;

/// `[section] key`, displayed as `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath {
    section: &'static str,
    key: &'static str,
}

impl FieldPath {
    pub const fn new(section: &'static str, key: &'static str) -> Self {
        Self { section, key }
    }

    /// Table name, without brackets (`i18n`).
    pub const fn section(&self) -> &'static str {
        self.section
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_order() {
        let locales = FieldPath::new("i18n", "locales");
        assert_eq!(locales.to_string(), "i18n.locales");
        assert_eq!(locales.section(), "i18n");
        assert!(FieldPath::new("content", "paths") < locales);
    }
}
