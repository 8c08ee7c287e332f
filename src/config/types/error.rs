//! Configuration and routing errors.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use super::FieldPath;
use crate::log;

/// Errors raised by `i18n.toml` loading and by route derivation.
///
/// Loading errors abort the command. The routing variants
/// (`UnregisteredLocale`, `UnmatchedContentRoot`) come back next to a safe
/// default and are only logged.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),

    // no #[source]: the diagnostics already print themselves
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),

    #[error("locale `{locale}` of `{file}` is not in `i18n.locales`")]
    UnregisteredLocale { locale: String, file: String },

    #[error("`{path}` is outside every content path, parsed relative to `{fallback}`")]
    UnmatchedContentRoot { path: String, fallback: String },
}

impl ConfigError {
    /// Routing errors: the value next to them is still usable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnregisteredLocale { .. } | Self::UnmatchedContentRoot { .. }
        )
    }

    pub fn report(&self) {
        log!("error"; "{}", self);
    }
}

/// One problem with one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDiagnostic {
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {} {}", self.field.key().cyan(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n    {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

/// Validation results of all sections; errors are fatal only once
/// everything has been checked.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
    warnings: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.errors.push(ConfigDiagnostic {
            field,
            message: message.into(),
            hint: None,
        });
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors.push(ConfigDiagnostic {
            field,
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.warnings.push(ConfigDiagnostic {
            field,
            message: message.into(),
            hint: None,
        });
    }

    pub fn print_warnings(&self) {
        for warning in &self.warnings {
            log!("warning"; "{}: {}", warning.field, warning.message);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ConfigDiagnostic] {
        &self.warnings
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Errors grouped under their `[section]` header.
///
/// ```text
/// invalid i18n.toml (2 errors)
///
/// [i18n]
///   locales `en` is listed twice
///   default_locale `de` is not one of the locales
///     hint: add `de` to `i18n.locales`
/// ```
impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections: BTreeMap<&str, Vec<&ConfigDiagnostic>> = BTreeMap::new();
        for error in &self.errors {
            sections.entry(error.field.section()).or_default().push(error);
        }

        let count = self.errors.len();
        write!(
            f,
            "{} ({} error{})",
            "invalid i18n.toml".red().bold(),
            count,
            crate::utils::plural::plural_s(count)
        )?;
        for (section, errors) in sections {
            write!(f, "\n\n{}", format_args!("[{section}]").bold())?;
            for error in errors {
                write!(f, "\n{error}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
