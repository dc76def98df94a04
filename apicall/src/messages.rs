//! Human-readable messages for error categories and validation errors.
//!
//! The English catalog is bundled into the binary and parsed once on first
//! use. Lookups never fail: unknown keys are humanized instead.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::ErrorCategory;

const BUNDLED_EN: &str = include_str!("../locales/en.toml");

/// Errors loading a message catalog.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse message catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Message table keyed by category tag and validation error type.
#[derive(Debug, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    categories: HashMap<String, String>,
    #[serde(default)]
    errors: HashMap<String, String>,
}

impl Catalog {
    /// Parses a catalog from TOML with `[categories]` and `[errors]` tables.
    pub fn from_toml(source: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(source)?)
    }

    /// The process-wide catalog, loaded from the bundled English table.
    pub fn global() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::from_toml(BUNDLED_EN).unwrap_or_else(|e| {
                tracing::error!("{}", e);
                Catalog::default()
            })
        })
    }

    pub fn has_category(&self, category: &ErrorCategory) -> bool {
        self.categories.contains_key(category.as_str())
    }

    /// Default message for a category.
    pub fn category_message(&self, category: &ErrorCategory) -> String {
        self.categories
            .get(category.as_str())
            .cloned()
            .unwrap_or_else(|| capitalize(&humanize(category.as_str())))
    }

    /// Message for a validation error type, with `%{key}` placeholders
    /// filled from `options`. Category tags recorded as errors resolve to
    /// their category message.
    pub fn error_message(&self, error: &str, options: &Map<String, Value>) -> String {
        let template = match self.errors.get(error) {
            Some(template) => template.clone(),
            None => match self.categories.get(error) {
                Some(message) => message.clone(),
                None => humanize(error),
            },
        };
        interpolate(&template, options)
    }
}

/// `"first_name"` → `"first name"`.
pub fn humanize(key: &str) -> String {
    key.replace('_', " ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Humanized, capitalized field name as it appears in full messages.
/// A trailing `_id` is dropped: `"account_id"` → `"Account"`.
pub fn field_label(field: &str) -> String {
    capitalize(&humanize(field.strip_suffix("_id").unwrap_or(field)))
}

fn interpolate(template: &str, options: &Map<String, Value>) -> String {
    let mut out = template.to_string();
    for (key, value) in options {
        let placeholder = format!("%{{{}}}", key);
        if out.contains(&placeholder) {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            out = out.replace(&placeholder, &text);
        }
    }
    out
}
