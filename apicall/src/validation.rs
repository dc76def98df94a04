//! Structured validation errors and the attribute validators that fill them.

use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::messages::{field_label, Catalog};
use crate::ErrorCategory;

/// Sentinel field for errors that belong to the call as a whole.
pub const BASE: &str = "base";

/// One thing wrong with a field: an error type plus its options.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorDetail {
    pub error: String,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl ErrorDetail {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            options: Map::new(),
        }
    }
}

/// Field name → errors, in the order fields were first reported.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationErrors {
    entries: Vec<(String, Vec<ErrorDetail>)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, error: &str) {
        self.push(field, ErrorDetail::new(error));
    }

    pub fn add_with_options(&mut self, field: &str, error: &str, options: Map<String, Value>) {
        self.push(
            field,
            ErrorDetail {
                error: error.to_string(),
                options,
            },
        );
    }

    /// Records a failure category under [`BASE`].
    pub fn add_category(&mut self, category: &ErrorCategory) {
        self.add(BASE, category.as_str());
    }

    fn push(&mut self, field: &str, detail: ErrorDetail) {
        match self.entries.iter_mut().find(|entry| entry.0 == field) {
            Some((_, details)) => details.push(detail),
            None => self.entries.push((field.to_string(), vec![detail])),
        }
    }

    /// Errors recorded for `field`; empty when there are none.
    pub fn details(&self, field: &str) -> &[ErrorDetail] {
        self.entries
            .iter()
            .find(|entry| entry.0 == field)
            .map(|(_, details)| details.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, field: &str, error: &str) -> bool {
        self.details(field).iter().any(|d| d.error == error)
    }

    /// The first category recorded under [`BASE`].
    pub fn base_category(&self) -> Option<ErrorCategory> {
        self.details(BASE)
            .first()
            .and_then(|detail| detail.error.parse().ok())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded errors across all fields.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, details)| details.len()).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sentences like `"Name can't be blank"`; base errors stand alone.
    pub fn full_messages(&self) -> Vec<String> {
        let catalog = Catalog::global();
        self.entries
            .iter()
            .flat_map(|(field, details)| {
                details.iter().map(move |detail| {
                    let message = catalog.error_message(&detail.error, &detail.options);
                    if field == BASE {
                        message
                    } else {
                        format!("{} {}", field_label(field), message)
                    }
                })
            })
            .collect()
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, details) in &self.entries {
            map.serialize_entry(field, details)?;
        }
        map.end()
    }
}

fn count_option(count: impl Into<Value>) -> Map<String, Value> {
    let mut options = Map::new();
    options.insert("count".to_string(), count.into());
    options
}

/// `blank` when the value is missing or whitespace only.
pub fn validate_presence(errors: &mut ValidationErrors, field: &str, value: Option<&str>) -> bool {
    match value {
        Some(v) if !v.trim().is_empty() => true,
        _ => {
            errors.add(field, "blank");
            false
        }
    }
}

/// `too_short` / `too_long`, counted in characters.
pub fn validate_length(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    min: Option<usize>,
    max: Option<usize>,
) -> bool {
    let len = value.chars().count();
    if let Some(min) = min {
        if len < min {
            errors.add_with_options(field, "too_short", count_option(min));
            return false;
        }
    }
    if let Some(max) = max {
        if len > max {
            errors.add_with_options(field, "too_long", count_option(max));
            return false;
        }
    }
    true
}

/// `invalid` when the value does not match `pattern`.
pub fn validate_format(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    pattern: &Regex,
) -> bool {
    if pattern.is_match(value) {
        true
    } else {
        errors.add(field, "invalid");
        false
    }
}

/// `inclusion` unless the value is one of `allowed` (case-insensitive).
pub fn validate_inclusion(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    allowed: &[&str],
) -> bool {
    let lower = value.trim().to_lowercase();
    if allowed.iter().any(|a| a.to_lowercase() == lower) {
        true
    } else {
        let mut options = Map::new();
        options.insert("value".to_string(), Value::String(value.to_string()));
        errors.add_with_options(field, "inclusion", options);
        false
    }
}

/// `not_a_number`, then range checks, for a numeric string.
pub fn validate_numericality(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    min: Option<i64>,
    max: Option<i64>,
) -> bool {
    let Ok(number) = value.trim().parse::<i64>() else {
        errors.add(field, "not_a_number");
        return false;
    };
    if let Some(min) = min {
        if number < min {
            errors.add_with_options(field, "greater_than_or_equal_to", count_option(min));
            return false;
        }
    }
    if let Some(max) = max {
        if number > max {
            errors.add_with_options(field, "less_than_or_equal_to", count_option(max));
            return false;
        }
    }
    true
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
