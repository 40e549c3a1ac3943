use std::collections::BTreeMap;
use std::fmt;

/// Per-field validation failures, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn field_names(&self) -> Vec<String> {
        self.field_errors.keys().cloned().collect()
    }

    /// Messages recorded for one field (empty if the field is valid).
    pub fn messages(&self, field: &str) -> &[String] {
        self.field_errors
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Fold another error's fields into this one.
    pub fn merge(&mut self, other: ValidationError) {
        for (field, messages) in other.field_errors {
            self.field_errors.entry(field).or_default().extend(messages);
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} invalid field(s): {}",
            self.field_errors.len(),
            self.field_names().join(", ")
        )
    }
}

impl std::error::Error for ValidationError {}
