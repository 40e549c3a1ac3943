//! Declarative per-field validation.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use aula_core::errors::ValidationError;

use crate::rut;

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

#[derive(Debug, Clone)]
pub enum FieldRule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    Rut,
    /// Value must match the regex; the string is the error message.
    Pattern(Regex, String),
}

impl FieldRule {
    /// Build a pattern rule. Returns `None` for an invalid regex.
    pub fn pattern(regex: &str, message: impl Into<String>) -> Option<Self> {
        Regex::new(regex).ok().map(|re| Self::Pattern(re, message.into()))
    }

    /// Error message if `value` breaks this rule. Empty values only fail
    /// [`Required`](Self::Required).
    pub fn check(&self, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return matches!(self, Self::Required).then(|| "Este campo es obligatorio".to_string());
        }
        let length = value.chars().count();
        match self {
            Self::Required => None,
            Self::MinLength(min) if length < *min => {
                Some(format!("Debe tener al menos {min} caracteres"))
            }
            Self::MaxLength(max) if length > *max => {
                Some(format!("Debe tener como máximo {max} caracteres"))
            }
            Self::MinLength(_) | Self::MaxLength(_) => None,
            Self::Email => {
                let valid = EMAIL.as_ref().is_some_and(|re| re.is_match(value));
                (!valid).then(|| "Correo electrónico inválido".to_string())
            }
            Self::Rut => (!rut::validate(value)).then(|| "RUT inválido".to_string()),
            Self::Pattern(re, message) => (!re.is_match(value)).then(|| message.clone()),
        }
    }
}

/// Ordered field rules for one form or wizard step.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<(String, Vec<FieldRule>)>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, rules: impl IntoIterator<Item = FieldRule>) -> Self {
        self.fields
            .push((name.to_string(), rules.into_iter().collect()));
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Validate every field in `values`. Missing fields count as empty.
    pub fn validate(&self, values: &Map<String, Value>) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        for (name, rules) in &self.fields {
            let value = text_of(values.get(name));
            for message in rules.iter().filter_map(|rule| rule.check(&value)) {
                errors.push(name, message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => if *b { "true".into() } else { String::new() },
        Some(other) => other.to_string(),
    }
}
