//! Multi-step form with validation gates and autosave.
//!
//! Values live in one JSON object shared by all steps. Every change is
//! autosaved to durable storage; a snapshot older than the configured
//! maximum age (24 h by default) is ignored on restore.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use aula_core::config::FormsConfig;
use aula_core::errors::ValidationError;
use aula_core::{IClock, IDurableStore};
use aula_observability::events;

use crate::schema::FormSchema;

#[derive(Debug, Clone)]
pub struct FormStep {
    pub id: String,
    pub title: String,
    pub schema: FormSchema,
}

impl FormStep {
    pub fn new(id: &str, title: &str, schema: FormSchema) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            schema,
        }
    }
}

/// Persisted wizard progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub form_id: String,
    pub values: Map<String, Value>,
    pub current_step: usize,
    pub saved_at: DateTime<Utc>,
}

pub struct FormWizard {
    form_id: String,
    steps: Vec<FormStep>,
    current: usize,
    visited: BTreeSet<usize>,
    values: Map<String, Value>,
    store: Arc<dyn IDurableStore>,
    clock: Arc<dyn IClock>,
    config: FormsConfig,
}

impl FormWizard {
    pub fn new(
        form_id: &str,
        steps: Vec<FormStep>,
        config: FormsConfig,
        store: Arc<dyn IDurableStore>,
        clock: Arc<dyn IClock>,
    ) -> Self {
        Self {
            form_id: form_id.to_string(),
            steps,
            current: 0,
            visited: BTreeSet::from([0]),
            values: Map::new(),
            store,
            clock,
            config,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn step(&self) -> Option<&FormStep> {
        self.steps.get(self.current)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    pub fn is_visited(&self, step: usize) -> bool {
        self.visited.contains(&step)
    }

    /// Completed share of the wizard, 0.0–1.0.
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        (self.current + 1) as f64 / self.steps.len() as f64
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn set_value(&mut self, field: &str, value: impl Into<Value>) {
        self.values.insert(field.to_string(), value.into());
        self.autosave();
    }

    /// Validate only the current step.
    pub fn validate_current(&self) -> Result<(), ValidationError> {
        match self.step() {
            Some(step) => step.schema.validate(&self.values),
            None => Ok(()),
        }
    }

    /// Advance if the current step validates. On the last step the
    /// position does not change.
    pub fn next(&mut self) -> Result<usize, ValidationError> {
        self.validate_current()?;
        if !self.is_last_step() {
            self.current += 1;
            self.visited.insert(self.current);
            self.autosave();
        }
        Ok(self.current)
    }

    pub fn previous(&mut self) -> usize {
        if self.current > 0 {
            self.current -= 1;
            self.autosave();
        }
        self.current
    }

    /// Jump to an already visited step. Returns whether the jump happened.
    pub fn go_to(&mut self, step: usize) -> bool {
        if step >= self.steps.len() || !self.visited.contains(&step) {
            return false;
        }
        self.current = step;
        self.autosave();
        true
    }

    /// Persist the current progress. Failures are logged and reported
    /// as `false`.
    pub fn autosave(&self) -> bool {
        let snapshot = FormSnapshot {
            form_id: self.form_id.clone(),
            values: self.values.clone(),
            current_step: self.current,
            saved_at: self.clock.now(),
        };
        let key = &self.config.autosave_key;
        let result = serde_json::to_string(&snapshot)
            .map_err(aula_core::AulaError::from)
            .and_then(|raw| self.store.write(key, &raw));
        match result {
            Ok(()) => true,
            Err(e) => {
                events::storage_failure(key, "autosave", &e.to_string());
                false
            }
        }
    }

    /// Load a saved snapshot for this form. Absent, corrupt, foreign or
    /// expired snapshots are ignored. Returns whether progress was restored.
    pub fn restore(&mut self) -> bool {
        let key = self.config.autosave_key.clone();
        let raw = match self.store.read(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                events::storage_failure(&key, "restore", &e.to_string());
                return false;
            }
        };
        let snapshot: FormSnapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                events::storage_failure(&key, "parse", &e.to_string());
                return false;
            }
        };
        if snapshot.form_id != self.form_id {
            return false;
        }
        if self.clock.now() - snapshot.saved_at > self.config.autosave_max_age() {
            tracing::debug!(form_id = %self.form_id, saved_at = %snapshot.saved_at, "autosave expired");
            return false;
        }

        let last = self.steps.len().saturating_sub(1);
        self.current = snapshot.current_step.min(last);
        self.visited = (0..=self.current).collect();
        self.values = snapshot.values;
        true
    }

    /// Drop the saved snapshot.
    pub fn clear_autosave(&self) {
        if let Err(e) = self.store.remove(&self.config.autosave_key) {
            events::storage_failure(&self.config.autosave_key, "clear", &e.to_string());
        }
    }

    /// Validate every step. On success the autosave is cleared and the
    /// values returned; on failure the wizard moves to the first invalid
    /// step and all field errors are returned.
    pub fn submit(&mut self) -> Result<Map<String, Value>, ValidationError> {
        let mut errors = ValidationError::new();
        let mut first_invalid = None;
        for (index, step) in self.steps.iter().enumerate() {
            if let Err(step_errors) = step.schema.validate(&self.values) {
                first_invalid.get_or_insert(index);
                errors.merge(step_errors);
            }
        }
        if let Some(index) = first_invalid {
            self.current = index;
            self.visited.insert(index);
            return Err(errors);
        }
        self.clear_autosave();
        Ok(self.values.clone())
    }
}
