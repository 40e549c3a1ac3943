//! In-memory store, the `localStorage` stand-in.

use std::collections::HashMap;
use std::sync::Mutex;

use aula_core::errors::AulaResult;
use aula_core::IDurableStore;

use crate::to_storage_err;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl IDurableStore for MemoryStore {
    fn read(&self, key: &str) -> AulaResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> AulaResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| to_storage_err(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AulaResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| to_storage_err(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
