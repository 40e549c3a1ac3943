//! Serialization of the whole cache map to durable storage.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use aula_core::errors::{AulaResult, StorageError};
use aula_core::IDurableStore;

use crate::entry::CacheEntry;

pub(crate) fn encode<T: Serialize>(
    entries: &HashMap<String, CacheEntry<T>>,
    compress: bool,
) -> AulaResult<String> {
    let json = serde_json::to_string(entries)?;
    Ok(if compress { STANDARD.encode(json) } else { json })
}

pub(crate) fn decode<T: DeserializeOwned>(
    key: &str,
    raw: &str,
    compress: bool,
) -> AulaResult<HashMap<String, CacheEntry<T>>> {
    let json = if compress {
        let bytes = STANDARD
            .decode(raw.trim())
            .map_err(|e| corrupt(key, e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| corrupt(key, e.to_string()))?
    } else {
        raw.to_string()
    };
    serde_json::from_str(&json).map_err(|e| corrupt(key, e.to_string()).into())
}

fn corrupt(key: &str, details: String) -> StorageError {
    StorageError::CorruptPayload {
        key: key.to_string(),
        details,
    }
}

pub(crate) fn load<T: DeserializeOwned>(
    store: &dyn IDurableStore,
    key: &str,
    compress: bool,
) -> AulaResult<Option<HashMap<String, CacheEntry<T>>>> {
    match store.read(key)? {
        Some(raw) => decode(key, &raw, compress).map(Some),
        None => Ok(None),
    }
}
