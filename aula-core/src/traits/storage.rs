use crate::errors::AulaResult;

/// Best-effort durable key/value storage (the browser `localStorage`
/// analogue). Values are opaque strings, usually JSON.
pub trait IDurableStore: Send + Sync {
    fn read(&self, key: &str) -> AulaResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> AulaResult<()>;
    fn remove(&self, key: &str) -> AulaResult<()>;
}
