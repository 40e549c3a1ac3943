//! # aula-cache
//!
//! Generic key → value cache for API responses and derived dashboard data.
//!
//! Per-entry lifecycle: **absent → present(unexpired) → expired | evicted → absent**.
//!
//! - Entries are visible only while `now - timestamp < max_age`; expired
//!   entries are purged lazily on access.
//! - Capacity overflow evicts by least-recent `last_access` (LRU).
//! - When configured persistent, the whole map is mirrored to durable
//!   storage after every mutation and rehydrated on construction.

pub mod cache;
pub mod entry;
mod persistence;

pub use cache::{CacheStats, IntelligentCache};
pub use entry::CacheEntry;
