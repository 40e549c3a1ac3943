//! # aula-storage
//!
//! Implementations of [`IDurableStore`](aula_core::IDurableStore):
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`MemoryStore`] | Tests and ephemeral sessions |
//! | [`SqliteStore`] | Desktop shells; one `kv_store` table, WAL mode |
//!
//! Plus [`LayoutPreferences`], the persisted UI layout settings.

pub mod memory;
pub mod preferences;
pub mod sqlite;

pub use memory::MemoryStore;
pub use preferences::{LayoutDensity, LayoutPreferences, Theme};
pub use sqlite::SqliteStore;

use aula_core::errors::{AulaError, StorageError};

/// Convert a backend error message into an `AulaError`.
pub(crate) fn to_storage_err(message: String) -> AulaError {
    StorageError::Backend { message }.into()
}
