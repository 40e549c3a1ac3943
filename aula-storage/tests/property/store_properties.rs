use aula_core::IDurableStore;
use aula_storage::{MemoryStore, SqliteStore};
use proptest::prelude::*;

proptest! {
    #[test]
    fn memory_last_write_wins(key in "[a-z-]{1,24}", values in prop::collection::vec(".{0,64}", 1..8)) {
        let store = MemoryStore::new();
        for v in &values {
            store.write(&key, v).unwrap();
        }
        prop_assert_eq!(store.read(&key).unwrap(), values.last().cloned());
    }

    #[test]
    fn sqlite_matches_memory(ops in prop::collection::vec(("[a-c]", prop::option::of("[a-z0-9]{0,16}")), 0..32)) {
        let memory = MemoryStore::new();
        let sqlite = SqliteStore::open_in_memory().unwrap();
        for (key, value) in &ops {
            match value {
                Some(v) => {
                    memory.write(key, v).unwrap();
                    sqlite.write(key, v).unwrap();
                }
                None => {
                    memory.remove(key).unwrap();
                    sqlite.remove(key).unwrap();
                }
            }
        }
        for key in ["a", "b", "c"] {
            prop_assert_eq!(memory.read(key).unwrap(), sqlite.read(key).unwrap());
        }
    }
}
