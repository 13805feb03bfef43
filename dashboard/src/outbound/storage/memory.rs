//! Process-local key-value store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Key-value store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    fn entries(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, KeyValueStoreError> {
        self.entries
            .lock()
            .map_err(|_| KeyValueStoreError::read("memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.entries()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn set_get_remove() {
        let store = MemoryKeyValueStore::default();
        assert_eq!(store.get("theme").expect("get"), None);
        store.set("theme", "dark").expect("set");
        assert_eq!(store.get("theme").expect("get").as_deref(), Some("dark"));
        store.remove("theme").expect("remove");
        store.remove("theme").expect("removing an absent key succeeds");
        assert_eq!(store.get("theme").expect("get"), None);
    }
}
