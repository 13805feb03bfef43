//! Key-value store persisted as a flat JSON object on disk.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Mutex, MutexGuard};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use super::atomic_io::write_atomic;
use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Key-value store backed by a JSON file such as `{"theme": "dark"}`.
///
/// The whole file is loaded on open and rewritten atomically on every change.
/// A missing file is treated as empty and created on first write.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use dashboard::domain::ports::KeyValueStore;
/// use dashboard::outbound::storage::JsonFileKeyValueStore;
///
/// let store = JsonFileKeyValueStore::open(Utf8Path::new("dashboard-state.json"))?;
/// store.set("theme", "dark")?;
/// # Ok::<(), dashboard::domain::ports::KeyValueStoreError>(())
/// ```
#[derive(Debug)]
pub struct JsonFileKeyValueStore {
    dir: Dir,
    file_name: String,
    path: Utf8PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileKeyValueStore {
    /// Open (or prepare to create) the store at `path`, creating parent
    /// directories as needed.
    pub fn open(path: &Utf8Path) -> Result<Self, KeyValueStoreError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| KeyValueStoreError::read(format!("{path} is not a file path")))?
            .to_owned();
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));

        Dir::create_ambient_dir_all(parent, ambient_authority())
            .map_err(|err| KeyValueStoreError::write(format!("create {parent}: {err}")))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| KeyValueStoreError::read(format!("open {parent}: {err}")))?;

        let entries: BTreeMap<String, String> = match dir.read_to_string(&file_name) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|err| KeyValueStoreError::read(format!("parse {path}: {err}")))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(KeyValueStoreError::read(format!("read {path}: {err}"))),
        };
        debug!(path = %path, keys = entries.len(), "opened key-value store");

        Ok(Self {
            dir,
            file_name,
            path: path.to_owned(),
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Utf8Path {
        self.path.as_path()
    }

    fn entries(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, KeyValueStoreError> {
        self.entries
            .lock()
            .map_err(|_| KeyValueStoreError::read(format!("{} lock poisoned", self.path)))
    }

    /// Write `next` to disk, then make it the in-memory state.
    fn commit(
        &self,
        entries: &mut BTreeMap<String, String>,
        next: BTreeMap<String, String>,
    ) -> Result<(), KeyValueStoreError> {
        let encoded = serde_json::to_string_pretty(&next)
            .map_err(|err| KeyValueStoreError::write(format!("encode {}: {err}", self.path)))?;
        write_atomic(&self.dir, &self.file_name, &encoded)
            .map_err(|err| KeyValueStoreError::write(format!("write {}: {err}", self.path)))?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for JsonFileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let mut entries = self.entries()?;
        if entries.get(key).is_some_and(|existing| existing == value) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.insert(key.to_owned(), value.to_owned());
        self.commit(&mut entries, next)
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let mut entries = self.entries()?;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.commit(&mut entries, next)
    }
}
