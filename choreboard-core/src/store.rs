//! Key-value storage boundary.
//!
//! Records are stored as JSON values under a fixed key prefix. The whole
//! namespace round-trips through `export_data`/`import_data` as one JSON
//! object, and import replaces everything under the prefix.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ChoreBoardError, ChoreBoardResult};

/// Namespace prefix for all choreboard keys.
pub const KEY_PREFIX: &str = "choreboard/";

fn namespaced(key: &str) -> String {
    format!("{}{}", KEY_PREFIX, key)
}

/// Synchronous key-value storage over JSON-serializable records.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ChoreBoardResult<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> ChoreBoardResult<()>;
    /// Returns false if the key was absent.
    fn remove(&mut self, key: &str) -> ChoreBoardResult<bool>;
    /// All keys in the namespace, without the prefix.
    fn keys(&self) -> ChoreBoardResult<Vec<String>>;

    /// Snapshot the whole namespace as one JSON object, prefixed keys
    /// included.
    fn export_data(&self) -> ChoreBoardResult<Value> {
        let mut object = serde_json::Map::new();
        for key in self.keys()? {
            if let Some(value) = self.get(&key)? {
                object.insert(namespaced(&key), value);
            }
        }
        Ok(Value::Object(object))
    }

    /// Replace the whole namespace with the given snapshot. Keys outside
    /// the namespace prefix are ignored.
    fn import_data(&mut self, data: Value) -> ChoreBoardResult<()> {
        let Value::Object(object) = data else {
            return Err(ChoreBoardError::Serialization(
                "Import data must be a JSON object".into(),
            ));
        };

        for key in self.keys()? {
            self.remove(&key)?;
        }
        for (key, value) in object {
            if let Some(bare) = key.strip_prefix(KEY_PREFIX) {
                self.set(bare, value)?;
            }
        }
        Ok(())
    }
}

/// In-memory store, mostly for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ChoreBoardResult<Option<Value>> {
        Ok(self.entries.get(&namespaced(key)).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> ChoreBoardResult<()> {
        self.entries.insert(namespaced(key), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ChoreBoardResult<bool> {
        Ok(self.entries.remove(&namespaced(key)).is_some())
    }

    fn keys(&self) -> ChoreBoardResult<Vec<String>> {
        Ok(self
            .entries
            .keys()
            .filter_map(|k| k.strip_prefix(KEY_PREFIX).map(String::from))
            .collect())
    }
}

/// File-backed store: one JSON document, written atomically (tmp + rename)
/// after every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Open (or create) the store document at the given path.
    pub fn open(path: impl Into<PathBuf>) -> ChoreBoardResult<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| {
                ChoreBoardError::Storage(format!(
                    "Corrupt store file {}: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            BTreeMap::new()
        };

        Ok(JsonFileStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> ChoreBoardResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| ChoreBoardError::Serialization(e.to_string()))?;

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> ChoreBoardResult<Option<Value>> {
        Ok(self.entries.get(&namespaced(key)).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> ChoreBoardResult<()> {
        self.entries.insert(namespaced(key), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> ChoreBoardResult<bool> {
        let removed = self.entries.remove(&namespaced(key)).is_some();
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    fn keys(&self) -> ChoreBoardResult<Vec<String>> {
        Ok(self
            .entries
            .keys()
            .filter_map(|k| k.strip_prefix(KEY_PREFIX).map(String::from))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        store.set("chores", json!([{"id": "c1"}])).unwrap();

        assert_eq!(store.get("chores").unwrap(), Some(json!([{"id": "c1"}])));
        assert_eq!(store.keys().unwrap(), vec!["chores"]);
        assert!(store.remove("chores").unwrap());
        assert!(!store.remove("chores").unwrap());
        assert_eq!(store.get("chores").unwrap(), None);
    }

    #[test]
    fn export_import_replaces_namespace() {
        let mut store = MemoryStore::new();
        store.set("chores", json!(["a"])).unwrap();
        store.set("family", json!(["b"])).unwrap();

        let snapshot = store.export_data().unwrap();
        assert_eq!(
            snapshot,
            json!({"choreboard/chores": ["a"], "choreboard/family": ["b"]})
        );

        let mut other = MemoryStore::new();
        other.set("stale", json!("old")).unwrap();
        other.import_data(snapshot).unwrap();

        assert_eq!(other.get("stale").unwrap(), None);
        assert_eq!(other.get("chores").unwrap(), Some(json!(["a"])));
        assert_eq!(other.get("family").unwrap(), Some(json!(["b"])));
    }

    #[test]
    fn import_rejects_non_objects() {
        let mut store = MemoryStore::new();
        assert!(store.import_data(json!(["not", "an", "object"])).is_err());
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set("chores", json!([{"id": "c1"}])).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("chores").unwrap(), Some(json!([{"id": "c1"}])));
    }

    #[test]
    fn file_store_rejects_corrupt_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, "not json at all").unwrap();

        assert!(JsonFileStore::open(&path).is_err());
    }
}
