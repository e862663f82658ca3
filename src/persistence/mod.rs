mod snapshot;

pub use snapshot::{read_import, parse_import, IncomingSnapshot, Snapshot, VisitedParkRecord};

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::catalog::{Catalog, ParkId};
use crate::tracker::VisitedSet;

/// Key the visited set is stored under
pub const VISITED_KEY: &str = "ebrp-visited-parks";

/// String key/value store, the local equivalent of browser storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Key/value store persisted as one JSON object on disk
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store; a missing file is an empty store, a corrupt one is
    /// logged and treated as empty
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading store {}", path.display()))?;
            serde_json::from_str(&content).unwrap_or_else(|err| {
                log::warn!("ignoring unreadable store {}: {}", path.display(), err);
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };
        log::debug!("opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to a sibling temp file, then rename over the store
    fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&tmp, content).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// In-memory store; clones share the same entries
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the visited set under [`VISITED_KEY`]
pub struct VisitedStore {
    store: Box<dyn KeyValueStore>,
}

impl VisitedStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored visited ids that still exist in the catalog; empty when the
    /// key is absent or unparsable
    pub fn load(&self, catalog: &Catalog) -> VisitedSet {
        let Some(raw) = self.store.get(VISITED_KEY) else {
            log::info!("no saved progress, starting fresh");
            return VisitedSet::new();
        };

        let ids: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(ids) => ids,
            Err(err) => {
                log::warn!("saved progress is unreadable, starting fresh: {}", err);
                return VisitedSet::new();
            }
        };

        let mut visited = VisitedSet::new();
        for value in ids {
            match value.as_u64().and_then(|id| ParkId::try_from(id).ok()) {
                Some(id) if catalog.contains(id) => {
                    visited.insert(id);
                }
                _ => log::debug!("dropping saved id {} not in catalog", value),
            }
        }
        log::info!("loaded {} visited parks", visited.len());
        visited
    }

    pub fn save(&mut self, visited: &VisitedSet) -> Result<()> {
        let ids: Vec<ParkId> = visited.iter().copied().collect();
        self.store.set(VISITED_KEY, &serde_json::to_string(&ids)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::park;

    fn catalog() -> Catalog {
        Catalog::new(vec![park(1, "A", "X", 1.0), park(2, "B", "Y", 2.0)]).unwrap()
    }

    #[test]
    fn test_absent_key_is_empty() {
        let store = VisitedStore::new(Box::new(MemoryStore::new()));
        assert!(store.load(&catalog()).is_empty());
    }

    #[test]
    fn test_unparsable_value_is_empty() {
        let mut memory = MemoryStore::new();
        memory.set(VISITED_KEY, "not json").unwrap();
        let store = VisitedStore::new(Box::new(memory));
        assert!(store.load(&catalog()).is_empty());
    }

    #[test]
    fn test_load_drops_unknown_ids() {
        let mut memory = MemoryStore::new();
        memory.set(VISITED_KEY, "[2, 99, \"x\", -1]").unwrap();
        let store = VisitedStore::new(Box::new(memory));
        assert_eq!(store.load(&catalog()).into_iter().collect::<Vec<_>>(), [2]);
    }

    #[test]
    fn test_save_writes_id_array() {
        let memory = MemoryStore::new();
        let mut store = VisitedStore::new(Box::new(memory.clone()));
        store.save(&[2, 1].into_iter().collect()).unwrap();
        assert_eq!(memory.get(VISITED_KEY).as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(VISITED_KEY), None);
        store.set(VISITED_KEY, "[5]").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(VISITED_KEY).as_deref(), Some("[5]"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "][").unwrap();
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(VISITED_KEY), None);
    }
}
