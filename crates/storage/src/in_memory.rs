use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use hbnb_core::{Model, Record, Storage, StorageError};
use hbnb_models::ClassRegistry;

/// In-memory storage collaborator.
///
/// Tracks one snapshot per `<ClassName>.<id>` key. `save` copies the dictionary
/// form of every tracked object into the flushed set, which `reload` can later
/// turn back into live objects.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    objects: RwLock<BTreeMap<String, Box<dyn Model>>>,
    flushed: RwLock<BTreeMap<String, Record>>,
    registrations: AtomicUsize,
    flushes: AtomicUsize,
}

fn poisoned() -> StorageError {
    StorageError::Backend("lock poisoned".to_string())
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn track(&self, object: &dyn Model) {
        match self.objects.write() {
            Ok(mut objects) => {
                objects.insert(object.storage_key(), object.clone_model());
            }
            Err(_) => tracing::error!(
                key = %object.storage_key(),
                "storage lock poisoned; object not tracked"
            ),
        }
    }

    /// Tracked object by class name and id.
    pub fn get(&self, class_name: &str, id: &str) -> Option<Box<dyn Model>> {
        let objects = self.objects.read().ok()?;
        objects
            .get(&format!("{class_name}.{id}"))
            .map(|object| object.clone_model())
    }

    /// Number of tracked objects.
    pub fn len(&self) -> usize {
        self.objects.read().map(|objects| objects.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `new` notifications received.
    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    /// Number of completed `save` calls.
    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    /// Dictionary form of every object as of the last `save`, keyed by storage key.
    pub fn flushed_records(&self) -> BTreeMap<String, Record> {
        self.flushed
            .read()
            .map(|flushed| flushed.clone())
            .unwrap_or_default()
    }

    /// Replace the tracked objects with the last flushed state.
    ///
    /// Objects are rebuilt through `registry`; rebuilding does not count as a
    /// registration. Returns the number of objects loaded. On error the
    /// tracked set is left untouched.
    pub fn reload(&self, registry: &ClassRegistry) -> Result<usize, StorageError> {
        let flushed = self.flushed.read().map_err(|_| poisoned())?;

        let mut loaded = BTreeMap::new();
        for (key, record) in flushed.iter() {
            let object = registry.create_from_dict(record.clone())?;
            loaded.insert(key.clone(), object);
        }
        drop(flushed);

        let count = loaded.len();
        let mut objects = self.objects.write().map_err(|_| poisoned())?;
        *objects = loaded;

        tracing::debug!(count, "reloaded objects from flushed state");
        Ok(count)
    }
}

impl Storage for InMemoryStorage {
    fn new(&self, object: &dyn Model) {
        self.track(object);
        self.registrations.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(key = %object.storage_key(), "registered object");
    }

    fn update(&self, object: &dyn Model) {
        self.track(object);
    }

    fn save(&self) -> Result<(), StorageError> {
        let snapshot: BTreeMap<String, Record> = {
            let objects = self.objects.read().map_err(|_| poisoned())?;
            objects
                .iter()
                .map(|(key, object)| (key.clone(), object.to_dict()))
                .collect()
        };

        let count = snapshot.len();
        let mut flushed = self.flushed.write().map_err(|_| poisoned())?;
        *flushed = snapshot;
        self.flushes.fetch_add(1, Ordering::SeqCst);

        tracing::trace!(count, "flushed tracked objects");
        Ok(())
    }

    fn all(&self) -> Vec<Box<dyn Model>> {
        match self.objects.read() {
            Ok(objects) => objects.values().map(|object| object.clone_model()).collect(),
            Err(_) => vec![],
        }
    }
}
