use std::sync::atomic::{AtomicUsize, Ordering};

use hbnb_core::{Model, Record, Storage, StorageError, Value};

/// Storage double that counts registrations.
#[derive(Debug, Default)]
pub struct CountingStorage {
    registrations: AtomicUsize,
}

impl CountingStorage {
    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }
}

impl Storage for CountingStorage {
    fn new(&self, _object: &dyn Model) {
        self.registrations.fetch_add(1, Ordering::SeqCst);
    }

    fn update(&self, _object: &dyn Model) {}

    fn save(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn all(&self) -> Vec<Box<dyn Model>> {
        vec![]
    }
}

/// Unwrap a `json!({...})` literal into a record.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
