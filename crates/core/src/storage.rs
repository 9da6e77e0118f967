//! Storage collaborator contract.
//!
//! The model layer only ever talks to storage through this trait: fresh objects
//! are announced with `new`, saved objects hand over their refreshed snapshot
//! with `update`, and `save` asks for the whole tracked collection to be
//! flushed. What "flushed" means is owned by the implementation.

use std::sync::Arc;

use thiserror::Error;

use crate::entity::Model;
use crate::error::ModelError;

/// Storage operation error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend failure (lock poisoned, medium unavailable, ...).
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A flushed record could not be turned back into a model.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Tracks live model objects and persists them on request.
pub trait Storage: Send + Sync {
    /// Register a freshly constructed object.
    fn new(&self, object: &dyn Model);

    /// Replace the tracked snapshot of an object (inserting it if untracked).
    fn update(&self, object: &dyn Model);

    /// Persist every tracked object.
    fn save(&self) -> Result<(), StorageError>;

    /// Snapshot of every tracked object.
    fn all(&self) -> Vec<Box<dyn Model>>;
}

impl<S> Storage for Arc<S>
where
    S: Storage + ?Sized,
{
    fn new(&self, object: &dyn Model) {
        (**self).new(object)
    }

    fn update(&self, object: &dyn Model) {
        (**self).update(object)
    }

    fn save(&self) -> Result<(), StorageError> {
        (**self).save()
    }

    fn all(&self) -> Vec<Box<dyn Model>> {
        (**self).all()
    }
}
