//! `hbnb-core` — object model foundation.
//!
//! Identity, timestamps and dictionary conversion shared by every model, plus
//! the contract of the storage collaborator the models report to.

mod macros;

pub mod entity;
pub mod error;
pub mod id;
pub mod number;
pub mod record;
pub mod storage;
pub mod timestamp;

pub use entity::{Base, Model, ModelClass};
pub use error::{ModelError, ModelResult};
pub use id::ModelId;
pub use number::Finite;
pub use record::{CLASS_KEY, Record};
pub use serde_json::Value;
pub use storage::{Storage, StorageError};
pub use timestamp::Timestamp;
