//! Tracing/logging setup shared by binaries and tests.
//!
//! The model crates only emit `tracing` events; installing a subscriber is
//! left to whoever owns the process:
//!
//! ```no_run
//! use hbnb_core::Model;
//! use hbnb_models::City;
//! use hbnb_storage::InMemoryStorage;
//!
//! hbnb_observability::init();
//!
//! let storage = InMemoryStorage::new();
//! let mut city = City::new(&storage);
//! city.name = "San Francisco".to_string();
//! city.save(&storage)?;
//! # Ok::<(), hbnb_core::StorageError>(())
//! ```

/// Initialize process-wide tracing from the environment.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, TracingConfig, init_with};
