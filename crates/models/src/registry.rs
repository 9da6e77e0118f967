//! Class registry: resolves a `__class__` discriminator to a constructor.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use hbnb_core::{CLASS_KEY, Model, ModelClass, ModelError, ModelResult, Record, Value};

use crate::{Amenity, BaseModel, City, Place, Review, State, User};

/// Reconstructs a boxed model from a dictionary (discriminator already removed).
pub type Constructor = fn(Record) -> ModelResult<Box<dyn Model>>;

fn construct<T: ModelClass>(record: Record) -> ModelResult<Box<dyn Model>> {
    Ok(Box::new(T::from_dict(record)?))
}

/// Mapping from discriminator to constructor.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    constructors: BTreeMap<&'static str, Constructor>,
}

impl ClassRegistry {
    /// Registry with no classes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding every model class of this crate.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register::<BaseModel>();
        registry.register::<User>();
        registry.register::<State>();
        registry.register::<City>();
        registry.register::<Amenity>();
        registry.register::<Place>();
        registry.register::<Review>();
        registry
    }

    /// Register `T` under its class name, replacing any previous entry.
    pub fn register<T: ModelClass>(&mut self) -> &mut Self {
        self.constructors.insert(T::CLASS_NAME, construct::<T>);
        self
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.constructors.contains_key(class_name)
    }

    /// Registered class names, sorted.
    pub fn class_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    /// Reconstruct the model described by `data`.
    ///
    /// The `__class__` entry selects the concrete type and is removed before
    /// the remaining entries are handed to that type's reconstruction path.
    pub fn create_from_dict(&self, mut data: Record) -> ModelResult<Box<dyn Model>> {
        let class_name = match data.remove(CLASS_KEY) {
            Some(Value::String(name)) => name,
            Some(other) => {
                tracing::warn!(discriminator = %other, "non-string class discriminator");
                return Err(ModelError::unknown_class(other.to_string()));
            }
            None => {
                tracing::warn!("record without class discriminator");
                return Err(ModelError::MissingClass);
            }
        };

        let constructor = self.constructors.get(class_name.as_str()).ok_or_else(|| {
            tracing::warn!(class = %class_name, "unknown class discriminator");
            ModelError::unknown_class(class_name.as_str())
        })?;

        tracing::debug!(class = %class_name, "dispatching reconstruction");
        constructor(data)
    }
}

/// Process-wide registry of the built-in classes, built on first use.
pub fn registry() -> &'static ClassRegistry {
    static REGISTRY: OnceLock<ClassRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ClassRegistry::with_defaults)
}

/// [`ClassRegistry::create_from_dict`] against the process-wide registry.
pub fn create_from_dict(data: Record) -> ModelResult<Box<dyn Model>> {
    registry().create_from_dict(data)
}
