//! Dictionary form of a model.
//!
//! A [`Record`] is the plain mapping produced by `to_dict` and consumed by
//! reconstruction. Helpers here convert between typed fields and record
//! values; they are used by the code `declare_model!` generates.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ModelError, ModelResult};

/// Plain key/value mapping (JSON object).
pub type Record = serde_json::Map<String, Value>;

/// Discriminator entry naming the concrete class.
pub const CLASS_KEY: &str = "__class__";
pub const ID_KEY: &str = "id";
pub const CREATED_AT_KEY: &str = "created_at";
pub const UPDATED_AT_KEY: &str = "updated_at";

/// Keys owned by the entity base; they never land in a model's extra fields.
pub const RESERVED_KEYS: [&str; 4] = [CLASS_KEY, ID_KEY, CREATED_AT_KEY, UPDATED_AT_KEY];

pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Remove `name` from `record` and decode it, falling back to the type's default.
pub fn take_field<T>(record: &mut Record, name: &str) -> ModelResult<T>
where
    T: DeserializeOwned + Default,
{
    match record.remove(name) {
        Some(value) => decode_field(name, value),
        None => Ok(T::default()),
    }
}

/// Decode a single field value into its declared type.
pub fn decode_field<T>(name: &str, value: Value) -> ModelResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(value).map_err(|e| ModelError::invalid_field(name, e.to_string()))
}

/// Encode a declared field into `record`.
pub fn put_field<T>(record: &mut Record, name: &str, value: &T)
where
    T: Serialize,
{
    // Maps with non-string keys are the only encoding failure; declared field
    // types never contain them. Raw `f64` would encode NaN as `null`, so float
    // fields are declared as `Finite`.
    let value = serde_json::to_value(value).unwrap_or(Value::Null);
    record.insert(name.to_string(), value);
}

/// Store an undeclared attribute.
pub fn set_extra(extra: &mut Record, key: &str, value: Value) -> ModelResult<()> {
    if is_reserved(key) {
        return Err(ModelError::read_only(key));
    }
    extra.insert(key.to_string(), value);
    Ok(())
}
