//! Entity base: identity, timestamps, dictionary conversion and persistence hooks.

use core::any::Any;

use serde_json::Value;

use crate::error::{ModelError, ModelResult};
use crate::id::ModelId;
use crate::record::{CLASS_KEY, CREATED_AT_KEY, ID_KEY, Record, UPDATED_AT_KEY};
use crate::storage::{Storage, StorageError};
use crate::timestamp::{self, Timestamp};

/// Identity and timestamps shared by every model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base {
    id: ModelId,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Base {
    /// New identity with `created_at == updated_at`, from a single clock read.
    pub fn fresh() -> Self {
        let now = timestamp::now();
        Self {
            id: ModelId::generate(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild from known values, taken verbatim.
    ///
    /// No ordering is enforced between the two timestamps.
    pub fn from_parts(id: ModelId, created_at: Timestamp, updated_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            updated_at,
        }
    }

    /// Remove `id`, `created_at` and `updated_at` from `record` and parse them.
    pub fn take_from(record: &mut Record) -> ModelResult<Self> {
        let id = match record.remove(ID_KEY) {
            Some(Value::String(id)) => ModelId::from(id),
            Some(other) => {
                return Err(ModelError::invalid_field(
                    ID_KEY,
                    format!("expected a string, got {other}"),
                ));
            }
            None => return Err(ModelError::missing_field(ID_KEY)),
        };
        let created_at = take_timestamp(record, CREATED_AT_KEY)?;
        let updated_at = take_timestamp(record, UPDATED_AT_KEY)?;

        Ok(Self::from_parts(id, created_at, updated_at))
    }

    pub fn id(&self) -> &ModelId {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Move `updated_at` to the current time. Never moves it backwards.
    pub fn touch(&mut self) {
        self.updated_at = self.updated_at.max(timestamp::now());
    }

    /// Write `id` and both timestamps (as text) into `record`.
    pub fn write_into(&self, record: &mut Record) {
        record.insert(ID_KEY.to_string(), Value::String(self.id.to_string()));
        record.insert(
            CREATED_AT_KEY.to_string(),
            Value::String(timestamp::format(&self.created_at)),
        );
        record.insert(
            UPDATED_AT_KEY.to_string(),
            Value::String(timestamp::format(&self.updated_at)),
        );
    }
}

fn take_timestamp(record: &mut Record, field: &str) -> ModelResult<Timestamp> {
    let value = record
        .remove(field)
        .ok_or_else(|| ModelError::missing_field(field))?;
    timestamp::parse_value(field, &value)
}

/// A live model instance.
///
/// Object-safe so storage collaborators can hold heterogeneous collections.
/// Concrete types normally come from `declare_model!`.
pub trait Model: Send + Sync + core::fmt::Debug + core::fmt::Display {
    /// Discriminator written to `__class__`.
    fn class_name(&self) -> &'static str;

    fn base(&self) -> &Base;

    fn base_mut(&mut self) -> &mut Base;

    /// Declared and extra fields (no identity, timestamps or discriminator).
    fn fields(&self) -> Record;

    /// Assign a declared field or an extra attribute by name.
    ///
    /// Identity, timestamps and the discriminator are read-only.
    fn set_attribute(&mut self, key: &str, value: Value) -> ModelResult<()>;

    fn as_model(&self) -> &dyn Model;

    fn clone_model(&self) -> Box<dyn Model>;

    fn as_any(&self) -> &dyn Any;

    fn id(&self) -> &ModelId {
        self.base().id()
    }

    fn created_at(&self) -> Timestamp {
        self.base().created_at()
    }

    fn updated_at(&self) -> Timestamp {
        self.base().updated_at()
    }

    /// Key under which storage tracks this object: `<ClassName>.<id>`.
    fn storage_key(&self) -> String {
        format!("{}.{}", self.class_name(), self.id())
    }

    /// Dictionary form: every attribute, timestamps as text, plus `__class__`.
    fn to_dict(&self) -> Record {
        let mut record = self.fields();
        self.base().write_into(&mut record);
        record.insert(
            CLASS_KEY.to_string(),
            Value::String(self.class_name().to_string()),
        );
        record
    }

    /// `[<ClassName>] (<id>) {<attributes>}`, for diagnostics only.
    fn describe(&self) -> String {
        let base = self.base();
        let mut entries = vec![
            format!("\"{ID_KEY}\": \"{}\"", base.id()),
            format!("\"{CREATED_AT_KEY}\": {:?}", base.created_at()),
            format!("\"{UPDATED_AT_KEY}\": {:?}", base.updated_at()),
        ];
        entries.extend(
            self.fields()
                .iter()
                .map(|(key, value)| format!("{}: {value}", Value::String(key.clone()))),
        );

        format!(
            "[{}] ({}) {{{}}}",
            self.class_name(),
            base.id(),
            entries.join(", ")
        )
    }

    /// Refresh `updated_at`, hand the new snapshot to storage and ask it to flush.
    fn save(&mut self, storage: &dyn Storage) -> Result<(), StorageError> {
        self.base_mut().touch();
        tracing::debug!(
            key = %self.storage_key(),
            updated_at = %timestamp::format(&self.updated_at()),
            "saving model"
        );
        storage.update(self.as_model());
        storage.save()
    }
}

/// Construction entry points of a concrete model type.
pub trait ModelClass: Model + Clone + Sized + 'static {
    /// Discriminator for this type.
    const CLASS_NAME: &'static str;

    /// Instance with the given base and every declared field at its default.
    fn with_base(base: Base) -> Self;

    /// Instance with the given base, declared fields taken from `fields` and
    /// any remaining entries kept as extra attributes.
    fn from_base(base: Base, fields: Record) -> ModelResult<Self>;

    /// Fresh construction: generated id, current timestamps, one `storage.new`.
    fn create(storage: &dyn Storage) -> Self {
        let object = Self::with_base(Base::fresh());
        tracing::debug!(key = %object.storage_key(), "created model");
        storage.new(&object);
        object
    }

    /// Reconstruction from a dictionary. `__class__` is ignored; storage is not notified.
    fn from_dict(mut record: Record) -> ModelResult<Self> {
        record.remove(CLASS_KEY);
        let base = Base::take_from(&mut record)?;
        let object = Self::from_base(base, record)?;
        tracing::debug!(key = %object.storage_key(), "reconstructed model");
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with(id: Value, created_at: Value, updated_at: Value) -> Record {
        let mut record = Record::new();
        record.insert(ID_KEY.to_string(), id);
        record.insert(CREATED_AT_KEY.to_string(), created_at);
        record.insert(UPDATED_AT_KEY.to_string(), updated_at);
        record
    }

    #[test]
    fn fresh_base_has_equal_timestamps() {
        let base = Base::fresh();
        assert_eq!(base.created_at(), base.updated_at());
        assert_eq!(base.id().as_str().len(), 36);
    }

    #[test]
    fn touch_never_moves_updated_at_backwards() {
        let mut base = Base::fresh();
        let created = base.created_at();
        let before = base.updated_at();

        base.touch();

        assert!(base.updated_at() >= before);
        assert_eq!(base.created_at(), created);
    }

    #[test]
    fn touch_keeps_a_future_updated_at() {
        let future = timestamp::parse("updated_at", "9999-01-01T00:00:00.000000").unwrap();
        let mut base = Base::from_parts(ModelId::from("x"), future, future);

        base.touch();

        assert_eq!(base.updated_at(), future);
    }

    #[test]
    fn take_from_consumes_base_keys_only() {
        let mut record = record_with(
            json!("abc"),
            json!("2017-09-28T21:05:54.119427"),
            json!("2017-09-28T21:05:54.119428"),
        );
        record.insert("name".to_string(), json!("Paris"));

        let base = Base::take_from(&mut record).unwrap();

        assert_eq!(base.id().as_str(), "abc");
        assert_eq!(timestamp::format(&base.created_at()), "2017-09-28T21:05:54.119427");
        assert_eq!(timestamp::format(&base.updated_at()), "2017-09-28T21:05:54.119428");
        assert_eq!(record.len(), 1);
        assert!(record.contains_key("name"));
    }

    #[test]
    fn take_from_accepts_out_of_order_timestamps() {
        let mut record = record_with(
            json!("abc"),
            json!("2020-01-01T00:00:00.000000"),
            json!("2010-01-01T00:00:00.000000"),
        );

        let base = Base::take_from(&mut record).unwrap();
        assert!(base.updated_at() < base.created_at());
    }

    #[test]
    fn take_from_reports_missing_fields() {
        let mut record = record_with(json!("abc"), json!("2017-09-28T21:05:54.119427"), json!(""));
        record.remove(UPDATED_AT_KEY);
        assert_eq!(
            Base::take_from(&mut record).unwrap_err(),
            ModelError::missing_field(UPDATED_AT_KEY)
        );

        let mut record = Record::new();
        assert_eq!(
            Base::take_from(&mut record).unwrap_err(),
            ModelError::missing_field(ID_KEY)
        );
    }

    #[test]
    fn take_from_rejects_malformed_timestamp() {
        let mut record = record_with(
            json!("abc"),
            json!("2017-09-28 21:05:54"),
            json!("2017-09-28T21:05:54.119427"),
        );

        let err = Base::take_from(&mut record).unwrap_err();
        match err {
            ModelError::InvalidTimestamp { field, .. } => assert_eq!(field, CREATED_AT_KEY),
            other => panic!("Expected InvalidTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn take_from_rejects_non_string_id() {
        let mut record = record_with(
            json!(42),
            json!("2017-09-28T21:05:54.119427"),
            json!("2017-09-28T21:05:54.119427"),
        );

        assert!(matches!(
            Base::take_from(&mut record).unwrap_err(),
            ModelError::InvalidField { .. }
        ));
    }
}
