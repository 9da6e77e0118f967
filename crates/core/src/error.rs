//! Model error model.

use thiserror::Error;

/// Result type used across the model layer.
pub type ModelResult<T> = Result<T, ModelError>;

/// Model-level error.
///
/// Every variant describes a problem with the data handed to a model
/// (reconstruction input, attribute assignment). Storage failures are reported
/// separately through [`crate::StorageError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A `created_at`/`updated_at` value did not match `YYYY-MM-DDTHH:MM:SS.ffffff`.
    #[error("invalid timestamp for '{field}': {reason}")]
    InvalidTimestamp { field: String, reason: String },

    /// A field required to build the typed record was absent.
    #[error("missing field '{0}'")]
    MissingField(String),

    /// A field was present but held a value of the wrong shape.
    #[error("invalid value for field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// A reconstruction dictionary had no `__class__` entry.
    #[error("missing class discriminator '__class__'")]
    MissingClass,

    /// The `__class__` entry did not name a registered class.
    #[error("unknown class '{0}'")]
    UnknownClass(String),

    /// A float field was given NaN or an infinity.
    #[error("non-finite number {0}")]
    NonFinite(String),

    /// Identity and timestamp attributes cannot be assigned directly.
    #[error("attribute '{0}' is read-only")]
    ReadOnlyAttribute(String),
}

impl ModelError {
    pub fn invalid_timestamp(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_class(name: impl Into<String>) -> Self {
        Self::UnknownClass(name.into())
    }

    pub fn read_only(attribute: impl Into<String>) -> Self {
        Self::ReadOnlyAttribute(attribute.into())
    }
}
