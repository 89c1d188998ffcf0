//! Error types for the form engine

use super::schema::FieldType;

/// A schema that cannot drive the navigator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Schema has no sections to navigate
    #[error("Form schema has no sections")]
    NoSections,

    /// Two fields share an id
    #[error("Duplicate field id in form schema: {0}")]
    DuplicateFieldId(String),
}

/// Store misuse. These indicate a defect in the caller, not bad user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Value keyed to a field the schema does not define
    #[error("Unknown field id: {0}")]
    UnknownField(String),

    /// Value shape does not fit the field's declared type
    #[error("Value for field {field_id} does not fit type {field_type:?}")]
    ValueShapeMismatch {
        field_id: String,
        field_type: FieldType,
    },
}
