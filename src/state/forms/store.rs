//! Value/error store for one form-filling session

use super::error::FormError;
use super::field::FieldValue;
use super::schema::{FieldType, FormSchema};
use std::collections::{BTreeMap, HashMap};

/// Answers keyed by field id
pub type FormValues = BTreeMap<String, FieldValue>;

/// Validation messages keyed by field id
pub type FormErrors = BTreeMap<String, String>;

/// Holds the current answers and the current validation errors.
///
/// Only field ids declared by the schema the store was built from are
/// accepted, and each value must have the shape of its field's type.
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    field_types: HashMap<String, FieldType>,
    values: FormValues,
    errors: FormErrors,
}

impl FormStore {
    /// Create an empty store for a schema
    pub fn new(schema: &FormSchema) -> Self {
        Self {
            field_types: schema
                .fields()
                .map(|f| (f.field_id.clone(), f.field_type))
                .collect(),
            values: FormValues::new(),
            errors: FormErrors::new(),
        }
    }

    /// Overwrite the value of a field and clear its error, if any.
    ///
    /// The error is cleared on every edit, whether or not the new value would
    /// pass validation.
    pub fn set_value(&mut self, field_id: &str, value: FieldValue) -> Result<(), FormError> {
        let field_type = *self
            .field_types
            .get(field_id)
            .ok_or_else(|| FormError::UnknownField(field_id.to_string()))?;
        if !value.fits(field_type) {
            return Err(FormError::ValueShapeMismatch {
                field_id: field_id.to_string(),
                field_type,
            });
        }
        self.values.insert(field_id.to_string(), value);
        self.errors.remove(field_id);
        Ok(())
    }

    /// Replace the whole error mapping
    pub fn set_errors(&mut self, errors: FormErrors) {
        debug_assert!(
            errors.keys().all(|id| self.field_types.contains_key(id)),
            "error keyed to a field outside the schema"
        );
        self.errors = errors;
    }

    /// Drop every recorded error
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Current value, or the empty value for the field's type.
    ///
    /// Unknown ids yield an empty text value.
    pub fn get_value(&self, field_id: &str) -> FieldValue {
        match self.values.get(field_id) {
            Some(value) => value.clone(),
            None => self
                .field_types
                .get(field_id)
                .map(|t| FieldValue::empty_for(*t))
                .unwrap_or_default(),
        }
    }

    /// Current error message for a field
    pub fn error(&self, field_id: &str) -> Option<&str> {
        self.errors.get(field_id).map(String::as_str)
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Every value set so far, across all sections
    pub fn values(&self) -> &FormValues {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::schema::fixtures::student_schema;

    fn store() -> FormStore {
        FormStore::new(&student_schema())
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = store();
        assert!(store.values().is_empty());
        assert!(!store.has_errors());
    }

    #[test]
    fn test_get_value_defaults_by_type() {
        let store = store();
        assert_eq!(store.get_value("name"), FieldValue::Text(String::new()));
        assert_eq!(store.get_value("agree"), FieldValue::Flag(false));
        assert_eq!(store.get_value("topics"), FieldValue::Choices(vec![]));
    }

    #[test]
    fn test_set_value_overwrites() {
        let mut store = store();
        store
            .set_value("name", FieldValue::Text("Ada".into()))
            .unwrap();
        store
            .set_value("name", FieldValue::Text("Grace".into()))
            .unwrap();
        assert_eq!(store.get_value("name"), FieldValue::Text("Grace".into()));
        assert_eq!(store.values().len(), 1);
    }

    #[test]
    fn test_set_value_clears_error_even_if_still_invalid() {
        let mut store = store();
        let mut errors = FormErrors::new();
        errors.insert("name".to_string(), "Minimum 2 characters required".to_string());
        errors.insert("email".to_string(), "This field is required".to_string());
        store.set_errors(errors);

        store.set_value("name", FieldValue::Text("A".into())).unwrap();

        assert_eq!(store.error("name"), None);
        assert_eq!(store.error("email"), Some("This field is required"));
    }

    #[test]
    fn test_set_errors_replaces_mapping() {
        let mut store = store();
        let mut first = FormErrors::new();
        first.insert("name".to_string(), "a".to_string());
        store.set_errors(first);
        let mut second = FormErrors::new();
        second.insert("email".to_string(), "b".to_string());
        store.set_errors(second);
        assert_eq!(store.error("name"), None);
        assert_eq!(store.error("email"), Some("b"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut store = store();
        let result = store.set_value("ghost", FieldValue::Text("boo".into()));
        assert_eq!(result, Err(FormError::UnknownField("ghost".to_string())));
        assert!(store.values().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let mut store = store();
        let result = store.set_value("agree", FieldValue::Text("yes".into()));
        assert!(matches!(
            result,
            Err(FormError::ValueShapeMismatch { ref field_id, .. }) if field_id == "agree"
        ));
        assert_eq!(store.get_value("agree"), FieldValue::Flag(false));
    }

    #[test]
    fn test_clear_errors() {
        let mut store = store();
        let mut errors = FormErrors::new();
        errors.insert("name".to_string(), "x".to_string());
        store.set_errors(errors);
        assert!(store.has_errors());
        store.clear_errors();
        assert!(!store.has_errors());
    }
}
