//! Form schema types as delivered by the form service

use super::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declared type of a field. Closed set; every consumer matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Textarea,
    Radio,
    Checkbox,
    MultiCheckbox,
    Select,
}

impl FieldType {
    /// Whether values of this type are strings subject to length bounds
    pub fn is_string_valued(&self) -> bool {
        match self {
            Self::Text | Self::Email | Self::Tel | Self::Textarea | Self::Radio | Self::Select => {
                true
            }
            Self::Checkbox | Self::MultiCheckbox => false,
        }
    }
}

/// One selectable option of a choice field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// Custom message for the required rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub message: String,
}

/// A single question in a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub field_id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub options: Vec<FieldOption>,
    #[serde(default)]
    pub validation: Option<ValidationRule>,
}

impl FieldDefinition {
    /// Label of the option whose value is `value`, if any
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    /// Index of the option whose value is `value`, if any
    pub fn option_index(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o.value == value)
    }
}

/// A navigation step: a group of fields shown together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSection {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<FieldDefinition>,
}

/// Complete description of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub form_title: String,
    pub form_id: String,
    pub version: String,
    pub sections: Vec<FormSection>,
}

impl FormSchema {
    /// Number of sections
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Iterate over every field in section order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// Look up a field by id anywhere in the schema
    pub fn field(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.fields().find(|f| f.field_id == field_id)
    }

    /// Check the structure the navigator relies on: at least one section and
    /// field ids unique across the whole schema.
    pub fn check_structure(&self) -> Result<(), SchemaError> {
        if self.sections.is_empty() {
            return Err(SchemaError::NoSections);
        }
        let mut seen = HashSet::new();
        for field in self.fields() {
            if !seen.insert(field.field_id.as_str()) {
                return Err(SchemaError::DuplicateFieldId(field.field_id.clone()));
            }
        }
        Ok(())
    }
}
