//! Field validation rules
//!
//! Rules run in a fixed order and the first failure wins:
//! required, then (for non-empty values) length bounds, then type format.

use super::field::FieldValue;
use super::schema::{FieldDefinition, FieldType, FormSection};
use super::store::{FormErrors, FormStore};
use once_cell::sync::Lazy;
use regex::Regex;

/// Message used when a required field has no custom message
pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const TEL_MESSAGE: &str = "Please enter a valid 10-digit phone number";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// ASCII digits only; `\d` would also accept other scripts' digits
static TEL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Validate one value against its field definition
pub fn validate(field: &FieldDefinition, value: &FieldValue) -> Option<String> {
    if value.is_empty() {
        if field.required {
            let message = field
                .validation
                .as_ref()
                .map(|v| v.message.clone())
                .unwrap_or_else(|| REQUIRED_MESSAGE.to_string());
            return Some(message);
        }
        return None;
    }

    let text = match value.as_text() {
        Some(text) if field.field_type.is_string_valued() => text,
        _ => return None,
    };

    let length = text.chars().count();
    if let Some(min) = field.min_length {
        if length < min {
            return Some(format!("Minimum {min} characters required"));
        }
    }
    if let Some(max) = field.max_length {
        if length > max {
            return Some(format!("Maximum {max} characters allowed"));
        }
    }

    match field.field_type {
        FieldType::Email if !EMAIL_PATTERN.is_match(text) => Some(EMAIL_MESSAGE.to_string()),
        FieldType::Tel if !TEL_PATTERN.is_match(text) => Some(TEL_MESSAGE.to_string()),
        _ => None,
    }
}

/// Validate every field of a section, collecting all failures
pub fn validate_section(section: &FormSection, store: &FormStore) -> FormErrors {
    section
        .fields
        .iter()
        .filter_map(|field| {
            let value = store.get_value(&field.field_id);
            validate(field, &value).map(|message| (field.field_id.clone(), message))
        })
        .collect()
}
