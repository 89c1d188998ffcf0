//! Field value objects

use super::schema::FieldType;
use serde::{Deserialize, Serialize};

/// Answer held for one field. The variant follows the field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// text, email, tel, textarea, radio and select
    Text(String),
    /// checkbox
    Flag(bool),
    /// multi-checkbox: selected option values, insertion ordered, no duplicates
    Choices(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Empty value of the right shape for a field type
    pub fn empty_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Checkbox => FieldValue::Flag(false),
            FieldType::MultiCheckbox => FieldValue::Choices(Vec::new()),
            FieldType::Text
            | FieldType::Email
            | FieldType::Tel
            | FieldType::Textarea
            | FieldType::Radio
            | FieldType::Select => FieldValue::Text(String::new()),
        }
    }

    /// Whether this value has the shape a field type expects
    pub fn fits(&self, field_type: FieldType) -> bool {
        matches!(
            (self, FieldValue::empty_for(field_type)),
            (FieldValue::Text(_), FieldValue::Text(_))
                | (FieldValue::Flag(_), FieldValue::Flag(_))
                | (FieldValue::Choices(_), FieldValue::Choices(_))
        )
    }

    /// Empty string, unchecked box, or no choices
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Flag(b) => !b,
            FieldValue::Choices(c) => c.is_empty(),
        }
    }

    /// Get the text value (None for flags and choice sets)
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the flag value (false for other shapes)
    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }

    /// Get the selected choices (empty for other shapes)
    pub fn as_choices(&self) -> &[String] {
        match self {
            FieldValue::Choices(c) => c,
            _ => &[],
        }
    }

    /// Whether a choice set contains `option`
    pub fn has_choice(&self, option: &str) -> bool {
        self.as_choices().iter().any(|c| c == option)
    }

    /// Copy of this value with a character appended (text only)
    pub fn with_char(&self, c: char) -> Option<Self> {
        self.as_text().map(|s| {
            let mut s = s.to_string();
            s.push(c);
            FieldValue::Text(s)
        })
    }

    /// Copy of this value with the last character removed (text only)
    pub fn without_last_char(&self) -> Option<Self> {
        let s = self.as_text()?;
        if s.is_empty() {
            return None;
        }
        let mut s = s.to_string();
        s.pop();
        Some(FieldValue::Text(s))
    }

    /// Copy of a choice set with `option` checked or unchecked.
    ///
    /// Checking appends the option if absent; unchecking removes it. Other
    /// choices keep their order.
    pub fn with_choice(&self, option: &str, checked: bool) -> Self {
        let mut choices: Vec<String> = self.as_choices().to_vec();
        if checked {
            if !choices.iter().any(|c| c == option) {
                choices.push(option.to_string());
            }
        } else {
            choices.retain(|c| c != option);
        }
        FieldValue::Choices(choices)
    }
}
