//! Mapping from field types to interactive controls and their input rules

use super::field::FieldValue;
use super::schema::{FieldDefinition, FieldType};

/// Interactive control used to edit a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Single-line text input
    SingleLine,
    /// Multi-line text input
    MultiLine,
    /// Mutually exclusive options, all visible
    RadioGroup,
    /// One boolean toggle that carries its own label
    Toggle,
    /// Single choice shown as one closed line
    Dropdown,
    /// Independent toggle per option
    CheckboxGroup,
}

impl From<FieldType> for ControlKind {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text | FieldType::Email | FieldType::Tel => ControlKind::SingleLine,
            FieldType::Textarea => ControlKind::MultiLine,
            FieldType::Radio => ControlKind::RadioGroup,
            FieldType::Checkbox => ControlKind::Toggle,
            FieldType::Select => ControlKind::Dropdown,
            FieldType::MultiCheckbox => ControlKind::CheckboxGroup,
        }
    }
}

impl ControlKind {
    /// Whether the field label is drawn above the control
    pub fn shows_label(&self) -> bool {
        !matches!(self, ControlKind::Toggle)
    }

    /// Whether typed characters edit the value
    pub fn accepts_text(&self) -> bool {
        matches!(self, ControlKind::SingleLine | ControlKind::MultiLine)
    }
}

/// Input directed at the focused control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlInput {
    Char(char),
    Backspace,
    Newline,
    /// Space or Enter on a choice control
    Activate,
    /// Up/Left
    Previous,
    /// Down/Right
    Next,
}

/// Apply an input to a field.
///
/// `cursor` is the option cursor for radio groups and checkbox groups and is
/// moved in place. Returns the new value when the input changes it.
pub fn apply_input(
    field: &FieldDefinition,
    current: &FieldValue,
    cursor: &mut usize,
    input: ControlInput,
) -> Option<FieldValue> {
    let option_count = field.options.len();
    match (ControlKind::from(field.field_type), input) {
        (ControlKind::SingleLine | ControlKind::MultiLine, ControlInput::Char(c)) => {
            current.with_char(c)
        }
        (ControlKind::SingleLine | ControlKind::MultiLine, ControlInput::Backspace) => {
            current.without_last_char()
        }
        (ControlKind::MultiLine, ControlInput::Newline) => current.with_char('\n'),

        (ControlKind::RadioGroup | ControlKind::CheckboxGroup, ControlInput::Previous) => {
            *cursor = cursor.saturating_sub(1);
            None
        }
        (ControlKind::RadioGroup | ControlKind::CheckboxGroup, ControlInput::Next) => {
            if *cursor + 1 < option_count {
                *cursor += 1;
            }
            None
        }
        (ControlKind::RadioGroup, ControlInput::Activate) => {
            let option = field.options.get(*cursor)?;
            if current.as_text() == Some(option.value.as_str()) {
                return None;
            }
            Some(FieldValue::Text(option.value.clone()))
        }
        (ControlKind::CheckboxGroup, ControlInput::Activate) => {
            let option = field.options.get(*cursor)?;
            let checked = current.has_choice(&option.value);
            Some(current.with_choice(&option.value, !checked))
        }

        (ControlKind::Toggle, ControlInput::Activate) => Some(FieldValue::Flag(!current.as_flag())),

        (ControlKind::Dropdown, ControlInput::Next | ControlInput::Activate) => {
            cycle_dropdown(field, current, true)
        }
        (ControlKind::Dropdown, ControlInput::Previous) => cycle_dropdown(field, current, false),

        _ => None,
    }
}

/// Step a dropdown selection forward or backward, wrapping at the ends.
/// An empty selection steps to the first (or last) option.
fn cycle_dropdown(
    field: &FieldDefinition,
    current: &FieldValue,
    forward: bool,
) -> Option<FieldValue> {
    let count = field.options.len();
    if count == 0 {
        return None;
    }
    let selected = current.as_text().and_then(|v| field.option_index(v));
    let next = match (selected, forward) {
        (None, true) => 0,
        (None, false) => count - 1,
        (Some(i), true) => (i + 1) % count,
        (Some(i), false) => (i + count - 1) % count,
    };
    Some(FieldValue::Text(field.options[next].value.clone()))
}

/// Place the option cursor on the current selection when a field gains focus
pub fn initial_cursor(field: &FieldDefinition, current: &FieldValue) -> usize {
    match ControlKind::from(field.field_type) {
        ControlKind::RadioGroup => current
            .as_text()
            .and_then(|v| field.option_index(v))
            .unwrap_or(0),
        _ => 0,
    }
}
