//! Section navigation state machine
//!
//! One state per section index plus a terminal submitted state. Next and
//! Submit validate the current section first and refuse to move while it has
//! errors; Previous always moves back. Values survive every transition.

use super::control::{apply_input, initial_cursor, ControlInput};
use super::error::{FormError, SchemaError};
use super::field::FieldValue;
use super::schema::{FieldDefinition, FormSchema, FormSection};
use super::store::{FormErrors, FormStore, FormValues};
use super::validation::validate_section;

/// Where the navigator currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    Section(usize),
    Submitted,
}

/// Result of a Next or Previous request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    /// Current section failed validation; carries its errors
    Blocked(FormErrors),
    /// Not offered in the current state
    Unavailable,
}

/// Result of a Submit request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<R> {
    /// The sink accepted the record and returned this receipt
    Delivered(R),
    Blocked(FormErrors),
    Unavailable,
}

/// Buttons on the actions row of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionAction {
    Previous,
    Next,
    Submit,
}

impl SectionAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Previous => "Previous",
            Self::Next => "Next",
            Self::Submit => "Submit",
        }
    }
}

/// Drives one user through the sections of one schema
#[derive(Debug, Clone)]
pub struct SectionNavigator {
    schema: FormSchema,
    roll_number: String,
    store: FormStore,
    index: usize,
    submitted: bool,
    /// Focused slot: 0..fields.len() are fields, fields.len() is the actions row
    active_field: usize,
    option_cursor: usize,
    selected_action: usize,
    scroll_offset: u16,
    /// Number of transitions taken; each one resets the scroll position
    transitions: usize,
}

impl SectionNavigator {
    /// Start at the first section with an empty store
    pub fn new(schema: FormSchema, roll_number: &str) -> Result<Self, SchemaError> {
        schema.check_structure()?;
        let store = FormStore::new(&schema);
        let mut navigator = Self {
            schema,
            roll_number: roll_number.to_string(),
            store,
            index: 0,
            submitted: false,
            active_field: 0,
            option_cursor: 0,
            selected_action: 0,
            scroll_offset: 0,
            transitions: 0,
        };
        navigator.focus_field(0);
        Ok(navigator)
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Roll number of the session this form was fetched for
    pub fn roll_number(&self) -> &str {
        &self.roll_number
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn state(&self) -> NavigationState {
        if self.submitted {
            NavigationState::Submitted
        } else {
            NavigationState::Section(self.index)
        }
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn section_count(&self) -> usize {
        self.schema.section_count()
    }

    pub fn current_section(&self) -> &FormSection {
        &self.schema.sections[self.index]
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.section_count()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Fraction of sections reached, in (0, 1]
    pub fn progress(&self) -> f64 {
        (self.index + 1) as f64 / self.section_count() as f64
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    pub fn transitions(&self) -> usize {
        self.transitions
    }

    /// Advance one section if the current one validates
    pub fn next(&mut self) -> Transition {
        if self.submitted || self.is_last() {
            return Transition::Unavailable;
        }
        if let Some(errors) = self.validate_current() {
            return Transition::Blocked(errors);
        }
        let from = self.index;
        self.enter_section(from + 1);
        Transition::Moved { from, to: from + 1 }
    }

    /// Go back one section without validating
    pub fn previous(&mut self) -> Transition {
        if self.submitted || self.is_first() {
            return Transition::Unavailable;
        }
        self.store.clear_errors();
        let from = self.index;
        self.enter_section(from - 1);
        Transition::Moved { from, to: from - 1 }
    }

    /// Validate the last section and hand every collected value to `deliver`.
    ///
    /// The navigator only becomes submitted once `deliver` succeeds; a
    /// delivery error leaves it on the last section and is returned as is.
    pub fn submit<R, E, F>(&mut self, deliver: F) -> Result<SubmitOutcome<R>, E>
    where
        F: FnOnce(&FormValues) -> Result<R, E>,
    {
        if self.submitted || !self.is_last() {
            return Ok(SubmitOutcome::Unavailable);
        }
        if let Some(errors) = self.validate_current() {
            return Ok(SubmitOutcome::Blocked(errors));
        }
        let receipt = deliver(self.store.values())?;
        self.submitted = true;
        self.reset_scroll();
        Ok(SubmitOutcome::Delivered(receipt))
    }

    /// Run validation for the current section, storing the result.
    /// Returns the errors when there are any.
    fn validate_current(&mut self) -> Option<FormErrors> {
        let errors = validate_section(self.current_section(), &self.store);
        if errors.is_empty() {
            self.store.clear_errors();
            None
        } else {
            self.store.set_errors(errors.clone());
            Some(errors)
        }
    }

    fn enter_section(&mut self, index: usize) {
        self.index = index;
        self.selected_action = 0;
        self.focus_field(0);
        self.reset_scroll();
    }

    fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
        self.transitions += 1;
    }

    // Focus handling within a section

    /// Number of focus slots: every field plus the actions row
    pub fn focus_slots(&self) -> usize {
        self.current_section().fields.len() + 1
    }

    pub fn active_slot(&self) -> usize {
        self.active_field
    }

    /// Focused field, or None when the actions row is focused
    pub fn active_field(&self) -> Option<&FieldDefinition> {
        self.current_section().fields.get(self.active_field)
    }

    pub fn is_actions_row_active(&self) -> bool {
        self.active_field + 1 == self.focus_slots()
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    /// Move focus to the next slot (wraps around)
    pub fn next_focus(&mut self) {
        let next = (self.active_field + 1) % self.focus_slots();
        self.focus_field(next);
    }

    /// Move focus to the previous slot (wraps around)
    pub fn prev_focus(&mut self) {
        let slots = self.focus_slots();
        let prev = if self.active_field == 0 {
            slots - 1
        } else {
            self.active_field - 1
        };
        self.focus_field(prev);
    }

    fn focus_field(&mut self, slot: usize) {
        self.active_field = slot.min(self.focus_slots() - 1);
        self.option_cursor = match self.active_field() {
            Some(field) => initial_cursor(field, &self.store.get_value(&field.field_id)),
            None => 0,
        };
    }

    /// Buttons offered on the actions row
    pub fn available_actions(&self) -> Vec<SectionAction> {
        let mut actions = Vec::with_capacity(2);
        if !self.is_first() {
            actions.push(SectionAction::Previous);
        }
        if self.is_last() {
            actions.push(SectionAction::Submit);
        } else {
            actions.push(SectionAction::Next);
        }
        actions
    }

    pub fn selected_action(&self) -> Option<SectionAction> {
        self.available_actions().get(self.selected_action).copied()
    }

    /// Move the button selection (wraps around)
    pub fn next_action(&mut self) {
        let count = self.available_actions().len();
        self.selected_action = (self.selected_action + 1) % count;
    }

    pub fn prev_action(&mut self) {
        let count = self.available_actions().len();
        self.selected_action = (self.selected_action + count - 1) % count;
    }

    // Editing

    /// Send an input to the focused control. Returns whether a value changed.
    pub fn input(&mut self, input: ControlInput) -> Result<bool, FormError> {
        if self.submitted {
            return Ok(false);
        }
        let Some(field) = self.current_section().fields.get(self.active_field) else {
            return Ok(false);
        };
        let field_id = field.field_id.clone();
        let current = self.store.get_value(&field_id);
        let mut cursor = self.option_cursor;
        let changed = apply_input(field, &current, &mut cursor, input);
        self.option_cursor = cursor;
        match changed {
            Some(value) => {
                self.store.set_value(&field_id, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Write a value directly through the store
    pub fn set_value(&mut self, field_id: &str, value: FieldValue) -> Result<(), FormError> {
        self.store.set_value(field_id, value)
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down_page(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(10);
    }

    pub fn scroll_up_page(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(10);
    }
}
