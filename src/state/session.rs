//! Login form and the signed-in user

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity of the user filling the form. Set by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub roll_number: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Please fill in all fields")]
    MissingFields,
}

/// Inputs of the login view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    RollNumber,
    Name,
    /// The Login button
    Submit,
}

impl LoginField {
    pub fn next(&self) -> Self {
        match self {
            Self::RollNumber => Self::Name,
            Self::Name => Self::Submit,
            Self::Submit => Self::RollNumber,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::RollNumber => Self::Submit,
            Self::Name => Self::RollNumber,
            Self::Submit => Self::Name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::RollNumber => "Roll Number",
            Self::Name => "Full Name",
            Self::Submit => "Login",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::RollNumber => "Enter your roll number",
            Self::Name => "Enter your full name",
            Self::Submit => "",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub roll_number: String,
    pub name: String,
    pub active: LoginField,
    /// A login call is in flight; further submits are ignored
    pub submitting: bool,
}

impl LoginForm {
    pub fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::RollNumber => &self.roll_number,
            LoginField::Name => &self.name,
            LoginField::Submit => "",
        }
    }

    pub fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub fn prev_field(&mut self) {
        self.active = self.active.prev();
    }

    pub fn input_char(&mut self, c: char) {
        match self.active {
            LoginField::RollNumber => self.roll_number.push(c),
            LoginField::Name => self.name.push(c),
            LoginField::Submit => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active {
            LoginField::RollNumber => {
                self.roll_number.pop();
            }
            LoginField::Name => {
                self.name.pop();
            }
            LoginField::Submit => {}
        }
    }

    /// Check both inputs are non-empty. Values are not trimmed, so the
    /// user is built from them exactly as typed.
    pub fn validate(&self) -> Result<SessionUser, LoginError> {
        if self.roll_number.is_empty() || self.name.is_empty() {
            return Err(LoginError::MissingFields);
        }
        Ok(SessionUser {
            roll_number: self.roll_number.clone(),
            name: self.name.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
