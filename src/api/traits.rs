//! Trait abstraction for the form service to enable mocking in tests

use super::error::ApiError;
use crate::state::{FormSchema, SessionUser};
use async_trait::async_trait;

/// Answer of the identity service to a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted { message: String },
    Rejected { message: String },
}

impl LoginOutcome {
    pub fn message(&self) -> &str {
        match self {
            Self::Accepted { message } | Self::Rejected { message } => message,
        }
    }
}

/// Remote operations the app depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormService: Send + Sync {
    /// Register or sign in a user
    async fn create_user(&self, user: &SessionUser) -> Result<LoginOutcome, ApiError>;

    /// Fetch the form assigned to a roll number.
    /// `Ok(None)` means the service has no form to give.
    async fn get_form(&self, roll_number: &str) -> Result<Option<FormSchema>, ApiError>;
}
