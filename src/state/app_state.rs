//! Application state definitions

use super::forms::SectionNavigator;
use super::session::{LoginForm, SessionUser};
use crate::submission::SubmissionReceipt;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    /// Schema fetch in flight
    Loading,
    Form,
    /// Schema could not be loaded; only a way back to login
    LoadError,
    Submitted,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Loading => "Loading",
            Self::Form => "Form",
            Self::LoadError => "Error",
            Self::Submitted => "Submitted",
        }
    }

    /// Views that require a signed-in user
    pub fn needs_session(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    pub current_view: View,

    pub login: LoginForm,
    pub session: Option<SessionUser>,

    /// Navigator for the loaded schema; None until a fetch succeeds
    pub form: Option<SectionNavigator>,
    /// User-facing message of the load error screen
    pub load_error: Option<String>,
    pub last_receipt: Option<SubmissionReceipt>,

    /// Bumped on every session start and logout; tags background results
    pub generation: u64,

    /// Modal error dialogs, oldest first
    errors: VecDeque<String>,
    /// One-shot success message for the status bar
    pub status_message: Option<String>,
}

impl AppState {
    /// Queue an error dialog
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error shown in the dialog right now
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Number of errors still waiting behind the current one
    pub fn pending_errors(&self) -> usize {
        self.errors.len().saturating_sub(1)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Start a new session for `user`. Returns the generation its
    /// background work must carry.
    pub fn start_session(&mut self, user: SessionUser) -> u64 {
        self.generation += 1;
        self.session = Some(user);
        self.form = None;
        self.load_error = None;
        self.last_receipt = None;
        self.current_view = View::Loading;
        self.generation
    }

    /// Drop the user and every piece of form state, back to login
    pub fn end_session(&mut self) {
        self.generation += 1;
        self.session = None;
        self.form = None;
        self.load_error = None;
        self.last_receipt = None;
        self.login.clear();
        self.current_view = View::Login;
    }

    /// Whether a background result tagged `generation` is still wanted
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation && self.session.is_some()
    }
}
