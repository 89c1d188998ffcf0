//! Application state and core logic

use crate::api::{ApiClient, ApiError, FormService, LoginOutcome};
use crate::config::AppConfig;
use crate::platform::is_shortcut;
use crate::state::{
    AppState, ControlInput, ControlKind, FormSchema, SectionAction, SectionNavigator, SessionUser,
    SubmitOutcome, Transition, View,
};
use crate::submission::{JsonFileSink, Submission, SubmissionSink};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

pub const LOGIN_FAULT_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const LOAD_ERROR_MESSAGE: &str = "Could not fetch the form. Please try again.";
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Form submitted successfully!";
pub const SUBMIT_BLOCKED_MESSAGE: &str = "Please fix the errors before submitting";
pub const NEXT_BLOCKED_MESSAGE: &str = "Please fix the errors before continuing";

/// Results of spawned network calls, delivered back to the UI loop
#[derive(Debug)]
pub enum BackgroundEvent {
    LoginFinished {
        user: SessionUser,
        result: Result<LoginOutcome, ApiError>,
    },
    FormLoaded {
        generation: u64,
        result: Result<Option<FormSchema>, ApiError>,
    },
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Form service shared with spawned tasks
    api: Arc<dyn FormService>,
    /// Destination for completed forms
    sink: Box<dyn SubmissionSink>,
    /// Whether the app should quit
    quit: bool,
    events_tx: UnboundedSender<BackgroundEvent>,
    events_rx: UnboundedReceiver<BackgroundEvent>,
}

impl App {
    /// Create a new App talking to the configured service
    pub fn new(config: &AppConfig) -> Result<Self> {
        let base_url = config.api_base_url();
        let api = ApiClient::new(&base_url, config.request_timeout())?;
        let sink = JsonFileSink::new(config.submissions_dir());
        tracing::info!(
            "Using form service at {}, submissions in {}",
            base_url,
            sink.dir().display()
        );
        Ok(Self::with_services(Arc::new(api), Box::new(sink)))
    }

    pub fn with_services(api: Arc<dyn FormService>, sink: Box<dyn SubmissionSink>) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            state: AppState::default(),
            api,
            sink,
            quit: false,
            events_tx,
            events_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message);
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match self.state.current_view {
            View::Login => self.handle_login_key(key),
            View::Loading => self.handle_loading_key(key),
            View::Form => self.handle_form_key(key),
            View::LoadError => self.handle_load_error_key(key),
            View::Submitted => self.handle_submitted_key(key),
        }

        Ok(())
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.state.login.next_field(),
            KeyCode::BackTab => self.state.login.prev_field(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => self.state.login.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.login.input_char(c)
            }
            _ => {}
        }
    }

    fn handle_loading_key(&mut self, key: KeyEvent) {
        if is_shortcut(&key, 'l') {
            self.logout();
        }
    }

    fn handle_load_error_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter || is_shortcut(&key, 'l') {
            self.logout();
        }
    }

    fn handle_submitted_key(&mut self, key: KeyEvent) {
        if is_shortcut(&key, 'l') {
            self.logout();
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if is_shortcut(&key, 'l') {
            self.logout();
            return;
        }
        if is_shortcut(&key, 'n') {
            self.next_section();
            return;
        }
        if is_shortcut(&key, 'p') {
            self.previous_section();
            return;
        }
        if is_shortcut(&key, 's') {
            self.submit_form();
            return;
        }

        let Some(nav) = self.state.form.as_mut() else {
            return;
        };
        if nav.is_submitted() {
            return;
        }

        match key.code {
            KeyCode::Tab => {
                nav.next_focus();
                return;
            }
            KeyCode::BackTab => {
                nav.prev_focus();
                return;
            }
            KeyCode::PageDown => {
                nav.scroll_down_page();
                return;
            }
            KeyCode::PageUp => {
                nav.scroll_up_page();
                return;
            }
            _ => {}
        }

        if nav.is_actions_row_active() {
            match key.code {
                KeyCode::Left => nav.prev_action(),
                KeyCode::Right => nav.next_action(),
                KeyCode::Up => nav.scroll_up(),
                KeyCode::Down => nav.scroll_down(),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Some(action) = nav.selected_action() {
                        self.run_action(action);
                    }
                }
                _ => {}
            }
            return;
        }

        let Some(kind) = nav.active_field().map(|f| ControlKind::from(f.field_type)) else {
            return;
        };
        let input = match (key.code, kind) {
            (KeyCode::Char(_), _) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
            (KeyCode::Char(c), kind) if kind.accepts_text() => Some(ControlInput::Char(c)),
            (KeyCode::Char(' '), _) => Some(ControlInput::Activate),
            (KeyCode::Backspace, _) => Some(ControlInput::Backspace),
            (KeyCode::Enter, ControlKind::MultiLine) => Some(ControlInput::Newline),
            (KeyCode::Enter, ControlKind::SingleLine) => {
                nav.next_focus();
                None
            }
            (KeyCode::Enter, _) => Some(ControlInput::Activate),
            (KeyCode::Up, _) => Some(ControlInput::Previous),
            (KeyCode::Down, _) => Some(ControlInput::Next),
            (KeyCode::Left, ControlKind::Dropdown) => Some(ControlInput::Previous),
            (KeyCode::Right, ControlKind::Dropdown) => Some(ControlInput::Next),
            _ => None,
        };
        if let Some(input) = input {
            self.form_input(input);
        }
    }

    fn run_action(&mut self, action: SectionAction) {
        match action {
            SectionAction::Previous => self.previous_section(),
            SectionAction::Next => self.next_section(),
            SectionAction::Submit => self.submit_form(),
        }
    }

    fn form_input(&mut self, input: ControlInput) {
        let Some(nav) = self.state.form.as_mut() else {
            return;
        };
        if let Err(e) = nav.input(input) {
            tracing::error!("Rejected form edit: {}", e);
            self.push_error(e.to_string());
        }
    }

    // Login and session lifecycle

    /// Check the login inputs and start the login call
    pub fn submit_login(&mut self) {
        if self.state.login.submitting {
            return;
        }
        let user = match self.state.login.validate() {
            Ok(user) => user,
            Err(e) => {
                self.push_error(e.to_string());
                return;
            }
        };

        tracing::info!("Logging in {}", user.roll_number);
        self.state.login.submitting = true;
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.create_user(&user).await;
            let _ = tx.send(BackgroundEvent::LoginFinished { user, result });
        });
    }

    /// Start a session and fetch its form
    fn begin_session(&mut self, user: SessionUser) {
        let roll_number = user.roll_number.clone();
        let generation = self.state.start_session(user);
        tracing::info!("Starting session {} for {}", generation, roll_number);

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.get_form(&roll_number).await;
            let _ = tx.send(BackgroundEvent::FormLoaded { generation, result });
        });
    }

    /// Drop the session and all form state
    pub fn logout(&mut self) {
        if let Some(user) = &self.state.session {
            tracing::info!("Logging out {}", user.roll_number);
        }
        self.state.end_session();
    }

    /// Apply every background result that has arrived
    pub fn drain_background(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_background(event);
        }
    }

    fn handle_background(&mut self, event: BackgroundEvent) {
        match event {
            BackgroundEvent::LoginFinished { user, result } => self.finish_login(user, result),
            BackgroundEvent::FormLoaded { generation, result } => {
                self.finish_form_load(generation, result)
            }
        }
    }

    fn finish_login(&mut self, user: SessionUser, result: Result<LoginOutcome, ApiError>) {
        self.state.login.submitting = false;
        if self.state.current_view != View::Login {
            tracing::debug!("Discarding login result for {}", user.roll_number);
            return;
        }
        match result {
            Ok(LoginOutcome::Accepted { message }) => {
                self.state.status_message = Some(message);
                self.begin_session(user);
            }
            Ok(LoginOutcome::Rejected { message }) => {
                tracing::warn!("Login rejected for {}: {}", user.roll_number, message);
                self.push_error(message);
            }
            Err(e) => {
                tracing::error!("Login failed for {}: {}", user.roll_number, e);
                self.push_error(LOGIN_FAULT_MESSAGE);
            }
        }
    }

    fn finish_form_load(&mut self, generation: u64, result: Result<Option<FormSchema>, ApiError>) {
        if !self.state.is_current(generation) || self.state.current_view != View::Loading {
            tracing::debug!("Discarding form result from session {}", generation);
            return;
        }
        let Some(roll_number) = self.state.session.as_ref().map(|u| u.roll_number.clone()) else {
            return;
        };

        let schema = match result {
            Ok(Some(schema)) => schema,
            Ok(None) => {
                tracing::warn!("No form available for {}", roll_number);
                self.show_load_error();
                return;
            }
            Err(e) => {
                tracing::error!("Error fetching form for {}: {}", roll_number, e);
                self.show_load_error();
                return;
            }
        };

        match SectionNavigator::new(schema, &roll_number) {
            Ok(nav) => {
                tracing::info!(
                    "Loaded form {} ({} sections) for {}",
                    nav.schema().form_id,
                    nav.section_count(),
                    roll_number
                );
                self.state.form = Some(nav);
                self.state.current_view = View::Form;
            }
            Err(e) => {
                tracing::error!("Unusable form for {}: {}", roll_number, e);
                self.show_load_error();
            }
        }
    }

    fn show_load_error(&mut self) {
        self.state.load_error = Some(LOAD_ERROR_MESSAGE.to_string());
        self.state.current_view = View::LoadError;
    }

    // Section navigation

    pub fn next_section(&mut self) {
        let Some(nav) = self.state.form.as_mut() else {
            return;
        };
        match nav.next() {
            Transition::Moved { from, to } => {
                tracing::debug!(
                    "Section {} -> {} (transition {})",
                    from,
                    to,
                    nav.transitions()
                );
            }
            Transition::Blocked(errors) => {
                tracing::debug!("Next blocked by {} invalid fields", errors.len());
                self.push_error(NEXT_BLOCKED_MESSAGE);
            }
            Transition::Unavailable => {}
        }
    }

    pub fn previous_section(&mut self) {
        if let Some(nav) = self.state.form.as_mut() {
            if let Transition::Moved { from, to } = nav.previous() {
                tracing::debug!(
                    "Section {} -> {} (transition {})",
                    from,
                    to,
                    nav.transitions()
                );
            }
        }
    }

    /// Validate the last section and deliver the record
    pub fn submit_form(&mut self) {
        let sink = &self.sink;
        let Some(nav) = self.state.form.as_mut() else {
            return;
        };
        let schema = nav.schema().clone();
        let roll_number = nav.roll_number().to_string();

        let outcome =
            nav.submit(|values| sink.deliver(&Submission::new(&schema, &roll_number, values)));

        match outcome {
            Ok(SubmitOutcome::Delivered(receipt)) => {
                tracing::info!(
                    "Submission {} stored at {}",
                    receipt.submission_id,
                    receipt.location.display()
                );
                self.state.last_receipt = Some(receipt);
                self.state.status_message = Some(SUBMIT_SUCCESS_MESSAGE.to_string());
                self.state.current_view = View::Submitted;
            }
            Ok(SubmitOutcome::Blocked(errors)) => {
                tracing::debug!("Submit blocked by {} invalid fields", errors.len());
                self.push_error(SUBMIT_BLOCKED_MESSAGE);
            }
            Ok(SubmitOutcome::Unavailable) => {}
            Err(e) => {
                tracing::error!("Failed to deliver submission: {}", e);
                self.push_error(format!("Could not save the submission: {}", e));
            }
        }
    }

    /// Wait for one background result and apply it
    #[cfg(test)]
    async fn wait_for_background(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.handle_background(event);
        }
    }
}
