//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod login;
mod screens;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = layout::content_area(frame.area());
    let state = &app.state;

    match state.current_view {
        View::Login => login::draw(frame, area, &state.login),
        View::Loading => screens::draw_loading(frame, area),
        View::Form => match &state.form {
            Some(nav) => forms::draw_form(frame, area, nav, state.session.as_ref()),
            None => screens::draw_loading(frame, area),
        },
        View::LoadError => screens::draw_load_error(
            frame,
            area,
            state.load_error.as_deref().unwrap_or_default(),
        ),
        View::Submitted => screens::draw_submitted(
            frame,
            area,
            state.session.as_ref(),
            state.last_receipt.as_ref(),
        ),
    }

    layout::draw_status_bar(frame, app);

    // Error dialog overlay (modal, drawn last)
    if let Some(message) = state.current_error() {
        render_error_dialog(frame, message, state.pending_errors());
    }
}
