//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::{LOGOUT_SHORTCUT, NEXT_SHORTCUT, PREVIOUS_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split off the bottom line for the status bar, returning the content area
pub fn content_area(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Session indicator
    let view = app.state.current_view;
    match &app.state.session {
        Some(user) if view.needs_session() => {
            spans.push(Span::styled(" ● ", Style::default().fg(Color::Green)));
            spans.push(Span::styled(
                format!("{} ", user.roll_number),
                Style::default().fg(Color::Blue),
            ));
        }
        _ => spans.push(Span::styled(" ○ ", Style::default().fg(Color::Gray))),
    }

    spans.push(Span::styled(
        format!("{} | ", view.title()),
        Style::default().fg(Color::White),
    ));
    spans.push(Span::styled(
        get_view_hints(view),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::Login => "Tab:next  Enter:login".to_string(),
        View::Loading => format!("{LOGOUT_SHORTCUT}:logout"),
        View::Form => format!(
            "Tab:next  {NEXT_SHORTCUT}:next  {PREVIOUS_SHORTCUT}:prev  {SUBMIT_SHORTCUT}:submit  {LOGOUT_SHORTCUT}:logout"
        ),
        View::LoadError => format!("Enter/{LOGOUT_SHORTCUT}:back to login"),
        View::Submitted => format!("{LOGOUT_SHORTCUT}:logout"),
    }
}
