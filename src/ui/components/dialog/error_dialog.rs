//! Error dialog component

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render an error dialog overlay centered on the screen.
/// `pending` is the number of errors queued behind this one.
pub fn render_error_dialog(frame: &mut Frame, error_message: &str, pending: usize) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut hint = vec![
        Span::raw("Press "),
        Span::styled("Enter", key_style),
        Span::raw(" or "),
        Span::styled("Esc", key_style),
        Span::raw(" to dismiss"),
    ];
    if pending > 0 {
        hint.push(Span::styled(
            format!(" ({pending} more)"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    render_dialog(
        frame,
        DialogConfig {
            title: "Error",
            title_color: Color::Red,
            border_color: Color::Red,
            message: error_message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(message: &str, pending: usize) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| render_error_dialog(frame, message, pending))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut result = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                result.push_str(buffer[(x, y)].symbol());
            }
            result.push('\n');
        }
        result
    }

    #[test]
    fn test_shows_title_message_and_hint() {
        let output = render("Please fill in all fields", 0);
        assert!(output.contains("Error"));
        assert!(output.contains("Please fill in all fields"));
        assert!(output.contains("Press Enter or Esc to dismiss"));
        assert!(!output.contains("more)"));
    }

    #[test]
    fn test_shows_pending_count() {
        let output = render("first", 2);
        assert!(output.contains("(2 more)"));
    }
}
