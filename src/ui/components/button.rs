//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Width that fits `label` with a space of padding on each side
pub fn button_width(label: &str) -> u16 {
    label.chars().count() as u16 + 4
}

/// Render a bordered button with a centered label
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if is_selected && is_enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} "))
        .alignment(Alignment::Center)
        .style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, layout::Position, Terminal};

    #[test]
    fn test_button_width_counts_chars() {
        assert_eq!(button_width("Next"), 8);
        assert_eq!(button_width("Zurück"), 10);
    }

    #[test]
    fn test_selected_button_is_cyan() {
        let mut terminal = Terminal::new(TestBackend::new(12, BUTTON_HEIGHT)).unwrap();
        terminal
            .draw(|frame| render_button(frame, frame.area(), "Next", true, true))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[Position::new(0, 0)].fg, Color::Cyan);
        let row: String = (0..12u16).map(|x| buffer[Position::new(x, 1)].symbol()).collect();
        assert!(row.contains("Next"));
    }

    #[test]
    fn test_disabled_button_is_dimmed_even_when_selected() {
        let mut terminal = Terminal::new(TestBackend::new(14, BUTTON_HEIGHT)).unwrap();
        terminal
            .draw(|frame| render_button(frame, frame.area(), "Previous", true, false))
            .unwrap();
        assert_eq!(terminal.backend().buffer()[Position::new(0, 0)].fg, Color::DarkGray);
    }
}
