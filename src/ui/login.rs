//! Login screen

use super::components::{render_button, BUTTON_HEIGHT};
use super::forms::draw_text_input;
use super::layout::centered;
use crate::state::{LoginField, LoginForm};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BOX_WIDTH: u16 = 50;
const BOX_HEIGHT: u16 = 14;

pub fn draw(frame: &mut Frame, area: Rect, login: &LoginForm) {
    let box_area = centered(area, BOX_WIDTH, BOX_HEIGHT);
    let block = Block::default()
        .title(" Student Login ")
        .title_alignment(Alignment::Center)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),             // Intro
            Constraint::Length(3),             // Roll number
            Constraint::Length(3),             // Name
            Constraint::Length(BUTTON_HEIGHT), // Login
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new("Sign in to load your form")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );

    for (field, chunk) in [LoginField::RollNumber, LoginField::Name]
        .into_iter()
        .zip([chunks[1], chunks[2]])
    {
        draw_text_input(
            frame,
            chunk,
            field.label(),
            login.value(field),
            field.placeholder(),
            login.active == field,
        );
    }

    let label = if login.submitting {
        "Logging in..."
    } else {
        LoginField::Submit.label()
    };
    render_button(
        frame,
        chunks[3],
        label,
        login.active == LoginField::Submit,
        !login.submitting,
    );
}
