//! Single-purpose screens: loading, load failure, submission acknowledgement

use super::components::{button_width, render_button, BUTTON_HEIGHT};
use super::layout::centered;
use crate::platform::LOGOUT_SHORTCUT;
use crate::state::SessionUser;
use crate::submission::SubmissionReceipt;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const BOX_WIDTH: u16 = 60;

fn panel(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

pub fn draw_loading(frame: &mut Frame, area: Rect) {
    let box_area = centered(area, BOX_WIDTH, 6);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Loading your form...",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Please wait while we fetch the form data.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(panel("Formdeck", Color::Cyan)),
        box_area,
    );
}

pub fn draw_load_error(frame: &mut Frame, area: Rect, message: &str) {
    let box_area = centered(area, BOX_WIDTH, 10);
    let block = panel("Error Loading Form", Color::Red);
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(BUTTON_HEIGHT)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let label = "Back to Login";
    let button_area = centered(chunks[1], button_width(label), BUTTON_HEIGHT);
    render_button(frame, button_area, label, true, true);
}

pub fn draw_submitted(
    frame: &mut Frame,
    area: Rect,
    user: Option<&SessionUser>,
    receipt: Option<&SubmissionReceipt>,
) {
    let box_area = centered(area, BOX_WIDTH, 11);
    let label_style = Style::default().fg(Color::Gray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Form submitted successfully!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(user) = user {
        lines.push(Line::from(vec![
            Span::styled("Submitted by: ", label_style),
            Span::raw(format!("{} ({})", user.name, user.roll_number)),
        ]));
    }
    if let Some(receipt) = receipt {
        lines.push(Line::from(vec![
            Span::styled("Submission: ", label_style),
            Span::raw(receipt.submission_id.to_string()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Saved to: ", label_style),
            Span::raw(receipt.location.display().to_string()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Press {LOGOUT_SHORTCUT} to log out"),
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(panel("Thank you", Color::Green)),
        box_area,
    );
}
