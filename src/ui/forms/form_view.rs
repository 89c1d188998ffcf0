//! Form view: header with progress, the current section's fields and the
//! Previous / Next / Submit buttons

use super::field_renderer::{draw_field, draw_field_clipped, field_height, FieldView};
use crate::state::{FieldValue, SectionAction, SectionNavigator, SessionUser};
use crate::ui::components::{button_width, render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draw the form for the current section
pub fn draw(frame: &mut Frame, area: Rect, nav: &SectionNavigator, user: Option<&SessionUser>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),             // Header + progress
            Constraint::Length(2),             // Section title + description
            Constraint::Min(3),                // Fields
            Constraint::Length(BUTTON_HEIGHT), // Actions row
        ])
        .split(area);

    draw_header(frame, chunks[0], nav, user);
    draw_section_heading(frame, chunks[1], nav);
    draw_fields(frame, chunks[2], nav);
    draw_actions(frame, chunks[3], nav);
}

fn draw_header(frame: &mut Frame, area: Rect, nav: &SectionNavigator, user: Option<&SessionUser>) {
    let block = Block::default()
        .title(format!(" {} ", nav.schema().form_title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let name = user.map(|u| u.name.as_str()).unwrap_or_default();
    let session = Line::from(vec![
        Span::styled(
            format!("Welcome, {name}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  Roll Number: {}", nav.roll_number()),
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(Paragraph::new(session), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(nav.progress())
        .label(format!(
            "Section {} of {}",
            nav.current_index() + 1,
            nav.section_count()
        ));
    frame.render_widget(gauge, rows[1]);
}

fn draw_section_heading(frame: &mut Frame, area: Rect, nav: &SectionNavigator) {
    let section = nav.current_section();
    let store = nav.store();
    let mut title = vec![Span::styled(
        section.title.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if store.has_errors() {
        let count = store.errors().len();
        let noun = if count == 1 { "field needs" } else { "fields need" };
        title.push(Span::styled(
            format!("  ({count} {noun} attention)"),
            Style::default().fg(Color::Red),
        ));
    }
    let lines = vec![
        Line::from(title),
        Line::from(Span::styled(
            section.description.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_fields(frame: &mut Frame, area: Rect, nav: &SectionNavigator) {
    let section = nav.current_section();
    if section.fields.is_empty() {
        frame.render_widget(
            Paragraph::new("This section has no questions.")
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let store = nav.store();
    let values: Vec<FieldValue> = section
        .fields
        .iter()
        .map(|f| store.get_value(&f.field_id))
        .collect();
    let views: Vec<FieldView> = section
        .fields
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(idx, (field, value))| FieldView {
            field,
            value,
            error: store.error(&field.field_id),
            is_active: idx == nav.active_slot(),
            option_cursor: nav.option_cursor(),
        })
        .collect();
    let heights: Vec<u16> = views.iter().map(field_height).collect();
    let total = total_height(&heights);

    let offset = visible_offset(&heights, nav.active_slot(), nav.scroll_offset(), area.height);
    let viewport_end = offset.saturating_add(area.height);

    let mut top = 0u16;
    for (view, &height) in views.iter().zip(&heights) {
        let bottom = top.saturating_add(height);
        if bottom > offset && top < viewport_end {
            let skip = offset.saturating_sub(top);
            let field_area = Rect {
                y: area.y + top.saturating_sub(offset),
                height: bottom.min(viewport_end) - top.max(offset),
                ..area
            };
            if skip == 0 && field_area.height == height {
                draw_field(frame, field_area, view);
            } else {
                draw_field_clipped(frame, field_area, view, skip);
            }
        }
        top = bottom;
    }

    let indicator_style = Style::default().fg(Color::DarkGray);
    if offset > 0 {
        frame.render_widget(
            Paragraph::new("↑ more")
                .alignment(Alignment::Right)
                .style(indicator_style),
            Rect { height: 1, ..area },
        );
    }
    if total > viewport_end && area.height > 0 {
        frame.render_widget(
            Paragraph::new("↓ more")
                .alignment(Alignment::Right)
                .style(indicator_style),
            Rect {
                y: area.y + area.height - 1,
                height: 1,
                ..area
            },
        );
    }
}

/// First visible row of the field list.
///
/// Starts from the requested scroll position, clamped to the content, then
/// moves just enough to keep the focused field in view. When the actions row
/// has focus the requested position is used as is.
pub(super) fn visible_offset(heights: &[u16], active: usize, requested: u16, viewport: u16) -> u16 {
    let total = total_height(heights);
    let mut offset = requested.min(total.saturating_sub(viewport));

    if let Some(&height) = heights.get(active) {
        let top = total_height(&heights[..active]);
        let bottom = top.saturating_add(height);
        if top < offset {
            offset = top;
        } else if bottom > offset.saturating_add(viewport) {
            offset = bottom.saturating_sub(viewport).min(top);
        }
    }
    offset
}

fn total_height(heights: &[u16]) -> u16 {
    heights.iter().fold(0u16, |acc, h| acc.saturating_add(*h))
}

fn draw_actions(frame: &mut Frame, area: Rect, nav: &SectionNavigator) {
    let primary = if nav.is_last() {
        SectionAction::Submit
    } else {
        SectionAction::Next
    };
    let previous_label = SectionAction::Previous.label();
    let primary_label = primary.label();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(button_width(previous_label)),
            Constraint::Min(0),
            Constraint::Length(button_width(primary_label)),
        ])
        .split(area);

    let is_selected =
        |action: SectionAction| nav.is_actions_row_active() && nav.selected_action() == Some(action);

    render_button(
        frame,
        chunks[0],
        previous_label,
        is_selected(SectionAction::Previous),
        !nav.is_first(),
    );
    render_button(
        frame,
        chunks[2],
        primary_label,
        is_selected(primary),
        true,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::student_schema;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_to_string(buffer: &Buffer) -> String {
        let mut result = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                result.push_str(buffer[(x, y)].symbol());
            }
            result.push('\n');
        }
        result
    }

    fn user() -> SessionUser {
        SessionUser {
            roll_number: "21CS001".into(),
            name: "Ada".into(),
        }
    }

    fn render(nav: &SectionNavigator, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let user = user();
        terminal
            .draw(|frame| draw(frame, frame.area(), nav, Some(&user)))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn navigator() -> SectionNavigator {
        SectionNavigator::new(student_schema(), "21CS001").unwrap()
    }

    mod rendering {
        use super::*;

        #[test]
        fn test_first_section_layout() {
            let output = render(&navigator(), 60, 20);
            assert!(output.contains("Student Survey"));
            assert!(output.contains("Welcome, Ada"));
            assert!(output.contains("Roll Number: 21CS001"));
            assert!(output.contains("Section 1 of 2"));
            assert!(output.contains("Personal details"));
            assert!(output.contains("name *"));
            assert!(output.contains("Previous"));
            assert!(output.contains("Next"));
            assert!(!output.contains("Submit"));
        }

        #[test]
        fn test_last_section_offers_submit() {
            let mut nav = navigator();
            nav.set_value("name", FieldValue::Text("Ada".into())).unwrap();
            nav.next();
            let output = render(&nav, 60, 30);
            assert!(output.contains("Section 2 of 2"));
            assert!(output.contains("Contact"));
            assert!(output.contains("Submit"));
            assert!(output.contains("[ ] RUST"));
        }

        #[test]
        fn test_errors_are_shown_under_fields() {
            let mut nav = navigator();
            nav.next();
            let output = render(&nav, 60, 20);
            assert!(output.contains("This field is required"));
            assert!(output.contains("(1 field needs attention)"));
        }

        #[test]
        fn test_overflow_shows_more_indicator() {
            let mut nav = navigator();
            nav.set_value("name", FieldValue::Text("Ada".into())).unwrap();
            nav.next();
            let output = render(&nav, 60, 16);
            assert!(output.contains("↓ more"));
        }
    }

    mod tall_fields {
        use super::*;
        use crate::state::fixtures::{field, options, section};
        use crate::state::{FieldDefinition, FieldType, FormSchema};

        /// One section holding a radio group taller than a 20-row screen
        fn department_navigator() -> SectionNavigator {
            let dept = FieldDefinition {
                options: options(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l"]),
                ..field("dept", FieldType::Radio)
            };
            let schema = FormSchema {
                form_title: "Enrolment".to_string(),
                form_id: "enrol".to_string(),
                version: "1".to_string(),
                sections: vec![section("Faculty", vec![dept])],
            };
            SectionNavigator::new(schema, "21CS001").unwrap()
        }

        #[test]
        fn test_focused_field_taller_than_viewport_is_drawn() {
            let nav = department_navigator();
            let output = render(&nav, 60, 20);
            assert!(output.contains("dept"));
            assert!(output.contains("( ) A"));
            assert!(output.contains("( ) B"));
            assert!(output.contains("↓ more"));
        }

        #[test]
        fn test_scrolled_field_is_clipped_at_the_top() {
            let mut nav = department_navigator();
            nav.next_focus();
            assert!(nav.is_actions_row_active());
            nav.scroll_down();
            nav.scroll_down();

            let output = render(&nav, 60, 20);
            assert!(!output.contains("( ) A"));
            assert!(output.contains("( ) C"));
            assert!(output.contains("( ) K"));
            assert!(output.contains("↑ more"));
        }
    }

    mod scrolling {
        use super::*;

        #[test]
        fn test_requested_offset_is_clamped_to_content() {
            assert_eq!(visible_offset(&[3, 3, 3], 3, 50, 6), 3);
            assert_eq!(visible_offset(&[3, 3], 2, 5, 10), 0);
        }

        #[test]
        fn test_focused_field_below_viewport_scrolls_into_view() {
            assert_eq!(visible_offset(&[3, 3, 3, 3], 3, 0, 6), 6);
        }

        #[test]
        fn test_focused_field_above_viewport_scrolls_back() {
            assert_eq!(visible_offset(&[3, 3, 3, 3], 0, 6, 6), 0);
        }

        #[test]
        fn test_actions_row_focus_keeps_requested_offset() {
            assert_eq!(visible_offset(&[3, 3, 3, 3], 4, 4, 6), 4);
        }

        #[test]
        fn test_tall_field_shows_its_top() {
            assert_eq!(visible_offset(&[3, 10], 1, 0, 6), 3);
        }
    }
}
