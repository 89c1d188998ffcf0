//! Field rendering for schema-driven forms
//!
//! One draw routine per control kind. Every field gets a bordered box; the
//! label sits in the border title (toggles print it beside the check mark
//! instead) and a validation error, when present, sits under the box.

use crate::state::{ControlKind, FieldDefinition, FieldValue};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

/// Everything needed to draw one field
pub struct FieldView<'a> {
    pub field: &'a FieldDefinition,
    pub value: &'a FieldValue,
    pub error: Option<&'a str>,
    pub is_active: bool,
    /// Option cursor for radio and checkbox groups
    pub option_cursor: usize,
}

impl FieldView<'_> {
    fn kind(&self) -> ControlKind {
        ControlKind::from(self.field.field_type)
    }

    fn title(&self) -> String {
        if self.field.required {
            format!(" {} * ", self.field.label)
        } else {
            format!(" {} ", self.field.label)
        }
    }

    fn accent(&self) -> Style {
        if self.is_active {
            Style::default().fg(Color::Cyan)
        } else if self.error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    /// Rows inside the border
    fn body_height(&self) -> u16 {
        match self.kind() {
            ControlKind::SingleLine | ControlKind::Toggle | ControlKind::Dropdown => 1,
            ControlKind::MultiLine => {
                let lines = self.value.as_text().map(|s| s.split('\n').count()).unwrap_or(1);
                rows(lines.max(3))
            }
            ControlKind::RadioGroup | ControlKind::CheckboxGroup => {
                rows(self.field.options.len().max(1))
            }
        }
    }
}

fn rows(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// Total rows a field needs, error line included
pub fn field_height(view: &FieldView) -> u16 {
    view.body_height()
        .saturating_add(2)
        .saturating_add(u16::from(view.error.is_some()))
}

/// Draw a field in `area`, which should be `field_height` rows tall
pub fn draw_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    render_field(view, area, frame.buffer_mut());
}

/// Draw the rows of a field starting at `skip` into `area`.
///
/// For fields cut by the edge of a scrolled list: the whole field is
/// rendered off screen and only the rows that fit are copied over.
pub fn draw_field_clipped(frame: &mut Frame, area: Rect, view: &FieldView, skip: u16) {
    let height = field_height(view);
    let mut scratch = Buffer::empty(Rect::new(0, 0, area.width, height));
    render_field(view, scratch.area, &mut scratch);

    let visible = area.height.min(height.saturating_sub(skip));
    let buf = frame.buffer_mut();
    for row in 0..visible {
        for x in 0..area.width {
            buf[(area.x + x, area.y + row)] = scratch[(x, skip + row)].clone();
        }
    }
}

fn render_field(view: &FieldView, area: Rect, buf: &mut Buffer) {
    let box_area = Rect {
        height: area.height.min(view.body_height().saturating_add(2)),
        ..area
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(view.accent());
    let block = if view.kind().shows_label() {
        block.title(view.title())
    } else {
        block
    };

    let lines = match view.kind() {
        ControlKind::SingleLine | ControlKind::MultiLine => text_lines(view),
        ControlKind::RadioGroup => {
            option_lines(view, |option| view.value.as_text() == Some(option), ("(•)", "( )"))
        }
        ControlKind::CheckboxGroup => {
            option_lines(view, |option| view.value.has_choice(option), ("[x]", "[ ]"))
        }
        ControlKind::Toggle => vec![toggle_line(view)],
        ControlKind::Dropdown => vec![dropdown_line(view)],
    };

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block)
        .render(box_area, buf);

    if let Some(error) = view.error {
        if area.height > box_area.height {
            let error_area = Rect {
                y: box_area.y + box_area.height,
                height: 1,
                ..area
            };
            Paragraph::new(format!(" {error}"))
                .style(Style::default().fg(Color::Red))
                .render(error_area, buf);
        }
    }
}

/// Draw a free-standing single-line input, for inputs outside a schema
pub fn draw_text_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    is_active: bool,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = if value.is_empty() && !is_active {
        Line::from(Span::styled(placeholder, Style::default().fg(Color::DarkGray)))
    } else if is_active {
        Line::from(vec![
            Span::raw(value),
            Span::styled(CURSOR, Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(Span::styled(value, Style::default().fg(Color::Gray)))
    };

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn text_lines<'a>(view: &'a FieldView) -> Vec<Line<'a>> {
    let text = view.value.as_text().unwrap_or_default();
    let cursor_style = Style::default().fg(Color::Cyan);

    if text.is_empty() && !view.is_active {
        let hint = view.field.placeholder.as_deref().unwrap_or("(empty)");
        return vec![Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let style = if view.is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut lines: Vec<Line> = text
        .split('\n')
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();
    if view.is_active {
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(CURSOR, cursor_style));
        }
    }
    lines
}

fn option_lines<'a>(
    view: &'a FieldView,
    is_selected: impl Fn(&str) -> bool,
    (on, off): (&'static str, &'static str),
) -> Vec<Line<'a>> {
    if view.field.options.is_empty() {
        return vec![Line::from(Span::styled(
            "(no options)",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    view.field
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let under_cursor = view.is_active && idx == view.option_cursor;
            let marker = if is_selected(&option.value) { on } else { off };
            let style = if under_cursor {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let pointer = if under_cursor { "› " } else { "  " };
            Line::from(Span::styled(
                format!("{pointer}{marker} {}", option.label),
                style,
            ))
        })
        .collect()
}

fn toggle_line<'a>(view: &'a FieldView) -> Line<'a> {
    let marker = if view.value.as_flag() { "[x]" } else { "[ ]" };
    let style = if view.is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let required = if view.field.required { " *" } else { "" };
    Line::from(Span::styled(
        format!("{marker} {}{required}", view.field.label),
        style,
    ))
}

fn dropdown_line<'a>(view: &'a FieldView) -> Line<'a> {
    let selected = view
        .value
        .as_text()
        .and_then(|v| view.field.option_label(v));
    let (text, style) = match selected {
        Some(label) => (label.to_string(), Style::default()),
        None => (
            view.field
                .placeholder
                .clone()
                .unwrap_or_else(|| "Select an option".to_string()),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let arrows = if view.is_active { "◂ ▸ " } else { "▾ " };
    Line::from(vec![
        Span::styled(arrows, Style::default().fg(Color::Cyan)),
        Span::styled(text, style),
    ])
}
