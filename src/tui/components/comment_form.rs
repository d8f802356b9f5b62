//! # Comment Form Component
//!
//! Renders `core::comment_form::CommentForm`: three labelled inputs, an
//! error line under each, and the Add / Clear buttons. Editing happens in
//! the event loop against the core form; this file only draws it and
//! records where each field and button landed for mouse hit testing.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::comment_form::{CommentForm, Field};

const NAME_HEIGHT: u16 = 3;
const EMAIL_HEIGHT: u16 = 3;
const BODY_HEIGHT: u16 = 5;

/// Rows the form needs: three inputs, three error lines, one button row.
pub const FORM_HEIGHT: u16 = NAME_HEIGHT + EMAIL_HEIGHT + BODY_HEIGHT + 3 + 1;

pub const FIELDS: [Field; 3] = [Field::Name, Field::Email, Field::Body];

/// Label of the submit button.
pub fn submit_label(form: &CommentForm) -> &'static str {
    if form.submitting { "Adding..." } else { "Add" }
}

/// Wraps `value` to `width` columns, returning the lines and the cursor
/// position (column, line) just past the last character.
fn wrap_with_cursor(value: &str, width: usize) -> (Vec<String>, (u16, u16)) {
    let width = width.max(1);
    let lines: Vec<String> = textwrap::wrap(value, width)
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    // Wrapping may drop trailing spaces; the cursor still sits after them
    let trailing = value.len() - value.trim_end_matches(' ').len();
    let last = lines.last().map(|l| l.trim_end().width()).unwrap_or(0) + trailing;
    let row = lines.len().saturating_sub(1);
    (lines, (last.min(width) as u16, row as u16))
}

pub struct CommentFormView<'a> {
    pub form: &'a CommentForm,
    pub focused: Option<Field>,
    /// Filled in during render with each field's input area.
    pub field_areas: &'a mut [Rect; 3],
    /// Filled in during render: Add, then Clear.
    pub button_areas: &'a mut [Rect; 2],
}

impl CommentFormView<'_> {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::Length;
        let [
            name_area,
            name_err,
            email_area,
            email_err,
            body_area,
            body_err,
            buttons_area,
        ] = Layout::vertical([
            Length(NAME_HEIGHT),
            Length(1),
            Length(EMAIL_HEIGHT),
            Length(1),
            Length(BODY_HEIGHT),
            Length(1),
            Length(1),
        ])
        .areas(area);

        let slots = [(name_area, name_err), (email_area, email_err), (body_area, body_err)];
        for (i, (field, (input_area, error_area))) in FIELDS.iter().zip(slots).enumerate() {
            self.field_areas[i] = input_area;
            self.render_field(frame, *field, input_area, error_area);
        }

        let submit_style = if self.form.submitting {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        let add = format!("[ {} ]", submit_label(self.form));
        let add_width = add.width() as u16;
        let clear = "[ Clear ]";
        let add_area = Rect::new(buttons_area.x, buttons_area.y, add_width, 1);
        let clear_area = Rect::new(
            buttons_area.x.saturating_add(add_width + 2),
            buttons_area.y,
            clear.width() as u16,
            1,
        );
        *self.button_areas = [
            add_area.intersection(buttons_area),
            clear_area.intersection(buttons_area),
        ];

        let buttons = Line::from(vec![
            Span::styled(add, submit_style),
            Span::raw("  "),
            Span::styled(clear, Style::default().fg(Color::DarkGray)),
            Span::styled("  Enter add · Ctrl+L clear", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(buttons), buttons_area);
    }

    fn render_field(&self, frame: &mut Frame, field: Field, area: Rect, error_area: Rect) {
        let focused = self.focused == Some(field);
        let has_error = self.form.has_error(field);
        let border_style = match (has_error, focused) {
            (true, _) => Style::default().fg(Color::Red),
            (false, true) => Style::default().fg(Color::Cyan),
            (false, false) => Style::default().fg(Color::DarkGray),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", field.label()));
        let inner = block.inner(area);

        let (lines, (cursor_col, cursor_row)) =
            wrap_with_cursor(self.form.value(field), inner.width as usize);
        // Keep the cursor line in view
        let skip = (cursor_row + 1).saturating_sub(inner.height);
        let visible: Vec<Line> = lines
            .into_iter()
            .skip(skip as usize)
            .map(Line::from)
            .collect();
        frame.render_widget(Paragraph::new(visible).block(block), area);

        if has_error {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    field.error_message(),
                    Style::default().fg(Color::Red),
                )),
                error_area,
            );
        }

        if focused && inner.width > 0 && inner.height > 0 {
            let x = inner.x + cursor_col.min(inner.width - 1);
            let y = inner.y + (cursor_row - skip).min(inner.height - 1);
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}
