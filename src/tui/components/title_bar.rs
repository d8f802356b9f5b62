//! # TitleBar Component
//!
//! Top status bar: application name, the backend it talks to, and the
//! current status message. A spinner frame is prepended while a users or
//! posts load is outstanding.
//!
//! Stateless. All data arrives as props, so tests only need a `TestBackend`.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Braille spinner frames, shared by every loading indicator.
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar {
    pub api_url: String,
    pub status_message: String,
    pub loading: bool,
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(api_url: String, status_message: String, loading: bool, spinner_frame: usize) -> Self {
        Self {
            api_url,
            status_message,
            loading,
            spinner_frame,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("Postboard ({})", self.api_url);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::with_capacity(2);
        if self.loading {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::styled(
                format!("{glyph} "),
                Style::default().fg(Color::Cyan),
            ));
        }
        spans.push(Span::raw(self.text()));
        frame.render_widget(Line::from(spans), area);
    }
}
