//! # Post Details Component
//!
//! Right-hand panel for the selected post: title, body, then the comment
//! thread. The thread shows a loader, a failure notice, an empty notice or
//! the comments themselves. Content is laid out as wrapped lines and drawn
//! inside a `ScrollView`.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::Post;
use crate::core::state::PostDetails;
use crate::tui::components::SPINNER;

/// Laid-out panel content plus where each comment starts.
struct DetailsLayout {
    lines: Vec<Line<'static>>,
    comment_starts: Vec<u16>,
}

pub struct PostDetailsView<'a> {
    pub post: &'a Post,
    pub details: &'a PostDetails,
    /// Highlighted comment, when the thread has focus.
    pub cursor: Option<usize>,
    /// Scroll so the highlighted comment is visible.
    pub follow_cursor: bool,
    pub scroll: &'a mut ScrollViewState,
    pub spinner_frame: usize,
}

impl PostDetailsView<'_> {
    fn layout(&self, width: usize) -> DetailsLayout {
        let width = width.max(1);
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut comment_starts = Vec::new();

        lines.push(Line::from(Span::styled(
            format!("#{} {}", self.post.id, self.post.title),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
        for line in textwrap::wrap(&self.post.body, width) {
            lines.push(Line::from(line.into_owned()));
        }
        lines.push(Line::default());

        let details = self.details;
        if details.loading {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            lines.push(Line::from(Span::styled(
                format!("{glyph} Loading comments..."),
                Style::default().fg(Color::DarkGray),
            )));
        } else if details.load_failed {
            lines.push(Line::from(Span::styled(
                "Something went wrong",
                Style::default().fg(Color::Red),
            )));
        } else if details.comments.is_empty() {
            lines.push(Line::from(Span::styled(
                "No comments yet",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Comments:",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            let body_width = width.saturating_sub(2).max(1);
            for (i, comment) in details.comments.iter().enumerate() {
                comment_starts.push(lines.len() as u16);
                let highlighted = self.cursor == Some(i);
                let marker = if highlighted { "▸ " } else { "  " };
                let name_style = if highlighted {
                    Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                lines.push(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(comment.name.clone(), name_style),
                    Span::raw(" "),
                    Span::styled(
                        format!("<{}>", comment.email),
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                ]));
                for line in textwrap::wrap(&comment.body, body_width) {
                    lines.push(Line::from(format!("  {line}")));
                }
                lines.push(Line::default());
            }
        }

        DetailsLayout {
            lines,
            comment_starts,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Post #{} ", self.post.id));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width < 2 || inner.height == 0 {
            return;
        }

        // One column for the scrollbar
        let content_width = inner.width - 1;
        let layout = self.layout(content_width as usize);
        let total_height = layout.lines.len() as u16;

        if self.follow_cursor
            && let Some(start) = self.cursor.and_then(|i| layout.comment_starts.get(i).copied())
        {
            let offset = self.scroll.offset();
            if start < offset.y {
                self.scroll.set_offset(Position::new(0, start));
            } else if start + 1 >= offset.y + inner.height {
                let y = (start + 2).saturating_sub(inner.height);
                self.scroll.set_offset(Position::new(0, y));
            }
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(layout.lines),
            Rect::new(0, 0, content_width, total_height),
        );
        frame.render_stateful_widget(scroll_view, inner, self.scroll);
    }
}
