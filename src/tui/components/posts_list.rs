//! # Posts List Component
//!
//! Table of the loaded posts: `#`, `Title` and an `Open`/`Close` action.
//! Rendering is a pure function of the posts, the selected post and the
//! keyboard cursor. Activating a row reports the post; whether that opens
//! or closes it is the controller's toggle.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use crate::api::{Post, PostId};

/// Label of the action button for `post`.
pub fn action_label(post: &Post, selected: Option<PostId>) -> &'static str {
    if selected == Some(post.id) {
        "Close"
    } else {
        "Open"
    }
}

/// Index of the post drawn at screen row `row`, given the table area and
/// scroll offset of the last render.
pub fn row_at(area: Rect, offset: usize, row: u16) -> Option<usize> {
    // Border line + header line above the first row
    let first = area.y + 2;
    let last = area.bottom().saturating_sub(1);
    if row < first || row >= last {
        return None;
    }
    Some((row - first) as usize + offset)
}

pub struct PostsList<'a> {
    pub posts: &'a [Post],
    pub selected: Option<PostId>,
    pub state: &'a mut TableState,
    pub focused: bool,
}

impl PostsList<'_> {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let header = Row::new(["#", "Title", ""])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.posts.iter().map(|post| {
            let label = action_label(post, self.selected);
            let (row_style, label_style) = if label == "Close" {
                (
                    Style::default().fg(Color::Cyan),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )
            } else {
                (Style::default(), Style::default().fg(Color::DarkGray))
            };
            Row::new([
                Cell::from(post.id.to_string()),
                Cell::from(post.title.as_str()),
                Cell::from(format!("[{label}]")).style(label_style),
            ])
            .style(row_style)
        });

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let table = Table::new(
            rows,
            [Constraint::Length(4), Constraint::Min(10), Constraint::Length(7)],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Posts "),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(table, area, self.state);
    }
}
