//! # User Selector Component
//!
//! A trigger line ("Choose a user" or the selected name) that opens a
//! dropdown of all users. Follows the persistent state + transient wrapper
//! pattern:
//! - `UserSelectorState` lives in `TuiState` (open flag, highlight, areas)
//! - `UserSelector` is created each frame with borrowed state and props
//!
//! The selector never fetches anything. It reports a choice upward and the
//! controller decides what to load.
//!
//! ## Dismissal
//!
//! The event loop hands every mouse click to the selector before anything
//! else. A click outside both the trigger and the open menu closes the menu;
//! the click is then handled normally by whatever lies under it.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::api::User;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Events emitted by the selector. `Select` carries an index into the user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSelectorEvent {
    Select(usize),
    Clear,
}

#[derive(Debug, Default)]
pub struct UserSelectorState {
    pub is_open: bool,
    pub highlighted: usize,
    pub list_state: ListState,
    /// Number of users on offer and the selected one's index, synced from
    /// `App` every frame.
    pub user_count: usize,
    pub selected_index: Option<usize>,
    /// Screen areas from the last render, used for click hit testing.
    pub trigger_area: Rect,
    pub menu_area: Rect,
}

impl UserSelectorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the menu with the selected user highlighted.
    pub fn open(&mut self) {
        self.is_open = true;
        self.highlighted = self
            .selected_index
            .unwrap_or(0)
            .min(self.user_count.saturating_sub(1));
        self.list_state.select(Some(self.highlighted));
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.menu_area = Rect::default();
    }

    /// True if `(col, row)` falls on the trigger or the open menu.
    pub fn hit(&self, col: u16, row: u16) -> bool {
        let pos = Position::new(col, row);
        self.trigger_area.contains(pos) || (self.is_open && self.menu_area.contains(pos))
    }

    fn move_highlight(&mut self, down: bool) {
        if self.user_count == 0 {
            return;
        }
        self.highlighted = if down {
            (self.highlighted + 1).min(self.user_count - 1)
        } else {
            self.highlighted.saturating_sub(1)
        };
        self.list_state.select(Some(self.highlighted));
    }

    /// Index of the menu entry at screen row `row`, if any.
    fn item_at(&self, row: u16) -> Option<usize> {
        // One border line above the first entry and one below the last
        let first = self.menu_area.y + 1;
        let last = self.menu_area.bottom().saturating_sub(1);
        if row < first || row >= last {
            return None;
        }
        let index = (row - first) as usize + self.list_state.offset();
        (index < self.user_count).then_some(index)
    }

    fn choose(&mut self, index: usize) -> Option<UserSelectorEvent> {
        self.close();
        Some(UserSelectorEvent::Select(index))
    }
}

impl EventHandler for UserSelectorState {
    type Event = UserSelectorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<UserSelectorEvent> {
        match event {
            TuiEvent::MouseClick(col, row) => {
                let pos = Position::new(*col, *row);
                if self.is_open && self.menu_area.contains(pos) {
                    return self.item_at(*row).and_then(|i| self.choose(i));
                }
                if self.trigger_area.contains(pos) {
                    if self.is_open {
                        self.close();
                    } else {
                        self.open();
                    }
                    return None;
                }
                // Outside click
                if self.is_open {
                    self.close();
                }
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => {
                if self.is_open {
                    if self.user_count == 0 {
                        self.close();
                        return None;
                    }
                    return self.choose(self.highlighted);
                }
                self.open();
                None
            }
            TuiEvent::CursorUp if self.is_open => {
                self.move_highlight(false);
                None
            }
            TuiEvent::CursorDown if self.is_open => {
                self.move_highlight(true);
                None
            }
            TuiEvent::Escape => {
                self.close();
                None
            }
            TuiEvent::InputChar('x') => {
                self.close();
                Some(UserSelectorEvent::Clear)
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the selector.
pub struct UserSelector<'a> {
    state: &'a mut UserSelectorState,
    users: &'a [User],
    selected: Option<&'a User>,
    focused: bool,
}

impl<'a> UserSelector<'a> {
    pub fn new(
        state: &'a mut UserSelectorState,
        users: &'a [User],
        selected: Option<&'a User>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            users,
            selected,
            focused,
        }
    }

    /// Renders the trigger into `area` and, when open, the menu just below it.
    /// Call last so the menu draws over the rest of the frame.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.trigger_area = area;

        let label = self
            .selected
            .map(|u| u.name.as_str())
            .unwrap_or("Choose a user");
        let arrow = if self.state.is_open { "▴" } else { "▾" };
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let trigger = Paragraph::new(Line::from(vec![
            Span::raw(label),
            Span::styled(format!(" {arrow}"), Style::default().fg(Color::DarkGray)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" User "),
        );
        frame.render_widget(trigger, area);

        if !self.state.is_open {
            self.state.menu_area = Rect::default();
            return;
        }

        let frame_bottom = frame.area().bottom();
        let top = area.bottom();
        let wanted = self.users.len().max(1) as u16 + 2;
        let height = wanted.min(frame_bottom.saturating_sub(top));
        let menu = Rect::new(area.x, top, area.width, height);
        self.state.menu_area = menu;
        if height < 3 {
            return;
        }

        frame.render_widget(Clear, menu);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if self.users.is_empty() {
            let empty = Paragraph::new("No users")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, menu);
            return;
        }

        let items: Vec<ListItem> = self
            .users
            .iter()
            .map(|user| {
                let is_selected = self.selected.is_some_and(|s| s.id == user.id);
                let marker = if is_selected { "● " } else { "  " };
                let style = if is_selected {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(format!("{marker}{}", user.name), style)))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, menu, &mut self.state.list_state);
    }
}
