//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm event ──► TuiEvent ──► handle_event() ──► Action ──► update()
//!                                                                   │
//!        mpsc::Receiver ◄── tokio task (tasks::perform) ◄── Effect ◄┘
//! ```
//!
//! Request effects run on background tasks. Their completion actions come
//! back over a channel that the loop drains between frames, so all state
//! changes happen on this thread.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (a load or submission is outstanding): draws every ~80ms
//!   so spinners move.
//! - **Idle**: waits up to 250ms for input and only redraws when an event or
//!   a completion arrived.

mod component;
mod components;
mod event;
pub mod tasks;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::TableState;
use tui_scrollview::ScrollViewState;

use crate::api::{ApiClient, BoardApi, PostId};
use crate::core::action::{Action, Effect, update};
use crate::core::comment_form::Field;
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, MainContent};
use crate::tui::component::EventHandler;
use crate::tui::components::UserSelectorState;
use crate::tui::components::posts_list;
use crate::tui::components::user_selector::UserSelectorEvent;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which part of the screen receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Users,
    Posts,
    Comments,
    Name,
    Email,
    Body,
}

impl Focus {
    /// The comment form field this focus edits, if any.
    pub fn field(self) -> Option<Field> {
        match self {
            Focus::Name => Some(Field::Name),
            Focus::Email => Some(Field::Email),
            Focus::Body => Some(Field::Body),
            _ => None,
        }
    }

    fn of_field(field: Field) -> Self {
        match field {
            Field::Name => Focus::Name,
            Field::Email => Focus::Email,
            Field::Body => Focus::Body,
        }
    }

    fn needs_details(self) -> bool {
        matches!(self, Focus::Comments | Focus::Name | Focus::Email | Focus::Body)
    }

    /// Tab order over the panes currently on screen.
    fn order(has_posts: bool, has_details: bool) -> Vec<Focus> {
        let mut order = vec![Focus::Users];
        if has_posts {
            order.push(Focus::Posts);
        }
        if has_details {
            order.extend([Focus::Comments, Focus::Name, Focus::Email, Focus::Body]);
        }
        order
    }

    pub fn cycle(self, has_posts: bool, has_details: bool, backwards: bool) -> Focus {
        let order = Self::order(has_posts, has_details);
        let len = order.len();
        let current = order.iter().position(|f| *f == self).unwrap_or(0);
        let next = if backwards {
            (current + len - 1) % len
        } else {
            (current + 1) % len
        };
        order[next]
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub api_url: String,
    pub focus: Focus,
    pub user_selector: UserSelectorState,
    pub posts_table: TableState,
    pub comment_cursor: usize,
    /// Scroll the details panel to the comment cursor on the next draw.
    pub follow_comment: bool,
    pub details_scroll: ScrollViewState,
    // Areas from the last draw, for mouse hit testing
    pub posts_area: Rect,
    pub form_areas: [Rect; 3],
    pub form_buttons: [Rect; 2],
    shown_post: Option<PostId>,
}

impl TuiState {
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            focus: Focus::Users,
            user_selector: UserSelectorState::new(),
            posts_table: TableState::default(),
            comment_cursor: 0,
            follow_comment: false,
            details_scroll: ScrollViewState::default(),
            posts_area: Rect::default(),
            form_areas: [Rect::default(); 3],
            form_buttons: [Rect::default(); 2],
            shown_post: None,
        }
    }

    /// Bring cursors and focus back in line with `app` after state changes.
    pub fn sync(&mut self, app: &App) {
        self.user_selector.user_count = app.users.len();
        self.user_selector.selected_index = app
            .selected_user
            .as_ref()
            .and_then(|sel| app.users.iter().position(|u| u.id == sel.id));

        let post_count = match app.main_content() {
            MainContent::Posts => app.posts.as_ref().map_or(0, Vec::len),
            _ => 0,
        };
        if post_count == 0 {
            self.posts_table.select(None);
        } else {
            let row = self.posts_table.selected().unwrap_or(0).min(post_count - 1);
            self.posts_table.select(Some(row));
        }

        let shown = app.details.as_ref().map(|d| d.post_id);
        if shown != self.shown_post {
            self.shown_post = shown;
            self.comment_cursor = 0;
            self.details_scroll = ScrollViewState::default();
        }
        let comment_count = app.details.as_ref().map_or(0, |d| d.comments.len());
        self.comment_cursor = self.comment_cursor.min(comment_count.saturating_sub(1));

        if self.focus.needs_details() && shown.is_none() {
            self.focus = Focus::Posts;
        }
        if self.focus == Focus::Posts && post_count == 0 {
            self.focus = Focus::Users;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// The action, if any, that closes the open post.
fn close_post(app: &App) -> Option<Action> {
    app.selected_post.clone().map(Action::SelectPost)
}

/// Translate one terminal event into at most one core action, updating
/// presentation state (focus, cursors, form text) along the way.
pub fn handle_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    let has_posts = app.main_content() == MainContent::Posts;
    let has_details = app.details.is_some();

    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        TuiEvent::MouseClick(col, row) => return handle_click(app, tui, *col, *row),
        TuiEvent::ScrollUp => {
            tui.details_scroll.scroll_up();
            return None;
        }
        TuiEvent::ScrollDown => {
            tui.details_scroll.scroll_down();
            return None;
        }
        TuiEvent::ClearForm => {
            if let Some(form) = app.comment_form_mut() {
                form.clear();
            }
            return None;
        }
        TuiEvent::Tab | TuiEvent::BackTab => {
            tui.user_selector.close();
            let backwards = matches!(event, TuiEvent::BackTab);
            tui.focus = tui.focus.cycle(has_posts, has_details, backwards);
            return None;
        }
        _ => {}
    }

    if let Some(field) = tui.focus.field() {
        return handle_form_key(app, tui, field, event);
    }

    match tui.focus {
        Focus::Users => {
            if matches!(event, TuiEvent::InputChar('q')) && !tui.user_selector.is_open {
                return Some(Action::Quit);
            }
            match tui.user_selector.handle_event(event)? {
                UserSelectorEvent::Select(i) => {
                    app.users.get(i).cloned().map(|u| Action::SelectUser(Some(u)))
                }
                UserSelectorEvent::Clear => Some(Action::SelectUser(None)),
            }
        }
        Focus::Posts => {
            let posts = app.posts.as_deref().unwrap_or_default();
            match event {
                TuiEvent::InputChar('q') => Some(Action::Quit),
                TuiEvent::CursorUp => {
                    tui.posts_table.select_previous();
                    None
                }
                TuiEvent::CursorDown => {
                    let row = tui.posts_table.selected().map_or(0, |r| r + 1);
                    tui.posts_table
                        .select(Some(row.min(posts.len().saturating_sub(1))));
                    None
                }
                TuiEvent::Submit | TuiEvent::InputChar(' ') => tui
                    .posts_table
                    .selected()
                    .and_then(|row| posts.get(row))
                    .cloned()
                    .map(Action::SelectPost),
                TuiEvent::Escape => close_post(app),
                _ => None,
            }
        }
        Focus::Comments => {
            let comments = app.details.as_ref().map(|d| d.comments.as_slice()).unwrap_or_default();
            match event {
                TuiEvent::InputChar('q') => Some(Action::Quit),
                TuiEvent::CursorUp => {
                    tui.comment_cursor = tui.comment_cursor.saturating_sub(1);
                    tui.follow_comment = true;
                    None
                }
                TuiEvent::CursorDown => {
                    tui.comment_cursor =
                        (tui.comment_cursor + 1).min(comments.len().saturating_sub(1));
                    tui.follow_comment = true;
                    None
                }
                TuiEvent::InputChar('d') | TuiEvent::Backspace => comments
                    .get(tui.comment_cursor)
                    .map(|c| Action::DeleteComment(c.id)),
                TuiEvent::Escape => close_post(app),
                _ => None,
            }
        }
        // Form fields handled above
        Focus::Name | Focus::Email | Focus::Body => None,
    }
}

fn handle_form_key(
    app: &mut App,
    tui: &mut TuiState,
    field: Field,
    event: &TuiEvent,
) -> Option<Action> {
    match event {
        TuiEvent::Submit => return Some(Action::SubmitComment),
        TuiEvent::Escape => {
            tui.focus = Focus::Comments;
            return None;
        }
        TuiEvent::CursorUp => {
            tui.focus = tui.focus.cycle(true, true, true);
            return None;
        }
        TuiEvent::CursorDown => {
            if field != Field::Body {
                tui.focus = tui.focus.cycle(true, true, false);
            }
            return None;
        }
        _ => {}
    }
    let form = app.comment_form_mut()?;
    match event {
        TuiEvent::InputChar(c) => form.push_char(field, *c),
        TuiEvent::Backspace => form.pop_char(field),
        _ => {}
    }
    None
}

fn handle_click(app: &mut App, tui: &mut TuiState, col: u16, row: u16) -> Option<Action> {
    // The selector sees every click first so an open menu can dismiss itself
    let on_selector = tui.user_selector.hit(col, row);
    let picked = tui.user_selector.handle_event(&TuiEvent::MouseClick(col, row));
    if on_selector {
        tui.focus = Focus::Users;
        return match picked? {
            UserSelectorEvent::Select(i) => {
                app.users.get(i).cloned().map(|u| Action::SelectUser(Some(u)))
            }
            UserSelectorEvent::Clear => Some(Action::SelectUser(None)),
        };
    }

    let pos = Position::new(col, row);
    if tui.posts_area.contains(pos) {
        tui.focus = Focus::Posts;
        let index = posts_list::row_at(tui.posts_area, tui.posts_table.offset(), row)?;
        let post = app.posts.as_ref()?.get(index)?.clone();
        tui.posts_table.select(Some(index));
        return Some(Action::SelectPost(post));
    }

    if let Some(i) = tui.form_areas.iter().position(|a| a.contains(pos)) {
        tui.focus = Focus::of_field(components::comment_form::FIELDS[i]);
    }

    let [add, clear] = tui.form_buttons;
    if add.contains(pos) {
        return Some(Action::SubmitComment);
    }
    if clear.contains(pos)
        && let Some(form) = app.comment_form_mut()
    {
        form.clear();
    }
    None
}

/// Apply `action` and start whatever request it asks for. Returns true on quit.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::None => false,
        effect => {
            tasks::spawn_effect(effect, app.api.clone(), tx.clone());
            false
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn BoardApi> = match ApiClient::new(config.api_url.clone(), config.timeout) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            warn!("Failed to build HTTP client: {}", e);
            return Err(std::io::Error::other(e));
        }
    };
    let mut app = App::new(api);
    let mut tui = TuiState::new(config.api_url);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    dispatch(&mut app, Action::Init, &tx);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.sync(&app);

        let animating = app.is_loading()
            || app
                .details
                .as_ref()
                .is_some_and(|d| d.loading || d.form.submitting);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = handle_event(&mut app, &mut tui, &event)
                && dispatch(&mut app, action, &tx)
            {
                break 'main;
            }
            tui.sync(&app);
        }

        // Completions from background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &tx) {
                break 'main;
            }
        }
    }

    info!("Postboard shutting down");
    ratatui::restore();
    Ok(())
}
