//! # Application State
//!
//! Everything the client knows, in one place. No TUI types live here;
//! presentation-only state (focus, cursors, dropdown open flag) belongs to
//! the `tui` module.
//!
//! ```text
//! App
//! ├── api: Arc<dyn BoardApi>          // backend
//! ├── users: Vec<User>                // loaded once at startup
//! ├── selected_user: Option<User>
//! ├── posts: Option<Vec<Post>>        // None = not loaded for this user
//! ├── selected_post: Option<Post>
//! ├── details: Option<PostDetails>    // comments + form for selected_post
//! ├── loading_users / loading_posts   // combined by is_loading()
//! ├── load_failed: bool               // last users/posts load failed
//! └── pending_posts: Option<RequestId> // tag of the posts load we still want
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::{BoardApi, Comment, Post, PostId, User};
use crate::core::comment_form::CommentForm;

/// Tag attached to a load when it is issued.
///
/// A completion is applied only if its tag is still the pending one; any
/// other tag belongs to a superseded selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

/// What the main panel shows, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainContent {
    Loading,
    Error,
    NoUserSelected,
    NoPosts,
    Posts,
}

/// Comments and the comment form for the selected post.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDetails {
    pub post_id: PostId,
    pub comments: Vec<Comment>,
    pub loading: bool,
    pub load_failed: bool,
    pub form: CommentForm,
    pub(crate) pending_comments: Option<RequestId>,
    /// Comments removed optimistically, with their former index, until the
    /// delete settles.
    pub(crate) removed: Vec<(usize, Comment)>,
}

impl PostDetails {
    pub fn new(post_id: PostId, request: RequestId) -> Self {
        Self {
            post_id,
            comments: Vec::new(),
            loading: true,
            load_failed: false,
            form: CommentForm::new(),
            pending_comments: Some(request),
            removed: Vec::new(),
        }
    }
}

pub struct App {
    pub api: Arc<dyn BoardApi>,
    pub users: Vec<User>,
    pub selected_user: Option<User>,
    pub posts: Option<Vec<Post>>,
    pub selected_post: Option<Post>,
    pub details: Option<PostDetails>,
    pub loading_users: bool,
    pub loading_posts: bool,
    pub load_failed: bool,
    pub status_message: String,
    pub(crate) pending_posts: Option<RequestId>,
    next_request: u64,
}

impl App {
    pub fn new(api: Arc<dyn BoardApi>) -> Self {
        Self {
            api,
            users: Vec::new(),
            selected_user: None,
            posts: None,
            selected_post: None,
            details: None,
            loading_users: false,
            loading_posts: false,
            load_failed: false,
            status_message: String::new(),
            pending_posts: None,
            next_request: 0,
        }
    }

    /// True while either the users or the posts load is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading_users || self.loading_posts
    }

    pub fn main_content(&self) -> MainContent {
        if self.is_loading() {
            MainContent::Loading
        } else if self.load_failed {
            MainContent::Error
        } else if self.selected_user.is_none() {
            MainContent::NoUserSelected
        } else {
            match &self.posts {
                Some(posts) if !posts.is_empty() => MainContent::Posts,
                _ => MainContent::NoPosts,
            }
        }
    }

    pub fn selected_post_id(&self) -> Option<PostId> {
        self.selected_post.as_ref().map(|p| p.id)
    }

    pub fn comment_form_mut(&mut self) -> Option<&mut CommentForm> {
        self.details.as_mut().map(|d| &mut d.form)
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }
}
