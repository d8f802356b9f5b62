//! # Actions
//!
//! Everything that can happen in Postboard becomes an `Action`.
//! User picks an author? That's `Action::SelectUser(Some(user))`.
//! Backend answers? That's `Action::PostsLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any request to issue. No I/O
//! here; the TUI runs effects on background tasks and feeds the results back
//! as actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Loads are tagged with a `RequestId` when issued. A completion whose tag is
//! no longer pending belongs to a superseded selection and is dropped, so a
//! slow response for an earlier user can never overwrite a newer one.

use log::{debug, info, warn};

use crate::api::{Comment, CommentDraft, CommentId, NetworkError, Post, PostId, User, UserId};
use crate::core::state::{App, PostDetails, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Application mounted.
    Init,
    UsersLoaded(Result<Vec<User>, NetworkError>),
    /// Selection changed, `None` meaning "no user".
    SelectUser(Option<User>),
    PostsLoaded {
        request: RequestId,
        user_id: UserId,
        result: Result<Vec<Post>, NetworkError>,
    },
    /// Open/close action on a post. Toggles.
    SelectPost(Post),
    CommentsLoaded {
        request: RequestId,
        post_id: PostId,
        result: Result<Vec<Comment>, NetworkError>,
    },
    SubmitComment,
    CommentAdded {
        post_id: PostId,
        result: Result<Comment, NetworkError>,
    },
    DeleteComment(CommentId),
    CommentDeleted {
        post_id: PostId,
        comment_id: CommentId,
        result: Result<(), NetworkError>,
    },
    Quit,
}

/// Side effects requested by `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    LoadUsers,
    LoadPosts { request: RequestId, user_id: UserId },
    LoadComments { request: RequestId, post_id: PostId },
    AddComment { draft: CommentDraft },
    DeleteComment { post_id: PostId, comment_id: CommentId },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Init => {
            app.loading_users = true;
            app.load_failed = false;
            app.status_message = "Loading users...".to_string();
            Effect::LoadUsers
        }

        Action::UsersLoaded(result) => {
            app.loading_users = false;
            match result {
                Ok(users) => {
                    info!("Loaded {} users", users.len());
                    app.status_message = format!("{} users", users.len());
                    app.users = users;
                }
                Err(e) => {
                    warn!("Failed to load users: {}", e);
                    app.users.clear();
                    app.load_failed = true;
                    app.status_message = "Failed to load users".to_string();
                }
            }
            Effect::None
        }

        Action::SelectUser(user) => {
            if let Some(user) = &user
                && app.selected_user.as_ref().map(|u| u.id) == Some(user.id)
            {
                debug!("User {} already selected", user.id);
                return Effect::None;
            }
            app.posts = None;
            app.selected_post = None;
            app.details = None;

            let Some(user) = user else {
                debug!("User selection cleared");
                app.selected_user = None;
                app.pending_posts = None;
                app.loading_posts = false;
                return Effect::None;
            };

            let request = app.next_request_id();
            info!("Selected user {} ({}), loading posts as {:?}", user.id, user.name, request);
            let user_id = user.id;
            app.selected_user = Some(user);
            app.pending_posts = Some(request);
            app.loading_posts = true;
            app.load_failed = false;
            Effect::LoadPosts { request, user_id }
        }

        Action::PostsLoaded {
            request,
            user_id,
            result,
        } => {
            if app.pending_posts != Some(request) {
                debug!(
                    "Discarding stale posts for user {} ({:?}, pending {:?})",
                    user_id, request, app.pending_posts
                );
                return Effect::None;
            }
            app.pending_posts = None;
            app.loading_posts = false;
            match result {
                Ok(posts) => {
                    info!("Loaded {} posts for user {}", posts.len(), user_id);
                    app.posts = Some(posts);
                }
                Err(e) => {
                    warn!("Failed to load posts for user {}: {}", user_id, e);
                    app.posts = Some(Vec::new());
                    app.load_failed = true;
                }
            }
            Effect::None
        }

        Action::SelectPost(post) => {
            if app.selected_post_id() == Some(post.id) {
                debug!("Closing post {}", post.id);
                app.selected_post = None;
                app.details = None;
                return Effect::None;
            }

            let request = app.next_request_id();
            let post_id = post.id;
            debug!("Opening post {}, loading comments as {:?}", post_id, request);
            app.selected_post = Some(post);
            app.details = Some(PostDetails::new(post_id, request));
            Effect::LoadComments { request, post_id }
        }

        Action::CommentsLoaded {
            request,
            post_id,
            result,
        } => {
            let Some(details) = app
                .details
                .as_mut()
                .filter(|d| d.pending_comments == Some(request))
            else {
                debug!("Discarding stale comments for post {} ({:?})", post_id, request);
                return Effect::None;
            };
            details.pending_comments = None;
            details.loading = false;
            match result {
                Ok(comments) => {
                    debug!("Loaded {} comments for post {}", comments.len(), post_id);
                    // Keep comments added before the thread arrived
                    let added: Vec<_> = details
                        .comments
                        .drain(..)
                        .filter(|c| !comments.iter().any(|l| l.id == c.id))
                        .collect();
                    details.comments = comments;
                    details.comments.extend(added);
                }
                Err(e) => {
                    warn!("Failed to load comments for post {}: {}", post_id, e);
                    details.comments.clear();
                    details.load_failed = true;
                }
            }
            Effect::None
        }

        Action::SubmitComment => {
            let Some(details) = app.details.as_mut() else {
                return Effect::None;
            };
            if details.form.submitting {
                return Effect::None;
            }
            match details.form.validate(details.post_id) {
                Some(draft) => {
                    info!("Submitting comment on post {}", draft.post_id);
                    details.form.submitting = true;
                    Effect::AddComment { draft }
                }
                None => {
                    debug!("Comment form rejected");
                    Effect::None
                }
            }
        }

        Action::CommentAdded { post_id, result } => {
            let Some(details) = app.details.as_mut().filter(|d| d.post_id == post_id) else {
                debug!("Dropping comment result for closed post {}", post_id);
                return Effect::None;
            };
            match result {
                Ok(comment) => {
                    debug!("Comment {} added to post {}", comment.id, post_id);
                    details.comments.push(comment);
                    details.form.accept();
                }
                Err(e) => {
                    // Submission failures are not surfaced to the user.
                    warn!("Failed to add comment to post {}: {}", post_id, e);
                    details.form.submitting = false;
                }
            }
            Effect::None
        }

        Action::DeleteComment(comment_id) => {
            let Some(details) = app.details.as_mut() else {
                return Effect::None;
            };
            let Some(index) = details.comments.iter().position(|c| c.id == comment_id) else {
                return Effect::None;
            };
            let comment = details.comments.remove(index);
            details.removed.push((index, comment));
            Effect::DeleteComment {
                post_id: details.post_id,
                comment_id,
            }
        }

        Action::CommentDeleted {
            post_id,
            comment_id,
            result,
        } => {
            let Some(details) = app.details.as_mut().filter(|d| d.post_id == post_id) else {
                return Effect::None;
            };
            let Some(slot) = details.removed.iter().position(|(_, c)| c.id == comment_id) else {
                return Effect::None;
            };
            let (index, comment) = details.removed.remove(slot);
            if let Err(e) = result {
                warn!("Failed to delete comment {}: {}, restoring", comment_id, e);
                let index = index.min(details.comments.len());
                details.comments.insert(index, comment);
            }
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}
