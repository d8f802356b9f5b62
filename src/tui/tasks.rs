//! Background execution of effects.
//!
//! Each request effect runs on its own tokio task and sends exactly one
//! completion `Action` back to the event loop. The loop applies it with
//! `update()`, which drops it if it has been superseded.

use std::sync::{Arc, mpsc};

use log::{debug, info, warn};

use crate::api::BoardApi;
use crate::core::action::{Action, Effect};

/// Runs one effect to completion. Returns `None` for effects that are not
/// requests.
pub async fn perform(api: &dyn BoardApi, effect: Effect) -> Option<Action> {
    let action = match effect {
        Effect::None | Effect::Quit => return None,
        Effect::LoadUsers => Action::UsersLoaded(api.list_users().await),
        Effect::LoadPosts { request, user_id } => Action::PostsLoaded {
            request,
            user_id,
            result: api.list_posts(user_id).await,
        },
        Effect::LoadComments { request, post_id } => Action::CommentsLoaded {
            request,
            post_id,
            result: api.list_comments(post_id).await,
        },
        Effect::AddComment { draft } => Action::CommentAdded {
            post_id: draft.post_id,
            result: api.add_comment(&draft).await,
        },
        Effect::DeleteComment {
            post_id,
            comment_id,
        } => Action::CommentDeleted {
            post_id,
            comment_id,
            result: api.delete_comment(comment_id).await,
        },
    };
    Some(action)
}

/// Spawns `effect` on a background task that reports back over `tx`.
pub fn spawn_effect(effect: Effect, api: Arc<dyn BoardApi>, tx: mpsc::Sender<Action>) {
    if matches!(effect, Effect::None | Effect::Quit) {
        return;
    }
    info!("Spawning request: {:?}", effect);
    tokio::spawn(async move {
        let Some(action) = perform(api.as_ref(), effect).await else {
            return;
        };
        debug!("Request finished: {:?}", action);
        if tx.send(action).is_err() {
            warn!("Failed to send request result: receiver dropped");
        }
    });
}
