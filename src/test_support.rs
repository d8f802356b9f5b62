//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{
    BoardApi, Comment, CommentDraft, CommentId, NetworkError, Post, PostId, User, UserId,
};

/// A backend with no data for tests that don't need real API calls.
pub struct NoopApi;

#[async_trait]
impl BoardApi for NoopApi {
    async fn list_users(&self) -> Result<Vec<User>, NetworkError> {
        Ok(Vec::new())
    }

    async fn list_posts(&self, _user_id: UserId) -> Result<Vec<Post>, NetworkError> {
        Ok(Vec::new())
    }

    async fn list_comments(&self, _post_id: PostId) -> Result<Vec<Comment>, NetworkError> {
        Ok(Vec::new())
    }

    async fn add_comment(&self, draft: &CommentDraft) -> Result<Comment, NetworkError> {
        Ok(Comment {
            id: 1,
            post_id: draft.post_id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            body: draft.body.clone(),
        })
    }

    async fn delete_comment(&self, _comment_id: CommentId) -> Result<(), NetworkError> {
        Ok(())
    }
}

/// Creates a test App backed by `NoopApi`.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopApi))
}

pub fn user(id: UserId, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        username: name.to_lowercase(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: String::new(),
    }
}

pub fn post(id: PostId, user_id: UserId, title: &str) -> Post {
    Post {
        id,
        user_id,
        title: title.to_string(),
        body: format!("{title} body"),
    }
}

pub fn comment(id: CommentId, post_id: PostId, body: &str) -> Comment {
    Comment {
        id,
        post_id,
        name: "Commenter".to_string(),
        email: "commenter@example.com".to_string(),
        body: body.to_string(),
    }
}
