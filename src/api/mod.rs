//! # Board API
//!
//! HTTP access to the users/posts/comments backend. Requests are plain
//! request/response pairs: no retry, no caching.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, BoardApi};
pub use error::NetworkError;
pub use types::{Comment, CommentDraft, CommentId, Post, PostId, User, UserId};
