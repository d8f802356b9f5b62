use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::error::NetworkError;
use super::types::{Comment, CommentDraft, CommentId, Post, PostId, User, UserId};

/// Everything the application needs from the backend.
///
/// `ApiClient` is the HTTP implementation; tests substitute their own.
#[async_trait]
pub trait BoardApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, NetworkError>;

    /// `user_id` must name a user returned by `list_users`.
    async fn list_posts(&self, user_id: UserId) -> Result<Vec<Post>, NetworkError>;

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, NetworkError>;

    async fn add_comment(&self, draft: &CommentDraft) -> Result<Comment, NetworkError>;

    async fn delete_comment(&self, comment_id: CommentId) -> Result<(), NetworkError>;
}

/// REST client for the board backend.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, NetworkError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        info!("API client ready: base_url={}, timeout={:?}", base_url, timeout);
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a non-success status into a `NetworkError`, otherwise decodes the body.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, NetworkError> {
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, NetworkError> {
        let status = response.status();
        debug!("Response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("API error: {} - {}", status, body);
        Err(NetworkError::status(status.as_u16(), body))
    }
}

#[async_trait]
impl BoardApi for ApiClient {
    async fn list_users(&self) -> Result<Vec<User>, NetworkError> {
        let response = self.client.get(self.url("/users")).send().await?;
        Self::decode(response).await
    }

    async fn list_posts(&self, user_id: UserId) -> Result<Vec<Post>, NetworkError> {
        let response = self
            .client
            .get(self.url("/posts"))
            .query(&[("userId", user_id)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, NetworkError> {
        let response = self
            .client
            .get(self.url("/comments"))
            .query(&[("postId", post_id)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn add_comment(&self, draft: &CommentDraft) -> Result<Comment, NetworkError> {
        let response = self
            .client
            .post(self.url("/comments"))
            .json(draft)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_comment(&self, comment_id: CommentId) -> Result<(), NetworkError> {
        let response = self
            .client
            .delete(self.url(&format!("/comments/{comment_id}")))
            .send()
            .await?;
        Self::check_status(response).await.map(|_| ())
    }
}
