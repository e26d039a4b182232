// Comment endpoints
//
// Listing, post scoping (default and newest-first server orderings),
// creation, edits, deletion, and like toggles.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};

impl ApiClient {
    /// List all comments.
    ///
    /// `GET /api/comments`
    pub async fn list_comments(&self) -> Result<Vec<CommentResponse>, Error> {
        self.get("api/comments").await
    }

    /// Get a single comment by id.
    ///
    /// `GET /api/comments/{id}`
    pub async fn comment(&self, id: i64) -> Result<CommentResponse, Error> {
        self.get(&format!("api/comments/{id}")).await
    }

    /// List a post's comments in the backend's default order.
    ///
    /// `GET /api/comments/post/{postId}`
    pub async fn comments_by_post(&self, post_id: i64) -> Result<Vec<CommentResponse>, Error> {
        self.get(&format!("api/comments/post/{post_id}")).await
    }

    /// List a post's comments, newest first (server-ordered).
    ///
    /// `GET /api/comments/post/{postId}/recent`
    pub async fn recent_comments_by_post(
        &self,
        post_id: i64,
    ) -> Result<Vec<CommentResponse>, Error> {
        self.get(&format!("api/comments/post/{post_id}/recent"))
            .await
    }

    /// Add a comment to a post.
    ///
    /// `POST /api/comments`
    pub async fn create_comment(
        &self,
        comment: &CreateCommentRequest,
    ) -> Result<CommentResponse, Error> {
        self.post("api/comments", comment).await
    }

    /// Edit a comment's content.
    ///
    /// `PUT /api/comments/{id}`
    pub async fn update_comment(
        &self,
        id: i64,
        patch: &UpdateCommentRequest,
    ) -> Result<CommentResponse, Error> {
        self.put(&format!("api/comments/{id}"), patch).await
    }

    /// Delete a comment.
    ///
    /// `DELETE /api/comments/{id}`
    pub async fn delete_comment(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("api/comments/{id}")).await
    }

    /// Like a comment as the authenticated user.
    ///
    /// `POST /api/comments/{id}/like`
    pub async fn like_comment(&self, id: i64) -> Result<CommentResponse, Error> {
        self.post_empty(&format!("api/comments/{id}/like")).await
    }

    /// Remove the authenticated user's like from a comment.
    ///
    /// `POST /api/comments/{id}/unlike`
    pub async fn unlike_comment(&self, id: i64) -> Result<CommentResponse, Error> {
        self.post_empty(&format!("api/comments/{id}/unlike")).await
    }
}
