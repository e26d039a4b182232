// ── Comment store ──
//
// Cached comment listing plus creation, editing, deletion, and
// like/unlike toggles. Post-scoped reads pass through in server
// order; the cache covers the flat listing that moderation-style
// views consume.

use std::sync::Arc;

use fourpaws_api::ApiClient;
use fourpaws_api::types::UpdateCommentRequest;
use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Comment, CommentId, NewComment, PostId};
use crate::store::cache::EntityCache;
use crate::store::require_session;
use crate::stream::{Snapshot, Subscription};

pub struct CommentStore {
    client: Arc<ApiClient>,
    cache: EntityCache<Comment>,
}

impl CommentStore {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cache: EntityCache::new(),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// All comments, cached between invalidations.
    pub async fn comments(&self) -> Result<Snapshot<Comment>, CoreError> {
        self.cache.read_through(|| self.fetch_all()).await
    }

    /// Drop the cached listing and fetch a fresh one.
    pub async fn refresh(&self) -> Result<Snapshot<Comment>, CoreError> {
        self.cache.refresh(|| self.fetch_all()).await
    }

    /// Cached lookup by id.
    pub fn cached(&self, id: CommentId) -> Option<Arc<Comment>> {
        self.cache.get(id.get())
    }

    /// Fetch one comment from the backend, bypassing the cache.
    pub async fn comment(&self, id: CommentId) -> Result<Comment, CoreError> {
        let comment = self.client.comment(id.get()).await?;
        Ok(comment.into())
    }

    /// A post's comments, in server order.
    pub async fn by_post(&self, post: PostId) -> Result<Vec<Comment>, CoreError> {
        let comments = self.client.comments_by_post(post.get()).await?;
        Ok(comments.into_iter().map(Comment::from).collect())
    }

    /// A post's comments, newest first (server-ordered).
    pub async fn recent_by_post(&self, post: PostId) -> Result<Vec<Comment>, CoreError> {
        let comments = self.client.recent_comments_by_post(post.get()).await?;
        Ok(comments.into_iter().map(Comment::from).collect())
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Add a comment to a post.
    pub async fn create(&self, comment: NewComment) -> Result<Comment, CoreError> {
        require_session(&self.client)?;

        let request = comment.into_request();
        let created: Comment = self.client.create_comment(&request).await?.into();
        debug!("created comment {}", created.id);

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(created)
    }

    /// Replace a comment's text.
    pub async fn update(&self, id: CommentId, content: String) -> Result<Comment, CoreError> {
        require_session(&self.client)?;

        let patch = UpdateCommentRequest { content };
        let updated: Comment = self.client.update_comment(id.get(), &patch).await?.into();

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(updated)
    }

    /// Delete a comment.
    pub async fn remove(&self, id: CommentId) -> Result<(), CoreError> {
        require_session(&self.client)?;
        self.client.delete_comment(id.get()).await?;

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(())
    }

    /// Like a comment as the logged-in user.
    pub async fn like(&self, id: CommentId) -> Result<Comment, CoreError> {
        require_session(&self.client)?;
        let comment: Comment = self.client.like_comment(id.get()).await?.into();

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(comment)
    }

    /// Withdraw a like.
    pub async fn unlike(&self, id: CommentId) -> Result<Comment, CoreError> {
        require_session(&self.client)?;
        let comment: Comment = self.client.unlike_comment(id.get()).await?.into();

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(comment)
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Subscribe to listing changes.
    pub fn subscribe(&self) -> Subscription<Comment> {
        self.cache.subscribe()
    }

    /// True while a listing fetch is in flight.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.cache.loading()
    }

    /// The most recent listing-fetch failure, if any.
    pub fn last_error(&self) -> watch::Receiver<Option<String>> {
        self.cache.last_error()
    }

    async fn fetch_all(&self) -> Result<Vec<Comment>, CoreError> {
        let comments = self.client.list_comments().await?;
        Ok(comments.into_iter().map(Comment::from).collect())
    }
}
