// ── Post store ──
//
// Cached post listing plus creation, editing, deletion, and
// like/unlike toggles. Like counts are server-derived; toggles report
// the server's answer and refetch rather than guessing locally.
// Community-scoped reads pass through so the server's recent/popular
// ordering is preserved as delivered.

use std::sync::Arc;

use fourpaws_api::ApiClient;
use fourpaws_api::types::UpdatePostRequest;
use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{CommunityId, NewPost, Post, PostChanges, PostId};
use crate::store::cache::EntityCache;
use crate::store::require_session;
use crate::stream::{Snapshot, Subscription};

pub struct PostStore {
    client: Arc<ApiClient>,
    cache: EntityCache<Post>,
}

impl PostStore {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cache: EntityCache::new(),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The global post feed, cached between invalidations.
    pub async fn posts(&self) -> Result<Snapshot<Post>, CoreError> {
        self.cache.read_through(|| self.fetch_all()).await
    }

    /// Drop the cached feed and fetch a fresh one.
    pub async fn refresh(&self) -> Result<Snapshot<Post>, CoreError> {
        self.cache.refresh(|| self.fetch_all()).await
    }

    /// Cached lookup by id.
    pub fn cached(&self, id: PostId) -> Option<Arc<Post>> {
        self.cache.get(id.get())
    }

    /// Fetch one post from the backend, bypassing the cache.
    pub async fn post(&self, id: PostId) -> Result<Post, CoreError> {
        let post = self.client.post_by_id(id.get()).await?;
        Ok(post.into())
    }

    /// A community's posts, in server order.
    pub async fn by_community(&self, community: CommunityId) -> Result<Vec<Post>, CoreError> {
        let posts = self.client.posts_by_community(community.get()).await?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    /// A community's posts, newest first (server-ordered).
    pub async fn recent_by_community(
        &self,
        community: CommunityId,
    ) -> Result<Vec<Post>, CoreError> {
        let posts = self.client.recent_posts_by_community(community.get()).await?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    /// A community's posts, most liked first (server-ordered).
    pub async fn popular_by_community(
        &self,
        community: CommunityId,
    ) -> Result<Vec<Post>, CoreError> {
        let posts = self.client.popular_posts_by_community(community.get()).await?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Publish a post in a community, optionally with an image.
    pub async fn create(&self, post: NewPost) -> Result<Post, CoreError> {
        require_session(&self.client)?;

        let (request, image) = post.into_request();
        let created: Post = self.client.create_post(&request, image).await?.into();
        debug!("created post {}", created.id);

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(created)
    }

    /// Apply a partial edit.
    pub async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post, CoreError> {
        require_session(&self.client)?;

        let patch = UpdatePostRequest::from(changes);
        let updated: Post = self.client.update_post(id.get(), &patch).await?.into();

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(updated)
    }

    /// Delete a post.
    pub async fn remove(&self, id: PostId) -> Result<(), CoreError> {
        require_session(&self.client)?;
        self.client.delete_post(id.get()).await?;

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(())
    }

    /// Like a post as the logged-in user.
    pub async fn like(&self, id: PostId) -> Result<Post, CoreError> {
        require_session(&self.client)?;
        let post: Post = self.client.like_post(id.get()).await?.into();

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(post)
    }

    /// Withdraw a like.
    pub async fn unlike(&self, id: PostId) -> Result<Post, CoreError> {
        require_session(&self.client)?;
        let post: Post = self.client.unlike_post(id.get()).await?.into();

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(post)
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Subscribe to feed changes.
    pub fn subscribe(&self) -> Subscription<Post> {
        self.cache.subscribe()
    }

    /// True while a feed fetch is in flight.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.cache.loading()
    }

    /// The most recent feed-fetch failure, if any.
    pub fn last_error(&self) -> watch::Receiver<Option<String>> {
        self.cache.last_error()
    }

    async fn fetch_all(&self) -> Result<Vec<Post>, CoreError> {
        let posts = self.client.list_posts().await?;
        Ok(posts.into_iter().map(Post::from).collect())
    }
}
