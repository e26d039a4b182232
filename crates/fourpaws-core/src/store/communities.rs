// ── Community store ──
//
// Cached community listing plus creation, editing, deletion, and
// follow/unfollow membership toggles. Follow counts are derived
// server-side, so membership changes also go through
// invalidate-and-refetch rather than local patching.

use std::sync::Arc;

use fourpaws_api::ApiClient;
use fourpaws_api::types::UpdateCommunityRequest;
use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Community, CommunityChanges, CommunityId, NewCommunity};
use crate::store::cache::EntityCache;
use crate::store::require_session;
use crate::stream::{Snapshot, Subscription};

pub struct CommunityStore {
    client: Arc<ApiClient>,
    cache: EntityCache<Community>,
}

impl CommunityStore {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cache: EntityCache::new(),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The community listing, cached between invalidations.
    pub async fn communities(&self) -> Result<Snapshot<Community>, CoreError> {
        self.cache.read_through(|| self.fetch_all()).await
    }

    /// Drop the cached listing and fetch a fresh one.
    pub async fn refresh(&self) -> Result<Snapshot<Community>, CoreError> {
        self.cache.refresh(|| self.fetch_all()).await
    }

    /// Cached lookup by id.
    pub fn cached(&self, id: CommunityId) -> Option<Arc<Community>> {
        self.cache.get(id.get())
    }

    /// Fetch one community from the backend, bypassing the cache.
    pub async fn community(&self, id: CommunityId) -> Result<Community, CoreError> {
        let community = self.client.community(id.get()).await?;
        Ok(community.into())
    }

    /// Communities in one category, in server order.
    pub async fn by_category(&self, category: &str) -> Result<Vec<Community>, CoreError> {
        let communities = self.client.communities_by_category(category).await?;
        Ok(communities.into_iter().map(Community::from).collect())
    }

    /// Name search, in server order.
    pub async fn search(&self, name: &str) -> Result<Vec<Community>, CoreError> {
        let communities = self.client.search_communities(name).await?;
        Ok(communities.into_iter().map(Community::from).collect())
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Create a community, optionally with a banner image.
    pub async fn create(&self, community: NewCommunity) -> Result<Community, CoreError> {
        require_session(&self.client)?;

        let (request, image) = community.into_request();
        let created: Community = self.client.create_community(&request, image).await?.into();
        debug!("created community {}", created.id);

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(created)
    }

    /// Apply a partial edit.
    pub async fn update(
        &self,
        id: CommunityId,
        changes: CommunityChanges,
    ) -> Result<Community, CoreError> {
        require_session(&self.client)?;

        let patch = UpdateCommunityRequest::from(changes);
        let updated: Community = self.client.update_community(id.get(), &patch).await?.into();

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(updated)
    }

    /// Delete a community.
    pub async fn remove(&self, id: CommunityId) -> Result<(), CoreError> {
        require_session(&self.client)?;
        self.client.delete_community(id.get()).await?;

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(())
    }

    /// Join a community as the logged-in user.
    pub async fn follow(&self, id: CommunityId) -> Result<Community, CoreError> {
        require_session(&self.client)?;
        let community: Community = self.client.follow_community(id.get()).await?.into();

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(community)
    }

    /// Leave a community.
    pub async fn unfollow(&self, id: CommunityId) -> Result<Community, CoreError> {
        require_session(&self.client)?;
        let community: Community = self.client.unfollow_community(id.get()).await?.into();

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(community)
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Subscribe to listing changes.
    pub fn subscribe(&self) -> Subscription<Community> {
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

    async fn fetch_all(&self) -> Result<Vec<Community>, CoreError> {
        let communities = self.client.list_communities().await?;
        Ok(communities.into_iter().map(Community::from).collect())
    }
}
