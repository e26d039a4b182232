// ── Platform abstraction ──
//
// The entry point consumers hold. Wires the HTTP client, the auth
// session, and the four entity stores together with one defined
// lifecycle: build, start, use, shut down. Nothing here is ambient or
// global; every consumer gets its state by reference from a Platform
// it was handed.

use std::sync::Arc;

use fourpaws_api::{ApiClient, ApiConfig};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::PlatformConfig;
use crate::detail::{self, CommunityDetail, PostOrdering};
use crate::error::CoreError;
use crate::model::CommunityId;
use crate::session::{CredentialStore, MemoryCredentialStore, Session, SessionState};
use crate::store::{AnimalStore, CommentStore, CommunityStore, PostStore};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<PlatformInner>`. Owns the HTTP client,
/// the session, and the entity stores, and runs the forwarder that
/// tears the session down when the client sees an expired token.
#[derive(Clone)]
pub struct Platform {
    inner: Arc<PlatformInner>,
}

struct PlatformInner {
    config: PlatformConfig,
    client: Arc<ApiClient>,
    session: Session,
    animals: AnimalStore,
    communities: CommunityStore,
    posts: PostStore,
    comments: CommentStore,
    cancel: CancellationToken,
    expiry_task: Mutex<Option<JoinHandle<()>>>,
}

impl Platform {
    /// Build a platform with in-memory credential storage. Sessions
    /// then last at most as long as the process.
    pub fn new(config: PlatformConfig) -> Result<Self, CoreError> {
        Self::with_credentials(config, Arc::new(MemoryCredentialStore::default()))
    }

    /// Build a platform with caller-supplied credential storage.
    pub fn with_credentials(
        config: PlatformConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, CoreError> {
        let api_config = ApiConfig::new(config.base_url.clone()).with_timeout(config.timeout);
        let client = Arc::new(ApiClient::new(&api_config)?);
        let session = Session::new(Arc::clone(&client), credentials);

        Ok(Self {
            inner: Arc::new(PlatformInner {
                animals: AnimalStore::new(Arc::clone(&client)),
                communities: CommunityStore::new(Arc::clone(&client)),
                posts: PostStore::new(Arc::clone(&client)),
                comments: CommentStore::new(Arc::clone(&client)),
                session,
                client,
                config,
                cancel: CancellationToken::new(),
                expiry_task: Mutex::new(None),
            }),
        })
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Start the expiry forwarder and restore any persisted session,
    /// returning the state the session settled in. Safe to call more
    /// than once; later calls return the current state.
    pub async fn start(&self) -> SessionState {
        self.spawn_expiry_forwarder().await;
        self.inner.session.initialize().await
    }

    /// Stop background work. Stores and session stay readable; only
    /// the expiry forwarder goes away.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        if let Some(task) = self.inner.expiry_task.lock().await.take() {
            let _ = task.await;
        }
        debug!("platform shut down");
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &PlatformConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn animals(&self) -> &AnimalStore {
        &self.inner.animals
    }

    pub fn communities(&self) -> &CommunityStore {
        &self.inner.communities
    }

    pub fn posts(&self) -> &PostStore {
        &self.inner.posts
    }

    pub fn comments(&self) -> &CommentStore {
        &self.inner.comments
    }

    // ── Composite views ──────────────────────────────────────────────

    /// Load the community-detail composite (community record plus its
    /// posts) with the platform's bounded retry policy. `cancel`
    /// belongs to the consuming view; cancelling it stops further
    /// attempts and discards results that arrive late.
    pub async fn community_detail(
        &self,
        id: CommunityId,
        ordering: PostOrdering,
        cancel: &CancellationToken,
    ) -> Result<CommunityDetail, CoreError> {
        detail::load_community_detail(
            &self.inner.communities,
            &self.inner.posts,
            id,
            ordering,
            self.inner.config.retry,
            cancel,
        )
        .await
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn spawn_expiry_forwarder(&self) {
        let mut task = self.inner.expiry_task.lock().await;
        if task.is_some() {
            return;
        }
        let platform = self.clone();
        let cancel = self.inner.cancel.clone();
        *task = Some(tokio::spawn(session_expiry_task(platform, cancel)));
    }
}

/// Forward token-expiry events from the client to the session. The
/// client broadcasts at most one event per installed token, so the
/// session teardown runs once per expiry.
async fn session_expiry_task(platform: Platform, cancel: CancellationToken) {
    let mut expiries = platform.inner.client.session_expiry();
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            changed = expiries.changed() => {
                if changed.is_err() {
                    break;
                }
                expiries.borrow_and_update();
                platform.inner.session.handle_expiry();
            }
        }
    }
    debug!("session expiry forwarder stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn local_config() -> PlatformConfig {
        PlatformConfig::new("http://127.0.0.1:9".parse().unwrap())
    }

    #[tokio::test]
    async fn starts_anonymous_without_persisted_credentials() {
        let platform = Platform::new(local_config()).unwrap();
        // No stored session, so no network call is needed to settle.
        assert_eq!(platform.start().await, SessionState::Anonymous);
        assert!(!platform.session().is_authenticated());
        platform.shutdown().await;
    }

    #[tokio::test]
    async fn start_is_idempotent() {
        let platform = Platform::new(local_config()).unwrap();
        assert_eq!(platform.start().await, SessionState::Anonymous);
        assert_eq!(platform.start().await, SessionState::Anonymous);
        platform.shutdown().await;
    }

    #[tokio::test]
    async fn stores_are_reachable_and_empty_before_any_fetch() {
        let platform = Platform::new(local_config()).unwrap();
        assert!(platform.animals().subscribe().current().is_empty());
        assert!(platform.communities().subscribe().current().is_empty());
        assert!(platform.posts().subscribe().current().is_empty());
        assert!(platform.comments().subscribe().current().is_empty());
    }
}
