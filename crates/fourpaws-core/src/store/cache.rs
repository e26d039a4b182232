// ── Staleness-tracked entity cache ──
//
// Wraps a `Collection` with the load discipline every store shares:
// serve cached data while fresh, refetch on demand when stale, and
// collapse concurrent refetches into a single network call. Writers
// never patch the cache in place; they mark it stale and a refetch
// rebuilds it from the server's response.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::store::collection::{Collection, Entity};
use crate::stream::{Snapshot, Subscription};

pub(crate) struct EntityCache<T: Entity> {
    collection: Collection<T>,

    /// Set when cached data may no longer reflect the server. A fresh
    /// cache starts stale so the first read triggers a fetch.
    stale: AtomicBool,

    /// Serializes refetches. Waiters re-check staleness after
    /// acquiring, so refetches requested while one is in flight
    /// coalesce into that flight's result.
    refresh_gate: Mutex<()>,

    /// True while a fetch is in flight.
    loading: watch::Sender<bool>,

    /// Message of the most recent failed fetch, cleared on success.
    last_error: watch::Sender<Option<String>>,
}

impl<T: Entity> EntityCache<T> {
    pub(crate) fn new() -> Self {
        let (loading, _) = watch::channel(false);
        let (last_error, _) = watch::channel(None);

        Self {
            collection: Collection::new(),
            stale: AtomicBool::new(true),
            refresh_gate: Mutex::new(()),
            loading,
            last_error,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Return the cached listing, fetching first if the cache is stale.
    ///
    /// Concurrent callers while a fetch is in flight wait for it and
    /// share its result instead of fetching again.
    pub(crate) async fn read_through<F, Fut>(&self, fetch: F) -> Result<Snapshot<T>, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, CoreError>>,
    {
        if !self.stale.load(Ordering::Acquire) {
            return Ok(self.collection.snapshot());
        }

        let _gate = self.refresh_gate.lock().await;
        // Re-check under the gate: the refetch we queued behind may
        // have satisfied this read already.
        if self.stale.load(Ordering::Acquire) {
            self.run_refresh(fetch).await?;
        }
        Ok(self.collection.snapshot())
    }

    /// Unconditionally refetch, then return the new listing.
    pub(crate) async fn refresh<F, Fut>(&self, fetch: F) -> Result<Snapshot<T>, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, CoreError>>,
    {
        self.invalidate();
        self.read_through(fetch).await
    }

    /// Look up a cached entity by id. Misses are not fetched; the
    /// caller decides whether to go to the network.
    pub(crate) fn get(&self, id: i64) -> Option<Arc<T>> {
        self.collection.get(id)
    }

    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        self.collection.snapshot()
    }

    pub(crate) fn subscribe(&self) -> Subscription<T> {
        Subscription::new(self.collection.subscribe())
    }

    /// Observe whether a fetch is currently in flight.
    pub(crate) fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Observe the most recent fetch failure, if any.
    pub(crate) fn last_error(&self) -> watch::Receiver<Option<String>> {
        self.last_error.subscribe()
    }

    #[cfg(test)]
    pub(crate) fn version(&self) -> u64 {
        self.collection.version()
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Mark the cached listing out of date. Idempotent; the next read
    /// refetches once no matter how many invalidations piled up.
    pub(crate) fn invalidate(&self) {
        self.stale.store(true, Ordering::Release);
    }

    /// Refetch after a successful mutation.
    ///
    /// Failures are recorded in `last_error` and logged but not
    /// propagated: the mutation itself already succeeded, and the
    /// cache stays stale so a later read retries the fetch.
    pub(crate) async fn repopulate<F, Fut>(&self, fetch: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, CoreError>>,
    {
        self.invalidate();
        if let Err(err) = self.read_through(fetch).await {
            warn!("cache repopulation failed: {err}");
        }
    }

    /// Drop all cached data and start over stale.
    pub(crate) fn clear(&self) {
        self.collection.clear();
        self.stale.store(true, Ordering::Release);
        self.last_error.send_modify(|e| *e = None);
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Run one fetch under the gate and install its result.
    async fn run_refresh<F, Fut>(&self, fetch: F) -> Result<(), CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, CoreError>>,
    {
        self.loading.send_modify(|l| *l = true);
        let outcome = fetch().await;
        self.loading.send_modify(|l| *l = false);

        match outcome {
            Ok(entities) => {
                debug!("cache refreshed with {} entities", entities.len());
                self.collection.replace_all(entities);
                self.stale.store(false, Ordering::Release);
                self.last_error.send_modify(|e| *e = None);
                Ok(())
            }
            Err(err) => {
                self.last_error.send_modify(|e| *e = Some(err.to_string()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Animal, AnimalId, Species};
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    fn animal(id: i64) -> Animal {
        Animal {
            id: AnimalId::new(id),
            name: format!("animal-{id}"),
            species: Species::Dog,
            breed: String::new(),
            gender: None,
            size: None,
            birth_date: None,
            location: String::new(),
            description: String::new(),
            adopted: false,
            image_url: "/placeholder.svg".into(),
            owner: None,
        }
    }

    #[tokio::test]
    async fn read_through_fetches_once_then_serves_cached_data() {
        let cache = EntityCache::<Animal>::new();
        let fetches = AtomicU32::new(0);

        for _ in 0..3 {
            let snap = cache
                .read_through(|| async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![animal(1), animal(2)])
                })
                .await
                .unwrap();
            assert_eq!(snap.len(), 2);
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_triggers_exactly_one_refetch() {
        let cache = EntityCache::<Animal>::new();
        let fetches = AtomicU32::new(0);
        let fetch = || async {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec![animal(1)])
        };

        cache.read_through(fetch).await.unwrap();

        // Piled-up invalidations collapse into one refetch.
        cache.invalidate();
        cache.invalidate();
        cache.invalidate();

        cache.read_through(fetch).await.unwrap();
        cache.read_through(fetch).await.unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_reads_share_one_fetch() {
        let cache = EntityCache::<Animal>::new();
        let fetches = AtomicU32::new(0);
        let fetch = || async {
            fetches.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(vec![animal(1)])
        };

        let (a, b) = tokio::join!(cache.read_through(fetch), cache.read_through(fetch));
        assert_eq!(a.unwrap().len(), 1);
        assert_eq!(b.unwrap().len(), 1);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_records_error_and_stays_stale() {
        let cache = EntityCache::<Animal>::new();
        let errors = cache.last_error();

        let err = cache
            .read_through(|| async { Err(CoreError::Api { message: "boom".into(), status: Some(500) }) })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
        assert_eq!(errors.borrow().as_deref(), Some("Backend error: boom"));
        assert!(cache.snapshot().is_empty());

        // Still stale, so the next read tries again and can recover.
        let snap = cache
            .read_through(|| async { Ok(vec![animal(1)]) })
            .await
            .unwrap();
        assert_eq!(snap.len(), 1);
        assert!(errors.borrow().is_none());
    }

    #[tokio::test]
    async fn repopulate_swallows_fetch_failures() {
        let cache = EntityCache::<Animal>::new();
        cache
            .read_through(|| async { Ok(vec![animal(1)]) })
            .await
            .unwrap();

        cache
            .repopulate(|| async { Err(CoreError::Api { message: "down".into(), status: Some(502) }) })
            .await;

        // The stale cache still serves the last good snapshot.
        assert_eq!(cache.snapshot().len(), 1);
        assert_eq!(
            cache.last_error().borrow().as_deref(),
            Some("Backend error: down")
        );

        // And the next read retries the fetch.
        let fetches = AtomicU32::new(0);
        cache
            .read_through(|| async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok(vec![animal(1), animal(2)])
            })
            .await
            .unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refresh_refetches_even_when_fresh() {
        let cache = EntityCache::<Animal>::new();
        let fetches = AtomicU32::new(0);
        let fetch = || async {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec![animal(1)])
        };

        cache.read_through(fetch).await.unwrap();
        cache.refresh(fetch).await.unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn loading_is_visible_while_a_fetch_is_in_flight() {
        let cache = EntityCache::<Animal>::new();
        let loading = cache.loading();
        let (release, gate) = tokio::sync::oneshot::channel::<()>();

        let mut read = tokio_test::task::spawn(cache.read_through(|| async {
            gate.await.ok();
            Ok(vec![animal(1)])
        }));

        assert!(read.poll().is_pending());
        assert!(*loading.borrow());

        release.send(()).unwrap();
        let snap = read.await.unwrap();
        assert_eq!(snap.len(), 1);
        assert!(!*loading.borrow());
    }

    #[tokio::test]
    async fn clear_forgets_data_and_errors() {
        let cache = EntityCache::<Animal>::new();
        cache
            .read_through(|| async { Ok(vec![animal(1)]) })
            .await
            .unwrap();
        assert_eq!(cache.version(), 1);

        cache.clear();
        assert!(cache.snapshot().is_empty());
        assert!(cache.get(1).is_none());
        assert!(cache.last_error().borrow().is_none());

        // Cleared caches are stale again.
        let fetches = AtomicU32::new(0);
        cache
            .read_through(|| async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok(vec![animal(3)])
            })
            .await
            .unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }
}
