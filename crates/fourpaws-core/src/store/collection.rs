// ── Generic reactive entity collection ──
//
// Lock-free concurrent storage with O(1) lookups and push-based
// change notification via `watch` channels. Unlike a plain map, the
// broadcast snapshot keeps the order entities were loaded in, so
// subscribers always observe the server's listing order.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::{Animal, Comment, Community, Post};

/// A cacheable entity with a stable numeric identity.
pub trait Entity: Clone + Send + Sync + 'static {
    fn entity_id(&self) -> i64;
}

impl Entity for Animal {
    fn entity_id(&self) -> i64 {
        self.id.get()
    }
}

impl Entity for Community {
    fn entity_id(&self) -> i64 {
        self.id.get()
    }
}

impl Entity for Post {
    fn entity_id(&self) -> i64 {
        self.id.get()
    }
}

impl Entity for Comment {
    fn entity_id(&self) -> i64 {
        self.id.get()
    }
}

/// A lock-free, reactive collection for a single entity type.
///
/// `DashMap` serves O(1) id lookups while a `watch` channel carries
/// the ordered snapshot to subscribers. Every mutation bumps a version
/// counter and broadcasts a fresh snapshot.
pub(crate) struct Collection<T: Entity> {
    /// Primary storage: entity id -> entity.
    by_id: DashMap<i64, Arc<T>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Ordered snapshot, replaced on mutation for cheap subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Entity> Collection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Replace the whole collection with a freshly fetched listing.
    ///
    /// The snapshot keeps `entities`' order; on duplicate ids the first
    /// occurrence wins so each entity appears exactly once.
    pub(crate) fn replace_all(&self, entities: Vec<T>) {
        let mut ordered: Vec<Arc<T>> = Vec::with_capacity(entities.len());
        let fresh: DashMap<i64, Arc<T>> = DashMap::with_capacity(entities.len());
        for entity in entities {
            let id = entity.entity_id();
            if fresh.contains_key(&id) {
                continue;
            }
            let entity = Arc::new(entity);
            fresh.insert(id, Arc::clone(&entity));
            ordered.push(entity);
        }

        self.by_id.clear();
        for (id, entity) in fresh {
            self.by_id.insert(id, entity);
        }

        self.snapshot.send_modify(|snap| *snap = Arc::new(ordered));
        self.bump_version();
    }

    /// Remove all entities.
    pub(crate) fn clear(&self) {
        self.by_id.clear();
        self.snapshot.send_modify(|snap| *snap = Arc::new(Vec::new()));
        self.bump_version();
    }

    /// Look up an entity by id.
    pub(crate) fn get(&self, id: i64) -> Option<Arc<T>> {
        self.by_id.get(&id).map(|r| Arc::clone(r.value()))
    }

    /// Get the current ordered snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    /// Current mutation count, for change detection in tests and
    /// refresh coalescing assertions.
    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Increment the version counter.
    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}
