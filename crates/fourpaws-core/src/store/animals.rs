// ── Animal store ──
//
// Cached listing plus registration, rehoming, updates, and the
// similar-animals recommendation. The listing cache follows the
// invalidate-and-refetch discipline; detail reads go straight to the
// backend so adoption pages never show a stale snapshot.

use std::sync::Arc;

use fourpaws_api::ApiClient;
use fourpaws_api::types::{PutForAdoptionRequest, UpdateAnimalRequest};
use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{AdoptionListing, Animal, AnimalChanges, AnimalId, NewAnimal};
use crate::store::cache::EntityCache;
use crate::store::require_session;
use crate::stream::{Snapshot, Subscription};
use crate::validate;

pub struct AnimalStore {
    client: Arc<ApiClient>,
    cache: EntityCache<Animal>,
}

impl AnimalStore {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cache: EntityCache::new(),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The adoptable-animal listing, fetched on first read and after
    /// invalidation, otherwise served from cache.
    pub async fn animals(&self) -> Result<Snapshot<Animal>, CoreError> {
        self.cache.read_through(|| self.fetch_all()).await
    }

    /// Drop the cached listing and fetch a fresh one.
    pub async fn refresh(&self) -> Result<Snapshot<Animal>, CoreError> {
        self.cache.refresh(|| self.fetch_all()).await
    }

    /// Cached lookup by id; `None` when the listing has not been
    /// fetched yet or the animal is not in it.
    pub fn cached(&self, id: AnimalId) -> Option<Arc<Animal>> {
        self.cache.get(id.get())
    }

    /// Fetch one animal from the backend. Detail views use this so
    /// they always see current data; the listing cache is untouched.
    pub async fn animal(&self, id: AnimalId) -> Result<Animal, CoreError> {
        let animal = self.client.animal(id.get()).await?;
        Ok(animal.into())
    }

    /// Recommendations shown next to an animal's detail view. Resolves
    /// to an empty list on failure instead of erroring.
    pub async fn similar(&self, id: AnimalId) -> Vec<Animal> {
        self.client
            .similar_animals(id.get())
            .await
            .into_iter()
            .map(Animal::from)
            .collect()
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Register a new animal, optionally with a photo.
    pub async fn register(&self, animal: NewAnimal) -> Result<Animal, CoreError> {
        require_session(&self.client)?;
        validate::new_animal(&animal)?;

        let (request, image) = animal.into_request();
        let created: Animal = self.client.create_animal(&request, image).await?.into();
        debug!("registered animal {}", created.id);

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(created)
    }

    /// Give up an owned animal for adoption.
    pub async fn put_for_adoption(&self, listing: AdoptionListing) -> Result<Animal, CoreError> {
        require_session(&self.client)?;
        validate::adoption_listing(&listing)?;

        let request = PutForAdoptionRequest::from(listing);
        let animal: Animal = self.client.put_for_adoption(&request).await?.into();
        debug!("listed animal {} for adoption", animal.id);

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(animal)
    }

    /// Apply a partial edit. An empty change set skips the write and
    /// returns the animal's current server state.
    pub async fn update(&self, id: AnimalId, changes: AnimalChanges) -> Result<Animal, CoreError> {
        require_session(&self.client)?;
        if changes.is_empty() {
            return self.animal(id).await;
        }

        let patch = UpdateAnimalRequest::from(changes);
        let updated: Animal = self.client.update_animal(id.get(), &patch).await?.into();

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(updated)
    }

    /// Flag an animal as adopted, hiding it from adoption flows.
    pub async fn mark_adopted(&self, id: AnimalId) -> Result<Animal, CoreError> {
        self.update(id, AnimalChanges::mark_adopted()).await
    }

    /// Remove an animal entirely.
    pub async fn remove(&self, id: AnimalId) -> Result<(), CoreError> {
        require_session(&self.client)?;
        self.client.delete_animal(id.get()).await?;

        self.cache.repopulate(|| self.fetch_all()).await;
        Ok(())
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Subscribe to listing changes.
    pub fn subscribe(&self) -> Subscription<Animal> {
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

    async fn fetch_all(&self) -> Result<Vec<Animal>, CoreError> {
        let animals = self.client.list_animals().await?;
        Ok(animals.into_iter().map(Animal::from).collect())
    }
}
