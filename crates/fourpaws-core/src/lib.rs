//! Client-side state and synchronization layer between `fourpaws-api`
//! and UI consumers (CLI today, richer frontends tomorrow).
//!
//! This crate owns the domain model, the entity caches, and the
//! session logic for the FourPaws workspace:
//!
//! - **[`Platform`]** -- Central facade with a defined lifecycle:
//!   [`start()`](Platform::start) restores a persisted session and
//!   spawns the expiry forwarder, [`shutdown()`](Platform::shutdown)
//!   stops background work. Hands out the session and the four stores.
//!
//! - **Entity stores** ([`AnimalStore`], [`CommunityStore`],
//!   [`PostStore`], [`CommentStore`]) -- one cached collection per
//!   backend resource, following the invalidate-and-refetch
//!   discipline: successful writes mark the listing stale and the
//!   next read fetches a fresh copy instead of patching locally.
//!
//! - **[`Subscription<T>`]** -- Reactive handle vended by the stores.
//!   Exposes `current()` / `latest()` / `changed()` and converts into
//!   a `Stream` for combinator-based consumers.
//!
//! - **[`AnimalFilter`]** -- Pure narrowing of the animal listing by
//!   text query, species tab, age range, and gender/size/location
//!   vocabularies. Never touches the network.
//!
//! - **[`Session`]** -- The auth state machine (`Uninitialized ->
//!   Resolving -> Authenticated | Anonymous`) plus persisted
//!   credential handling and expiry teardown.

pub mod config;
pub mod convert;
pub mod detail;
pub mod error;
pub mod filter;
pub mod model;
pub mod platform;
pub mod session;
pub mod store;
pub mod stream;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_BACKEND_URL, PlatformConfig};
pub use detail::{CommunityDetail, PostOrdering, RetryPolicy};
pub use error::CoreError;
pub use filter::{AGE_RANGE_DEFAULT, AnimalFilter, SpeciesTab};
pub use platform::Platform;
pub use session::{CredentialStore, MemoryCredentialStore, PersistedSession, Session, SessionState};
pub use store::{AnimalStore, CommentStore, CommunityStore, PostStore};
pub use stream::{Snapshot, Subscription, SubscriptionStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Write payloads
    AdoptionListing,
    // Core entities
    Animal,
    AnimalChanges,
    AnimalId,
    Comment,
    CommentId,
    Community,
    CommunityChanges,
    CommunityId,
    Gender,
    ImageUpload,
    NewAccount,
    NewAnimal,
    NewComment,
    NewCommunity,
    NewPost,
    OwnerSummary,
    Post,
    PostChanges,
    PostId,
    Size,
    Species,
    // People
    User,
    UserId,
    UserRef,
};
