// ── Entity cache stores ──
//
// One store per backend resource. Each store is the single funnel for
// its collection: reads come from a staleness-tracked cache, writes go
// to the backend and mark the cache stale on success. Consumers get
// reactive snapshots through `subscribe()`.

mod animals;
mod cache;
mod collection;
mod comments;
mod communities;
mod posts;

pub use animals::AnimalStore;
pub use comments::CommentStore;
pub use communities::CommunityStore;
pub use posts::PostStore;

use fourpaws_api::ApiClient;

use crate::error::CoreError;

/// Mutations require a logged-in session; reads stay open to anyone.
fn require_session(client: &ApiClient) -> Result<(), CoreError> {
    if client.has_token() {
        Ok(())
    } else {
        Err(CoreError::SessionRequired)
    }
}
