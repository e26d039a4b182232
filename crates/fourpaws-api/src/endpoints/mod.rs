// Endpoint methods for the FourPaws backend, grouped per resource.
//
// Each module adds inherent methods to `ApiClient`; one method per
// REST endpoint, typed request in, typed response out.

pub mod animals;
pub mod auth;
pub mod comments;
pub mod communities;
pub mod posts;
