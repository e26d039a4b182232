// ── Domain model ──
//
// Canonical client-side representations of the backend's entities.
// Wire shapes from `fourpaws_api` are converted into these types at the
// store boundary; consumers (CLI, views) only ever see this module.

pub mod animal;
pub mod comment;
pub mod community;
pub mod ids;
pub mod labels;
pub mod post;
pub mod requests;
pub mod user;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use fourpaws_core::model::*` gives you everything.

pub use ids::{AnimalId, CommentId, CommunityId, PostId, UserId};

pub use animal::{Animal, Gender, Size, Species};
pub use comment::Comment;
pub use community::Community;
pub use post::Post;
pub use user::{OwnerSummary, User, UserRef};

pub use requests::{
    AdoptionListing, AnimalChanges, CommunityChanges, ImageUpload, NewAccount, NewAnimal,
    NewComment, NewCommunity, NewPost, PostChanges,
};
