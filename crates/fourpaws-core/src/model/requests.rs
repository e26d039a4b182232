// ── Typed write payloads ──
//
// Domain-side shapes for every mutating operation. The store layer
// validates these where the UI forms used to, then lowers them to wire
// requests in `convert`.

use chrono::NaiveDate;
use secrecy::SecretString;

use super::animal::{Gender, Size, Species};
use super::ids::{CommunityId, PostId};

/// An image file attached to a create operation. Presence of an
/// attachment switches the request to multipart encoding.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

// ── Animals ──────────────────────────────────────────────────────────

/// Registration payload for a new animal.
#[derive(Debug, Clone)]
pub struct NewAnimal {
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub description: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub size: Size,
    pub location: String,
    pub contact_phone: String,
    pub image: Option<ImageUpload>,
}

/// Partial animal edit. `None` fields are left untouched server-side.
#[derive(Debug, Clone, Default)]
pub struct AnimalChanges {
    pub name: Option<String>,
    pub species: Option<Species>,
    pub breed: Option<String>,
    pub description: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub size: Option<Size>,
    pub location: Option<String>,
    pub contact_phone: Option<String>,
    pub adopted: Option<bool>,
    pub image_url: Option<String>,
}

impl AnimalChanges {
    /// The edit that marks an animal adopted and nothing else.
    pub fn mark_adopted() -> Self {
        Self {
            adopted: Some(true),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.species.is_none()
            && self.breed.is_none()
            && self.description.is_none()
            && self.birth_date.is_none()
            && self.gender.is_none()
            && self.size.is_none()
            && self.location.is_none()
            && self.contact_phone.is_none()
            && self.adopted.is_none()
            && self.image_url.is_none()
    }
}

/// Rehoming request: an existing owner gives an animal up for adoption.
///
/// This endpoint takes JSON only; an `image` on the nested animal is
/// not part of the payload and is ignored.
#[derive(Debug, Clone)]
pub struct AdoptionListing {
    /// Numeric owner id (the backend keys animal owners numerically).
    pub owner_id: i64,
    pub animal: NewAnimal,
    pub reason: String,
    pub location: String,
    pub contact_phone: String,
}

// ── Communities ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewCommunity {
    pub name: String,
    pub description: String,
    pub category: String,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone, Default)]
pub struct CommunityChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

// ── Posts ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub community: CommunityId,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

// ── Comments ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub post: PostId,
}

// ── Accounts ─────────────────────────────────────────────────────────

/// Sign-up payload for a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub birth_date: NaiveDate,
}
