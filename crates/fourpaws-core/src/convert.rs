// ── API-to-domain type conversions ──
//
// Bridges raw `fourpaws_api` wire types into canonical
// `fourpaws_core::model` domain types, and lowers domain write payloads
// back to wire requests. Each `From` impl parses strings into strong
// types and fills sensible defaults for missing optional data.

use chrono::NaiveDate;
use serde_json::Value;

use fourpaws_api::types::{
    AnimalOwner, AnimalResponse, CommentResponse, CommunityResponse, CreateAnimalRequest,
    CreateCommentRequest, CreateCommunityRequest, CreatePostRequest, ImagePart, PostResponse,
    PutForAdoptionRequest, RegisterRequest, SessionUser, UpdateAnimalRequest,
    UpdateCommunityRequest, UpdatePostRequest,
};
use fourpaws_api::PLACEHOLDER_IMAGE;

use crate::model::{
    AdoptionListing, Animal, AnimalChanges, AnimalId, Comment, CommentId, Community,
    CommunityChanges, CommunityId, Gender, ImageUpload, NewAccount, NewAnimal, NewComment,
    NewCommunity, NewPost, OwnerSummary, Post, PostChanges, PostId, Size, Species, User, UserId,
    UserRef,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a backend date string to a `NaiveDate`. Some records carry a
/// bare date, others a full ISO timestamp; only the date prefix counts.
pub(crate) fn parse_birth_date(raw: Option<&str>) -> Option<NaiveDate> {
    let date = raw?.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Treat empty strings the way the original data does: as absent.
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

/// Extract a user id from a loosely-typed reference value: a bare
/// number, a bare string, or a populated document with an `id` field.
pub(crate) fn value_to_user_id(value: &Value) -> Option<UserId> {
    match value {
        Value::Number(n) => Some(UserId::new(n.to_string())),
        Value::String(s) => Some(UserId::new(s.clone())),
        Value::Object(map) => map.get("id").and_then(value_to_user_id),
        _ => None,
    }
}

/// Extract a numeric entity id from a loosely-typed reference value.
pub(crate) fn value_to_numeric_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        Value::Object(map) => map.get("id").and_then(value_to_numeric_id),
        _ => None,
    }
}

/// Extract an author reference from a loosely-typed value. Populated
/// documents yield both id and username; bare ids yield just the id.
pub(crate) fn value_to_user_ref(value: &Value) -> Option<UserRef> {
    match value {
        Value::Object(map) => {
            let id = map.get("id").and_then(value_to_user_id);
            let username = map
                .get("username")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            if id.is_none() && username.is_empty() {
                None
            } else {
                Some(UserRef { id, username })
            }
        }
        Value::Number(_) | Value::String(_) => Some(UserRef {
            id: value_to_user_id(value),
            username: String::new(),
        }),
        _ => None,
    }
}

// ── Animal ─────────────────────────────────────────────────────────

impl From<AnimalOwner> for OwnerSummary {
    fn from(o: AnimalOwner) -> Self {
        OwnerSummary {
            id: o.id,
            username: o.username,
            location: non_empty(o.location),
            contact_phone: non_empty(o.contact_phone),
        }
    }
}

impl From<AnimalResponse> for Animal {
    fn from(a: AnimalResponse) -> Self {
        Animal {
            id: AnimalId::new(a.id),
            name: a.name,
            species: Species::from(a.species),
            breed: a.breed,
            gender: non_empty(a.gender).map(Gender::from),
            size: non_empty(a.size).map(Size::from),
            birth_date: parse_birth_date(a.birth_date.as_deref()),
            location: a.location,
            description: a.description,
            adopted: a.adopted,
            // The adapter normalizes animal images, so this is only a
            // fallback for records that bypassed it.
            image_url: a
                .imagen_url
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned()),
            owner: a.user.map(OwnerSummary::from),
        }
    }
}

// ── Community ──────────────────────────────────────────────────────

impl From<CommunityResponse> for Community {
    fn from(c: CommunityResponse) -> Self {
        Community {
            id: CommunityId::new(c.id),
            name: c.name,
            description: c.description,
            category: c.category,
            image_url: non_empty(c.image_url),
            member_count: c.members,
            follower_ids: c.followers.iter().filter_map(value_to_user_id).collect(),
            post_ids: c
                .posts
                .iter()
                .filter_map(value_to_numeric_id)
                .map(PostId::new)
                .collect(),
        }
    }
}

// ── Post ───────────────────────────────────────────────────────────

impl From<PostResponse> for Post {
    fn from(p: PostResponse) -> Self {
        Post {
            id: PostId::new(p.id),
            title: p.title,
            content: p.content,
            image_url: non_empty(p.image_url),
            author: p.author.as_ref().and_then(value_to_user_ref),
            community_id: p
                .community
                .as_ref()
                .and_then(value_to_numeric_id)
                .map(CommunityId::new),
            created_at: p.created_at,
            like_count: p.likes,
            liked_by: p.liked_by.iter().filter_map(value_to_user_id).collect(),
            comment_count: p.comments.len(),
        }
    }
}

// ── Comment ────────────────────────────────────────────────────────

impl From<CommentResponse> for Comment {
    fn from(c: CommentResponse) -> Self {
        Comment {
            id: CommentId::new(c.id),
            content: c.content,
            author: c.author.as_ref().and_then(value_to_user_ref),
            post_id: c
                .post
                .as_ref()
                .and_then(value_to_numeric_id)
                .map(PostId::new),
            created_at: c.created_at,
            like_count: c.likes,
            liked_by: c.liked_by.iter().filter_map(value_to_user_id).collect(),
        }
    }
}

// ── User ───────────────────────────────────────────────────────────

impl From<SessionUser> for User {
    fn from(u: SessionUser) -> Self {
        User {
            id: UserId::new(u.id),
            username: u.username,
            role: non_empty(u.role),
        }
    }
}

// ── Write payload lowering ─────────────────────────────────────────

impl From<ImageUpload> for ImagePart {
    fn from(image: ImageUpload) -> Self {
        ImagePart {
            file_name: image.file_name,
            mime_type: image.mime_type,
            bytes: image.bytes,
        }
    }
}

impl NewAnimal {
    /// Split into the wire request and the optional attachment that
    /// decides JSON vs multipart encoding.
    pub(crate) fn into_request(self) -> (CreateAnimalRequest, Option<ImagePart>) {
        let image = self.image.map(ImagePart::from);
        let request = CreateAnimalRequest {
            name: self.name,
            species: self.species.to_string(),
            breed: self.breed,
            description: self.description,
            birth_date: self.birth_date,
            gender: self.gender.to_string(),
            adopted: false,
            imagen_url: String::new(),
            size: self.size.to_string(),
            location: self.location,
            contact_phone: self.contact_phone,
        };
        (request, image)
    }
}

impl From<AnimalChanges> for UpdateAnimalRequest {
    fn from(changes: AnimalChanges) -> Self {
        UpdateAnimalRequest {
            name: changes.name,
            species: changes.species.map(|s| s.to_string()),
            breed: changes.breed,
            description: changes.description,
            birth_date: changes.birth_date,
            gender: changes.gender.map(|g| g.to_string()),
            adopted: changes.adopted,
            imagen_url: changes.image_url,
            size: changes.size.map(|s| s.to_string()),
            location: changes.location,
            contact_phone: changes.contact_phone,
        }
    }
}

impl From<AdoptionListing> for PutForAdoptionRequest {
    fn from(listing: AdoptionListing) -> Self {
        // JSON-only endpoint: the nested attachment, if any, is dropped.
        let (animal, _image) = listing.animal.into_request();
        PutForAdoptionRequest {
            user_id: listing.owner_id,
            animal,
            reason: listing.reason,
            location: listing.location,
            contact_phone: listing.contact_phone,
        }
    }
}

impl NewCommunity {
    pub(crate) fn into_request(self) -> (CreateCommunityRequest, Option<ImagePart>) {
        let image = self.image.map(ImagePart::from);
        let request = CreateCommunityRequest {
            name: self.name,
            description: self.description,
            category: self.category,
        };
        (request, image)
    }
}

impl From<CommunityChanges> for UpdateCommunityRequest {
    fn from(changes: CommunityChanges) -> Self {
        UpdateCommunityRequest {
            name: changes.name,
            description: changes.description,
            category: changes.category,
        }
    }
}

impl NewPost {
    pub(crate) fn into_request(self) -> (CreatePostRequest, Option<ImagePart>) {
        let image = self.image.map(ImagePart::from);
        let request = CreatePostRequest {
            title: self.title,
            content: self.content,
            community: self.community.get(),
        };
        (request, image)
    }
}

impl From<PostChanges> for UpdatePostRequest {
    fn from(changes: PostChanges) -> Self {
        UpdatePostRequest {
            title: changes.title,
            content: changes.content,
        }
    }
}

impl NewComment {
    pub(crate) fn into_request(self) -> CreateCommentRequest {
        CreateCommentRequest {
            content: self.content,
            post: self.post.get(),
        }
    }
}

impl NewAccount {
    pub(crate) fn into_request(self) -> RegisterRequest {
        use secrecy::ExposeSecret;
        RegisterRequest {
            username: self.username,
            email: self.email,
            password: self.password.expose_secret().to_owned(),
            birth_date: self.birth_date,
        }
    }
}
