//! Wire types for the FourPaws REST backend.
//!
//! All types match the JSON the backend actually sends and accepts.
//! Field names use camelCase via `#[serde(rename_all = "camelCase")]`;
//! the one Spanish field (`imagenUrl`) falls out of that rename too.
//! Reference fields the backend types loosely (populated documents or
//! bare ids, depending on the endpoint) are kept as opaque JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

// ── Animals ──────────────────────────────────────────────────────────

/// Animal record --from `GET /api/animals` and friends.
///
/// `imagen_url` has been normalized by the client by the time a value
/// reaches consumers: always absolute or the placeholder path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalResponse {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub gender: Option<String>,
    /// Date string; some backend records carry a full timestamp.
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub adopted: bool,
    #[serde(default)]
    pub imagen_url: Option<String>,
    /// Owning-user summary, present on detail responses.
    #[serde(default)]
    pub user: Option<AnimalOwner>,
}

/// Display-only owner summary embedded in animal records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalOwner {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

/// Animal registration payload --`POST /api/animals` (JSON path).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnimalRequest {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub description: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub adopted: bool,
    pub imagen_url: String,
    pub size: String,
    pub location: String,
    pub contact_phone: String,
}

/// Partial animal update --`PUT /api/animals/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnimalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adopted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

/// Rehoming request --`POST /api/animals/put-for-adoption`.
///
/// Nests a full animal payload; `user_id` is the numeric id the
/// backend assigns animal owners (distinct from the string session id).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PutForAdoptionRequest {
    pub user_id: i64,
    pub animal: CreateAnimalRequest,
    pub reason: String,
    pub location: String,
    pub contact_phone: String,
}

// ── Communities ──────────────────────────────────────────────────────

/// Community record --from `GET /api/communities` and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityResponse {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Member count maintained server-side.
    #[serde(default)]
    pub members: u32,
    /// Follower user references --bare ids or populated documents.
    #[serde(default)]
    pub followers: Vec<Value>,
    /// Post references --bare ids or populated documents.
    #[serde(default)]
    pub posts: Vec<Value>,
}

/// Community creation payload --`POST /api/communities` (JSON path).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunityRequest {
    pub name: String,
    pub description: String,
    pub category: String,
}

/// Partial community update --`PUT /api/communities/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommunityRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

// ── Posts ────────────────────────────────────────────────────────────

/// Post record --from `GET /api/posts` and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Author reference --bare id or populated document.
    #[serde(default)]
    pub author: Option<Value>,
    /// Community reference --bare id or populated document.
    #[serde(default)]
    pub community: Option<Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub liked_by: Vec<Value>,
    #[serde(default)]
    pub comments: Vec<Value>,
}

/// Post creation payload --`POST /api/posts` (JSON path). The backend
/// assigns the author from the bearer token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub community: i64,
}

/// Partial post update --`PUT /api/posts/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

// ── Comments ─────────────────────────────────────────────────────────

/// Comment record --from `GET /api/comments` and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    #[serde(default)]
    pub content: String,
    /// Author reference --bare id or populated document.
    #[serde(default)]
    pub author: Option<Value>,
    /// Parent post reference --bare id or populated document.
    #[serde(default)]
    pub post: Option<Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub liked_by: Vec<Value>,
}

/// Comment creation payload --`POST /api/comments`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    pub post: i64,
}

/// Comment edit payload --`PUT /api/comments/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub content: String,
}

// ── Auth ─────────────────────────────────────────────────────────────

/// Session payload from `POST /auth/login`, `POST /auth/register`,
/// and `GET /auth/me`. Both fields are optional on the wire; the
/// session layer enforces which must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// The authenticated user as the auth endpoints report it.
///
/// `id` arrives as either a JSON string or a number depending on the
/// backend version, so it is widened to a string here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Registration payload --`POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub birth_date: NaiveDate,
}

// ── Multipart attachments ────────────────────────────────────────────

/// An image file attached to a create operation. Presence of an
/// attachment switches the request from JSON to multipart encoding.
#[derive(Debug, Clone)]
pub struct ImagePart {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePart {
    pub(crate) fn into_part(self) -> Result<reqwest::multipart::Part, Error> {
        let part = reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)?;
        Ok(part)
    }
}
