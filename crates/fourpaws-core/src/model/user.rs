// ── User domain types ──

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// The authenticated user. Created at login/register, persisted for
/// session continuity, destroyed at logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// A lightweight reference to a user embedded in posts and comments.
/// The backend sometimes sends only an id, so `username` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Option<UserId>,
    pub username: String,
}

impl UserRef {
    /// Display name, falling back when the reference is a bare id.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            "anonymous"
        } else {
            &self.username
        }
    }
}

/// Owning-user summary embedded in animal detail records. Carries the
/// backend's numeric owner id, which is distinct from the string
/// session id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub id: i64,
    pub username: String,
    pub location: Option<String>,
    pub contact_phone: Option<String>,
}
