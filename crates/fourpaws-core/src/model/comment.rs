// ── Comment domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CommentId, PostId, UserId};
use super::user::UserRef;

/// A comment on a post. Lifecycle mirrors `Post`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub author: Option<UserRef>,
    pub post_id: Option<PostId>,
    pub created_at: Option<DateTime<Utc>>,
    pub like_count: u32,
    pub liked_by: Vec<UserId>,
}

impl Comment {
    pub fn is_liked_by(&self, user: &UserId) -> bool {
        self.liked_by.contains(user)
    }
}
