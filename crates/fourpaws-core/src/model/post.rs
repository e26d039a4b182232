// ── Post domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CommunityId, PostId, UserId};
use super::user::UserRef;

/// A post inside a community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author: Option<UserRef>,
    pub community_id: Option<CommunityId>,
    pub created_at: Option<DateTime<Utc>>,
    /// Like count as the server reports it.
    pub like_count: u32,
    pub liked_by: Vec<UserId>,
    pub comment_count: usize,
}

impl Post {
    pub fn is_liked_by(&self, user: &UserId) -> bool {
        self.liked_by.contains(user)
    }
}
