// ── Community domain types ──

use serde::{Deserialize, Serialize};

use super::ids::{CommunityId, PostId, UserId};

/// A topical community users can follow and post in.
///
/// `member_count`, `follower_ids`, and `post_ids` are all maintained
/// server-side; the client never recomputes them locally after a
/// follow/post mutation -- it refetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub member_count: u32,
    pub follower_ids: Vec<UserId>,
    pub post_ids: Vec<PostId>,
}

impl Community {
    pub fn is_followed_by(&self, user: &UserId) -> bool {
        self.follower_ids.contains(user)
    }
}
