// Post endpoints
//
// Listing, community scoping with server-side ordering variants,
// creation (JSON or multipart), updates, deletion, and like toggles.
// Ordered reads return server order; the client never re-sorts them.

use reqwest::multipart::Form;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{CreatePostRequest, ImagePart, PostResponse, UpdatePostRequest};

impl ApiClient {
    /// List all posts.
    ///
    /// `GET /api/posts`
    pub async fn list_posts(&self) -> Result<Vec<PostResponse>, Error> {
        self.get("api/posts").await
    }

    /// Get a single post by id.
    ///
    /// `GET /api/posts/{id}`
    pub async fn post_by_id(&self, id: i64) -> Result<PostResponse, Error> {
        self.get(&format!("api/posts/{id}")).await
    }

    /// List a community's posts in the backend's default order.
    ///
    /// `GET /api/posts/community/{communityId}`
    pub async fn posts_by_community(&self, community_id: i64) -> Result<Vec<PostResponse>, Error> {
        self.get(&format!("api/posts/community/{community_id}"))
            .await
    }

    /// List a community's posts, newest first (server-ordered).
    ///
    /// `GET /api/posts/community/{communityId}/recent`
    pub async fn recent_posts_by_community(
        &self,
        community_id: i64,
    ) -> Result<Vec<PostResponse>, Error> {
        self.get(&format!("api/posts/community/{community_id}/recent"))
            .await
    }

    /// List a community's posts, most liked first (server-ordered).
    ///
    /// `GET /api/posts/community/{communityId}/popular`
    pub async fn popular_posts_by_community(
        &self,
        community_id: i64,
    ) -> Result<Vec<PostResponse>, Error> {
        self.get(&format!("api/posts/community/{community_id}/popular"))
            .await
    }

    /// Create a post, multipart when an image is attached. The author
    /// comes from the bearer token server-side.
    ///
    /// `POST /api/posts`
    pub async fn create_post(
        &self,
        post: &CreatePostRequest,
        image: Option<ImagePart>,
    ) -> Result<PostResponse, Error> {
        match image {
            Some(image) => {
                let form = Form::new()
                    .part("image", image.into_part()?)
                    .text("title", post.title.clone())
                    .text("content", post.content.clone())
                    .text("community", post.community.to_string());
                self.post_multipart("api/posts", form).await
            }
            None => self.post("api/posts", post).await,
        }
    }

    /// Update a post (partial payload).
    ///
    /// `PUT /api/posts/{id}`
    pub async fn update_post(&self, id: i64, patch: &UpdatePostRequest) -> Result<PostResponse, Error> {
        self.put(&format!("api/posts/{id}"), patch).await
    }

    /// Delete a post.
    ///
    /// `DELETE /api/posts/{id}`
    pub async fn delete_post(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("api/posts/{id}")).await
    }

    /// Like a post as the authenticated user.
    ///
    /// `POST /api/posts/{id}/like`
    pub async fn like_post(&self, id: i64) -> Result<PostResponse, Error> {
        self.post_empty(&format!("api/posts/{id}/like")).await
    }

    /// Remove the authenticated user's like from a post.
    ///
    /// `POST /api/posts/{id}/unlike`
    pub async fn unlike_post(&self, id: i64) -> Result<PostResponse, Error> {
        self.post_empty(&format!("api/posts/{id}/unlike")).await
    }
}
