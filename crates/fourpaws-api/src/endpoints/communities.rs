// Community endpoints
//
// Listing, category and name scoping, creation (JSON or multipart),
// updates, deletion, and the follow/unfollow toggles.

use reqwest::multipart::Form;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    CommunityResponse, CreateCommunityRequest, ImagePart, UpdateCommunityRequest,
};

impl ApiClient {
    /// List all communities.
    ///
    /// `GET /api/communities`
    pub async fn list_communities(&self) -> Result<Vec<CommunityResponse>, Error> {
        self.get("api/communities").await
    }

    /// Get a single community by id.
    ///
    /// `GET /api/communities/{id}`
    pub async fn community(&self, id: i64) -> Result<CommunityResponse, Error> {
        self.get(&format!("api/communities/{id}")).await
    }

    /// List communities in a category.
    ///
    /// `GET /api/communities/category/{category}`
    pub async fn communities_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<CommunityResponse>, Error> {
        self.get(&format!("api/communities/category/{category}"))
            .await
    }

    /// Search communities by name.
    ///
    /// `GET /api/communities/search?name={name}`
    pub async fn search_communities(&self, name: &str) -> Result<Vec<CommunityResponse>, Error> {
        self.get_with_params("api/communities/search", &[("name", name.to_owned())])
            .await
    }

    /// Create a community, multipart when an image is attached.
    ///
    /// `POST /api/communities`
    pub async fn create_community(
        &self,
        community: &CreateCommunityRequest,
        image: Option<ImagePart>,
    ) -> Result<CommunityResponse, Error> {
        match image {
            Some(image) => {
                let form = Form::new()
                    .part("image", image.into_part()?)
                    .text("name", community.name.clone())
                    .text("description", community.description.clone())
                    .text("category", community.category.clone());
                self.post_multipart("api/communities", form).await
            }
            None => self.post("api/communities", community).await,
        }
    }

    /// Update a community (partial payload).
    ///
    /// `PUT /api/communities/{id}`
    pub async fn update_community(
        &self,
        id: i64,
        patch: &UpdateCommunityRequest,
    ) -> Result<CommunityResponse, Error> {
        self.put(&format!("api/communities/{id}"), patch).await
    }

    /// Delete a community.
    ///
    /// `DELETE /api/communities/{id}`
    pub async fn delete_community(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("api/communities/{id}")).await
    }

    /// Follow a community as the authenticated user.
    ///
    /// `POST /api/communities/{id}/follow`
    pub async fn follow_community(&self, id: i64) -> Result<CommunityResponse, Error> {
        self.post_empty(&format!("api/communities/{id}/follow"))
            .await
    }

    /// Unfollow a community.
    ///
    /// `POST /api/communities/{id}/unfollow`
    pub async fn unfollow_community(&self, id: i64) -> Result<CommunityResponse, Error> {
        self.post_empty(&format!("api/communities/{id}/unfollow"))
            .await
    }
}
