// Animal endpoints
//
// Listing, registration (JSON or multipart), updates, deletion, the
// similar-animals recommendation, and the rehoming request. Every
// response passes through image normalization before it leaves this
// module.

use reqwest::multipart::Form;
use tracing::warn;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    AnimalResponse, CreateAnimalRequest, ImagePart, PutForAdoptionRequest, UpdateAnimalRequest,
};

impl ApiClient {
    /// List all animals.
    ///
    /// `GET /api/animals`
    pub async fn list_animals(&self) -> Result<Vec<AnimalResponse>, Error> {
        let animals = self.get("api/animals").await?;
        Ok(self.finalize_all(animals))
    }

    /// Get a single animal by id.
    ///
    /// `GET /api/animals/{id}`
    pub async fn animal(&self, id: i64) -> Result<AnimalResponse, Error> {
        let animal = self.get(&format!("api/animals/{id}")).await?;
        Ok(self.finalize(animal))
    }

    /// Register a new animal. With an image attached the request is
    /// encoded as multipart and the image travels as a file part;
    /// without one it is plain JSON.
    ///
    /// `POST /api/animals`
    pub async fn create_animal(
        &self,
        animal: &CreateAnimalRequest,
        image: Option<ImagePart>,
    ) -> Result<AnimalResponse, Error> {
        let created = match image {
            Some(image) => {
                let form = animal_form(animal, image)?;
                self.post_multipart("api/animals", form).await?
            }
            None => self.post("api/animals", animal).await?,
        };
        Ok(self.finalize(created))
    }

    /// Submit a rehoming request for an owned animal.
    ///
    /// `POST /api/animals/put-for-adoption`
    pub async fn put_for_adoption(
        &self,
        request: &PutForAdoptionRequest,
    ) -> Result<AnimalResponse, Error> {
        let animal = self.post("api/animals/put-for-adoption", request).await?;
        Ok(self.finalize(animal))
    }

    /// Update an animal (partial payload).
    ///
    /// `PUT /api/animals/{id}`
    pub async fn update_animal(
        &self,
        id: i64,
        patch: &UpdateAnimalRequest,
    ) -> Result<AnimalResponse, Error> {
        let animal = self.put(&format!("api/animals/{id}"), patch).await?;
        Ok(self.finalize(animal))
    }

    /// Delete an animal.
    ///
    /// `DELETE /api/animals/{id}`
    pub async fn delete_animal(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("api/animals/{id}")).await
    }

    /// Fetch animals similar to the given one.
    ///
    /// `GET /api/animals/{id}/similar`
    ///
    /// Soft-fails to an empty vector: the recommendation strip is
    /// non-critical and must never take the detail view down with it.
    pub async fn similar_animals(&self, id: i64) -> Vec<AnimalResponse> {
        match self
            .get::<Vec<AnimalResponse>>(&format!("api/animals/{id}/similar"))
            .await
        {
            Ok(animals) => self.finalize_all(animals),
            Err(err) => {
                warn!("similar-animals lookup for {id} failed: {err}");
                Vec::new()
            }
        }
    }

    // ── Image normalization ──────────────────────────────────────────

    fn finalize(&self, mut animal: AnimalResponse) -> AnimalResponse {
        animal.imagen_url = Some(self.normalize_image(animal.imagen_url.take()));
        animal
    }

    fn finalize_all(&self, animals: Vec<AnimalResponse>) -> Vec<AnimalResponse> {
        animals.into_iter().map(|a| self.finalize(a)).collect()
    }
}

/// Flatten the registration payload into multipart text fields plus
/// the image file part, mirroring the field names of the JSON body.
fn animal_form(animal: &CreateAnimalRequest, image: ImagePart) -> Result<Form, Error> {
    let form = Form::new()
        .part("image", image.into_part()?)
        .text("name", animal.name.clone())
        .text("species", animal.species.clone())
        .text("breed", animal.breed.clone())
        .text("description", animal.description.clone())
        .text("birthDate", animal.birth_date.to_string())
        .text("gender", animal.gender.clone())
        .text("adopted", animal.adopted.to_string())
        .text("size", animal.size.clone())
        .text("location", animal.location.clone())
        .text("contactPhone", animal.contact_phone.clone());
    Ok(form)
}
