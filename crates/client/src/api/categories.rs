//! Category endpoints.

use hemline_core::{Category, CategoryId, CategoryInput};
use reqwest::Method;
use tracing::instrument;

use super::{ApiClient, ApiError, envelope};

impl ApiClient {
    /// Get all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let body = self.send(self.request(Method::GET, "categories")).await?;
        Ok(envelope::collection(&body, "categories"))
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no category.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        let body = self
            .send(self.request(Method::POST, "categories").json(input))
            .await?;
        envelope::entity(&body, "category").ok_or(ApiError::MissingEntity("category"))
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no category.
    #[instrument(skip(self, input), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: &CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, ApiError> {
        let body = self
            .send(self.request(Method::PUT, &format!("categories/{id}")).json(input))
            .await?;
        envelope::entity(&body, "category").ok_or(ApiError::MissingEntity("category"))
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("categories/{id}")))
            .await
            .map(drop)
    }
}
