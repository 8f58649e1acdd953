//! Product endpoints and image upload.

use hemline_core::{Product, ProductId, ProductInput};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::instrument;

use super::{ApiClient, ApiError, envelope};

impl ApiClient {
    /// Get all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    /// An unrecognized response shape is not an error: it yields an empty list.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let body = self.send(self.request(Method::GET, "products")).await?;
        Ok(envelope::collection(&body, "products"))
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no product.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let body = self
            .send(self.request(Method::GET, &format!("products/{id}")))
            .await?;
        envelope::entity(&body, "product").ok_or(ApiError::MissingEntity("product"))
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no product.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        let body = self
            .send(self.request(Method::POST, "products").json(input))
            .await?;
        envelope::entity(&body, "product").ok_or(ApiError::MissingEntity("product"))
    }

    /// Replace a product's editable fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no product.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        let body = self
            .send(self.request(Method::PUT, &format!("products/{id}")).json(input))
            .await?;
        envelope::entity(&body, "product").ok_or(ApiError::MissingEntity("product"))
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("products/{id}")))
            .await
            .map(drop)
    }

    /// Upload an image and return the URL the backend stored it under.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails or no URL comes back.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ApiError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("image", part);
        let body = self
            .send(self.request(Method::POST, "upload").multipart(form))
            .await?;
        envelope::string_field(&body, &["url", "imageUrl", "path"])
            .ok_or(ApiError::MissingEntity("image url"))
    }
}
