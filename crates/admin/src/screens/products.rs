//! Products management screen.

use hemline_client::{ApiClient, FetchScope, Loadable, Notifications};
use hemline_core::{Product, ProductId, ProductInput};

use super::{contains_ci, load_into};
use crate::error::AdminError;

/// List filter for the products table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Matched against name and description.
    pub search: String,
    /// Category id or name; `None` shows every category.
    pub category: Option<String>,
}

impl ProductFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let search = self.search.trim();
        let text_ok = contains_ci(&product.name, search) || contains_ci(&product.description, search);
        let category_ok = self.category.as_deref().is_none_or(|wanted| {
            product
                .category
                .as_ref()
                .is_some_and(|c| c.matches(wanted))
        });
        text_ok && category_ok
    }
}

/// Products table with create/update/delete and image upload.
#[derive(Debug)]
pub struct ProductsScreen {
    scope: FetchScope,
    api: ApiClient,
    products: Loadable<Vec<Product>>,
    pub filter: ProductFilter,
    pub notices: Notifications,
}

impl ProductsScreen {
    #[must_use]
    pub fn new(api: &ApiClient) -> Self {
        let scope = FetchScope::new();
        let api = scope.client(api);
        Self {
            scope,
            api,
            products: Loadable::Idle,
            filter: ProductFilter::default(),
            notices: Notifications::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &Loadable<Vec<Product>> {
        &self.products
    }

    /// Products passing the current filter, in backend order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Product> {
        self.products
            .value()
            .map(|all| all.iter().filter(|p| self.filter.matches(p)).collect())
            .unwrap_or_default()
    }

    pub async fn load(&mut self) {
        load_into(
            &mut self.products,
            &mut self.notices,
            "products",
            self.api.list_products(),
        )
        .await;
    }

    /// Reload after a failed load. Does nothing otherwise.
    pub async fn retry(&mut self) {
        if matches!(self.products, Loadable::Failed { .. }) {
            self.load().await;
        }
    }

    /// Validate and create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails (nothing is sent) or the backend
    /// rejects the product.
    pub async fn create(&mut self, input: &ProductInput) -> Result<Product, AdminError> {
        input.validate()?;
        let result = self.api.create_product(input).await;
        let created = self.report(result, "Product created", "create product")?;
        if let Some(products) = self.products.value_mut() {
            products.push(created.clone());
        }
        Ok(created)
    }

    /// Validate and update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the backend rejects the change.
    pub async fn update(&mut self, id: &ProductId, input: &ProductInput) -> Result<Product, AdminError> {
        input.validate()?;
        let result = self.api.update_product(id, input).await;
        let updated = self.report(result, "Product updated", "update product")?;
        if let Some(slot) = self
            .products
            .value_mut()
            .and_then(|products| products.iter_mut().find(|p| &p.id == id))
        {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    pub async fn delete(&mut self, id: &ProductId) -> Result<(), AdminError> {
        let result = self.api.delete_product(id).await;
        self.report(result, "Product deleted", "delete product")?;
        if let Some(products) = self.products.value_mut() {
            products.retain(|p| &p.id != id);
        }
        Ok(())
    }

    /// Upload an image for use in a product's gallery.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    pub async fn upload_image(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<String, AdminError> {
        let result = self.api.upload_image(file_name, bytes).await;
        self.report(result, "Image uploaded", "upload image")
    }

    /// Push a notice for `result` and convert its error.
    fn report<T>(
        &mut self,
        result: Result<T, hemline_client::ApiError>,
        success: &str,
        action: &str,
    ) -> Result<T, AdminError> {
        match result {
            Ok(value) => {
                self.notices.success(success);
                Ok(value)
            }
            Err(e) => {
                tracing::error!(error = %e, action, "Product action failed");
                self.notices.error(format!("Failed to {action}: {e}"));
                Err(e.into())
            }
        }
    }

    /// Abandon in-flight requests without dropping the screen.
    pub fn cancel(&self) {
        self.scope.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{api_for, product_json};
    use hemline_client::NoticeLevel;
    use hemline_core::{Price, ProductInputError};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn input(name: &str, price: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            price: Price::from_units(price),
            original_price: None,
            category: "c1".to_string(),
            stock: 3,
            images: vec![],
            featured: false,
            description: String::new(),
            sizes: vec![],
        }
    }

    async fn loaded(server: &MockServer) -> ProductsScreen {
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": [
                product_json("p1", "Linen Shirt", 60, "Shirts"),
                product_json("p2", "Wool Coat", 200, "Outerwear"),
            ]})))
            .mount(server)
            .await;
        let mut screen = ProductsScreen::new(&api_for(server));
        screen.load().await;
        screen
    }

    #[tokio::test]
    async fn test_load_and_filter() {
        let server = MockServer::start().await;
        let mut screen = loaded(&server).await;
        assert_eq!(screen.visible().len(), 2);

        screen.filter.search = "coat".to_string();
        assert_eq!(screen.visible()[0].name, "Wool Coat");

        screen.filter = ProductFilter {
            search: String::new(),
            category: Some("shirts".to_string()),
        };
        assert_eq!(screen.visible().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let mut screen = ProductsScreen::new(&api_for(&server));
        screen.load().await;
        assert!(screen.state().is_retryable());
        assert_eq!(screen.notices.latest().unwrap().level, NoticeLevel::Error);

        screen.retry().await;
        assert_eq!(screen.state().value().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_invalid_input_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut screen = ProductsScreen::new(&api_for(&server));
        let err = screen.create(&input("  ", 10)).await.unwrap_err();
        assert!(matches!(
            err,
            AdminError::InvalidProduct(ProductInputError::EmptyName)
        ));
    }

    #[tokio::test]
    async fn test_create_update_delete_keep_list_in_sync() {
        let server = MockServer::start().await;
        let mut screen = loaded(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "product": product_json("p3", "Silk Scarf", 30, "Accessories")
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/products/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": product_json("p1", "Linen Shirt", 55, "Shirts")
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/products/p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
            .mount(&server)
            .await;

        screen.create(&input("Silk Scarf", 30)).await.unwrap();
        screen
            .update(&ProductId::from("p1"), &input("Linen Shirt", 55))
            .await
            .unwrap();
        screen.delete(&ProductId::from("p2")).await.unwrap();

        let names: Vec<_> = screen.visible().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Linen Shirt", "Silk Scarf"]);
        assert_eq!(screen.visible()[0].price, Price::from_units(55));
        assert_eq!(screen.notices.drain().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_row() {
        let server = MockServer::start().await;
        let mut screen = loaded(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/api/products/p1"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "in use"})))
            .mount(&server)
            .await;

        let err = screen.delete(&ProductId::from("p1")).await.unwrap_err();
        assert!(err.to_string().contains("in use"));
        assert_eq!(screen.visible().len(), 2);
    }
}
