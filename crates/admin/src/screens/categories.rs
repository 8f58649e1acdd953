//! Categories management screen.

use hemline_client::{ApiClient, ApiError, FetchScope, Loadable, Notifications};
use hemline_core::{Category, CategoryId, CategoryInput};

use super::{contains_ci, load_into};
use crate::error::AdminError;

#[derive(Debug)]
pub struct CategoriesScreen {
    scope: FetchScope,
    api: ApiClient,
    categories: Loadable<Vec<Category>>,
    pub search: String,
    pub notices: Notifications,
}

impl CategoriesScreen {
    #[must_use]
    pub fn new(api: &ApiClient) -> Self {
        let scope = FetchScope::new();
        let api = scope.client(api);
        Self {
            scope,
            api,
            categories: Loadable::Idle,
            search: String::new(),
            notices: Notifications::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &Loadable<Vec<Category>> {
        &self.categories
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&Category> {
        let search = self.search.trim();
        self.categories
            .value()
            .map(|all| all.iter().filter(|c| contains_ci(&c.name, search)).collect())
            .unwrap_or_default()
    }

    pub async fn load(&mut self) {
        load_into(
            &mut self.categories,
            &mut self.notices,
            "categories",
            self.api.list_categories(),
        )
        .await;
    }

    pub async fn retry(&mut self) {
        if matches!(self.categories, Loadable::Failed { .. }) {
            self.load().await;
        }
    }

    /// # Errors
    ///
    /// Returns an error if the name is blank or the backend rejects it.
    pub async fn create(&mut self, input: &CategoryInput) -> Result<Category, AdminError> {
        let input = normalized(input)?;
        let result = self.api.create_category(&input).await;
        let created = self.report(result, "Category created", "create category")?;
        if let Some(categories) = self.categories.value_mut() {
            categories.push(created.clone());
        }
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns an error if the name is blank or the backend rejects it.
    pub async fn update(&mut self, id: &CategoryId, input: &CategoryInput) -> Result<Category, AdminError> {
        let input = normalized(input)?;
        let result = self.api.update_category(id, &input).await;
        let mut updated = self.report(result, "Category updated", "update category")?;
        if let Some(slot) = self
            .categories
            .value_mut()
            .and_then(|categories| categories.iter_mut().find(|c| &c.id == id))
        {
            // Counts are derived locally; an update response may omit them
            if updated.product_count == 0 {
                updated.product_count = slot.product_count;
            }
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    pub async fn delete(&mut self, id: &CategoryId) -> Result<(), AdminError> {
        let result = self.api.delete_category(id).await;
        self.report(result, "Category deleted", "delete category")?;
        if let Some(categories) = self.categories.value_mut() {
            categories.retain(|c| &c.id != id);
        }
        Ok(())
    }

    fn report<T>(&mut self, result: Result<T, ApiError>, success: &str, action: &str) -> Result<T, AdminError> {
        match result {
            Ok(value) => {
                self.notices.success(success);
                Ok(value)
            }
            Err(e) => {
                tracing::error!(error = %e, action, "Category action failed");
                self.notices.error(format!("Failed to {action}: {e}"));
                Err(e.into())
            }
        }
    }

    pub fn cancel(&self) {
        self.scope.cancel();
    }
}

fn normalized(input: &CategoryInput) -> Result<CategoryInput, AdminError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AdminError::MissingCategoryName);
    }
    Ok(CategoryInput {
        name: name.to_string(),
        description: input.description.trim().to_string(),
    })
}
