//! Product categories.

use serde::{Deserialize, Serialize};

use super::id::CategoryId;
use super::product::Product;

/// A catalog category.
///
/// `product_count` is derived: the backend sends it on some endpoints only,
/// so [`with_product_counts`] recomputes it from a product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub product_count: u32,
}

/// Create/update payload for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub description: String,
}

impl From<&Category> for CategoryInput {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
        }
    }
}

/// Fill in `product_count` for every category from `products`.
///
/// A product belongs to a category when its category reference matches the
/// category ID or name.
#[must_use]
pub fn with_product_counts(mut categories: Vec<Category>, products: &[Product]) -> Vec<Category> {
    for category in &mut categories {
        let count = products
            .iter()
            .filter_map(|p| p.category.as_ref())
            .filter(|c| c.matches(category.id.as_str()) || c.matches(&category.name))
            .count();
        category.product_count = u32::try_from(count).unwrap_or(u32::MAX);
    }
    categories
}
