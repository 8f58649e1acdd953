//! Product records as returned by the catalog API, and the admin payload used
//! to create or edit them.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{CategoryId, ProductId, RawId};
use super::price::Price;

/// Reference from a product to its category.
///
/// Depending on the endpoint the backend either embeds the category document
/// or sends a bare identifier/name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Embedded {
        #[serde(alias = "_id")]
        id: CategoryId,
        name: String,
    },
    Named(#[serde(deserialize_with = "RawId::deserialize_string")] String),
}

impl CategoryRef {
    /// Human-readable category name (the bare value when not embedded).
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Embedded { name, .. } => name,
            Self::Named(value) => value,
        }
    }

    /// Returns `true` if `needle` matches the category ID or name
    /// (case-insensitive).
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        match self {
            Self::Embedded { id, name } => {
                id.as_str() == needle || name.eq_ignore_ascii_case(needle)
            }
            Self::Named(value) => value.eq_ignore_ascii_case(needle),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub stock: u32,
    /// Ordered gallery; the first entry is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    /// Legacy single-image field, used when `images` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sizes: Vec<String>,
}

impl Product {
    /// The image to show in listings.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .iter()
            .map(String::as_str)
            .find(|url| !url.is_empty())
            .or(self.image.as_deref())
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Returns `true` if `quantity` units can be supplied from stock.
    #[must_use]
    pub const fn can_supply(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }

    /// Whole-number discount relative to `original_price`, if discounted.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?.amount();
        let current = self.price.amount();
        if original <= current || original <= Decimal::ZERO {
            return None;
        }
        ((original - current) / original * Decimal::ONE_HUNDRED)
            .round()
            .to_u32()
    }

    /// Returns `true` if the product can be ordered in `size`.
    ///
    /// Products without a size list accept any size label.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.is_empty() || self.sizes.iter().any(|s| s.eq_ignore_ascii_case(size))
    }

    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(CategoryRef::name)
    }
}

/// Errors from [`ProductInput::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductInputError {
    #[error("product name is required")]
    EmptyName,
    #[error("price cannot be negative")]
    NegativePrice,
    #[error("original price must not be lower than the selling price")]
    OriginalBelowPrice,
}

/// Create/update payload for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    pub category: String,
    pub stock: u32,
    pub images: Vec<String>,
    pub featured: bool,
    pub description: String,
    pub sizes: Vec<String>,
}

impl ProductInput {
    /// Check the payload before sending it.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ProductInputError> {
        if self.name.trim().is_empty() {
            return Err(ProductInputError::EmptyName);
        }
        if self.price.is_negative() {
            return Err(ProductInputError::NegativePrice);
        }
        if let Some(original) = self.original_price
            && original < self.price
        {
            return Err(ProductInputError::OriginalBelowPrice);
        }
        Ok(())
    }
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        let category = match &product.category {
            Some(CategoryRef::Embedded { id, .. }) => id.to_string(),
            Some(CategoryRef::Named(value)) => value.clone(),
            None => String::new(),
        };
        let images = if product.images.is_empty() {
            product.image.iter().cloned().collect()
        } else {
            product.images.clone()
        };

        Self {
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            category,
            stock: product.stock,
            images,
            featured: product.featured,
            description: product.description.clone(),
            sizes: product.sizes.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tee() -> Product {
        serde_json::from_value(json!({
            "_id": "p1",
            "name": "Tee A",
            "price": 100,
            "originalPrice": 125,
            "category": {"_id": "c1", "name": "Shirts"},
            "stock": 3,
            "images": ["front.jpg", "back.jpg"],
            "featured": true,
            "sizes": ["S", "M", "L"]
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_full_product() {
        let product = tee();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price, Price::from_units(100));
        assert_eq!(product.category_name(), Some("Shirts"));
        assert!(product.featured);
    }

    #[test]
    fn test_deserialize_minimal_product() {
        let product: Product =
            serde_json::from_value(json!({"id": 1, "name": "Cap", "price": "12.50"})).unwrap();
        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.stock, 0);
        assert!(product.images.is_empty());
        assert!(product.category.is_none());
        assert!(!product.in_stock());
    }

    #[test]
    fn test_category_as_plain_value() {
        let product: Product = serde_json::from_value(
            json!({"id": 2, "name": "Hoodie", "price": 60, "category": "Outerwear"}),
        )
        .unwrap();
        assert_eq!(product.category_name(), Some("Outerwear"));
        assert!(product.category.unwrap().matches("outerwear"));
    }

    #[test]
    fn test_primary_image_prefers_gallery() {
        let mut product = tee();
        assert_eq!(product.primary_image(), Some("front.jpg"));

        product.images.clear();
        product.image = Some("single.jpg".to_string());
        assert_eq!(product.primary_image(), Some("single.jpg"));

        product.image = None;
        assert_eq!(product.primary_image(), None);
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(tee().discount_percent(), Some(20));

        let mut product = tee();
        product.original_price = None;
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn test_offers_size() {
        let mut product = tee();
        assert!(product.offers_size("m"));
        assert!(!product.offers_size("XL"));
        product.sizes.clear();
        assert!(product.offers_size("XL"));
    }

    #[test]
    fn test_input_validation() {
        let mut input = ProductInput::from(&tee());
        assert_eq!(input.category, "c1");
        assert!(input.validate().is_ok());

        input.original_price = Some(Price::from_units(50));
        assert_eq!(input.validate(), Err(ProductInputError::OriginalBelowPrice));

        input.original_price = None;
        input.price = Price::from_units(-1);
        assert_eq!(input.validate(), Err(ProductInputError::NegativePrice));

        input.name = "  ".to_string();
        assert_eq!(input.validate(), Err(ProductInputError::EmptyName));
    }
}
