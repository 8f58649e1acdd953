//! Catalog browsing with cached reads.
//!
//! Products and categories are cached with `moka` for the configured TTL.
//! Filtering and sorting happen client-side on the cached list, so changing
//! a filter never costs a request.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use hemline_client::{ApiClient, ApiError};
use hemline_core::{Category, Price, Product, ProductId, with_product_counts};
use moka::future::Cache;
use tracing::{debug, instrument};

const CACHE_CAPACITY: u64 = 256;

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
    Product(ProductId),
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Box<Product>),
    Categories(Arc<Vec<Category>>),
}

// =============================================================================
// Filtering
// =============================================================================

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Featured products first, otherwise backend order.
    #[default]
    Featured,
    PriceLowHigh,
    PriceHighLow,
    Name,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "featured" => Ok(Self::Featured),
            "price-asc" | "price_low_high" | "price" => Ok(Self::PriceLowHigh),
            "price-desc" | "price_high_low" => Ok(Self::PriceHighLow),
            "name" => Ok(Self::Name),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Client-side product filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Category id or name (case-insensitive).
    pub category: Option<String>,
    /// Case-insensitive substring of name or description.
    pub search: Option<String>,
    pub featured_only: bool,
    pub in_stock_only: bool,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub sort: SortOrder,
}

impl ProductFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category.as_deref()
            && !product
                .category
                .as_ref()
                .is_some_and(|c| c.matches(category))
        {
            return false;
        }
        if let Some(search) = self.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            let needle = search.to_lowercase();
            if !product.name.to_lowercase().contains(&needle)
                && !product.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if self.featured_only && !product.featured {
            return false;
        }
        if self.in_stock_only && !product.in_stock() {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        true
    }

    /// Filter and sort `products`.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut matched: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        // Stable sorts keep backend order among equals
        match self.sort {
            SortOrder::Featured => matched.sort_by_key(|p| !p.featured),
            SortOrder::PriceLowHigh => matched.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceHighLow => matched.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Name => matched.sort_by(|a, b| compare_names(&a.name, &b.name)),
        }
        matched
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

// =============================================================================
// Catalog
// =============================================================================

/// Cached read access to products and categories.
#[derive(Clone)]
pub struct Catalog {
    api: ApiClient,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("api", &self.api)
            .field("cached_entries", &self.cache.entry_count())
            .finish()
    }
}

impl Catalog {
    #[must_use]
    pub fn new(api: ApiClient, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(ttl)
            .build();
        Self { api, cache }
    }

    /// All products, from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the products have to be fetched and the request fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.cache.get(&CacheKey::Products).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products = Arc::new(self.api.list_products().await?);
        self.cache
            .insert(CacheKey::Products, CacheValue::Products(Arc::clone(&products)))
            .await;
        Ok(products)
    }

    /// Products matching `filter`, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the product list cannot be loaded.
    pub async fn browse(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        Ok(filter.apply(&self.products().await?))
    }

    /// Featured products for the landing view.
    ///
    /// # Errors
    ///
    /// Returns an error if the product list cannot be loaded.
    pub async fn featured(&self) -> Result<Vec<Product>, ApiError> {
        let filter = ProductFilter {
            featured_only: true,
            ..ProductFilter::default()
        };
        self.browse(&filter).await
    }

    /// A single product, from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the product has to be fetched and the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let key = CacheKey::Product(id.clone());
        if let Some(CacheValue::Product(product)) = self.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product = self.api.get_product(id).await?;
        self.cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Categories with product counts derived from the product list.
    ///
    /// # Errors
    ///
    /// Returns an error if either list cannot be loaded.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Arc<Vec<Category>>, ApiError> {
        if let Some(CacheValue::Categories(categories)) = self.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let (categories, products) = tokio::try_join!(self.api.list_categories(), self.products())?;
        let categories = Arc::new(with_product_counts(categories, &products));
        self.cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(Arc::clone(&categories)),
            )
            .await;
        Ok(categories)
    }

    /// Drop every cached entry.
    pub async fn invalidate(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        debug!("Catalog cache invalidated");
    }
}
