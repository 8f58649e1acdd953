//! Dashboard summary.

use hemline_client::{ApiClient, ApiError};
use hemline_core::{Order, OrderStatus, Price, Product};

/// Headline numbers for the admin landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub product_count: usize,
    /// Products at or below the low-stock threshold, lowest stock first.
    pub low_stock: Vec<Product>,
    pub order_count: usize,
    /// Sum of order totals, cancelled orders excluded.
    pub revenue: Price,
    /// Order count per status, in workflow order.
    pub by_status: Vec<(OrderStatus, usize)>,
}

impl DashboardStats {
    /// Summarize already-loaded products and orders.
    #[must_use]
    pub fn summarize(products: &[Product], orders: &[Order], low_stock_threshold: u32) -> Self {
        let mut low_stock: Vec<Product> = products
            .iter()
            .filter(|p| p.stock <= low_stock_threshold)
            .cloned()
            .collect();
        low_stock.sort_by_key(|p| p.stock);

        let revenue = orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .map(|o| o.total)
            .sum();

        let by_status = OrderStatus::all()
            .into_iter()
            .map(|status| (status, orders.iter().filter(|o| o.status == status).count()))
            .collect();

        Self {
            product_count: products.len(),
            low_stock,
            order_count: orders.len(),
            revenue,
            by_status,
        }
    }

    /// Orders still waiting on the shop (pending or processing).
    #[must_use]
    pub fn open_orders(&self) -> usize {
        self.by_status
            .iter()
            .filter(|(status, _)| matches!(status, OrderStatus::Pending | OrderStatus::Processing))
            .map(|(_, count)| count)
            .sum()
    }
}

/// Fetch products and orders concurrently and summarize them.
///
/// # Errors
///
/// Returns an error if either list cannot be loaded.
#[tracing::instrument(skip(api))]
pub async fn load_dashboard(api: &ApiClient, low_stock_threshold: u32) -> Result<DashboardStats, ApiError> {
    let (products, orders) = tokio::try_join!(api.list_products(), api.list_orders())?;
    let stats = DashboardStats::summarize(&products, &orders, low_stock_threshold);
    tracing::debug!(
        products = stats.product_count,
        orders = stats.order_count,
        low_stock = stats.low_stock.len(),
        "Dashboard loaded"
    );
    Ok(stats)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{api_for, order_json, product_json};
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn with_stock(mut product: Value, stock: u32) -> Value {
        product["stock"] = json!(stock);
        product
    }

    #[tokio::test]
    async fn test_load_dashboard() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                with_stock(product_json("p1", "Tee", 20, "Shirts"), 12),
                with_stock(product_json("p2", "Cap", 15, "Hats"), 2),
                with_stock(product_json("p3", "Sock", 5, "Socks"), 0),
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
                order_json("o1", "Ada", "pending"),
                order_json("o2", "Grace", "delivered"),
                order_json("o3", "Alan", "cancelled"),
            ]})))
            .mount(&server)
            .await;

        let stats = load_dashboard(&api_for(&server), 5).await.unwrap();
        assert_eq!(stats.product_count, 3);
        let low: Vec<_> = stats.low_stock.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(low, vec!["Sock", "Cap"]);
        assert_eq!(stats.order_count, 3);
        // order_json totals are 100 each
        assert_eq!(stats.revenue, Price::from_units(200));
        assert_eq!(stats.open_orders(), 1);
        assert_eq!(stats.by_status.len(), 5);
    }

    #[test]
    fn test_summarize_empty() {
        let stats = DashboardStats::summarize(&[], &[], 5);
        assert_eq!(stats.revenue, Price::ZERO);
        assert!(stats.low_stock.is_empty());
        assert!(stats.by_status.iter().all(|(_, n)| *n == 0));
    }
}
