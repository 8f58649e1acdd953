//! Plain-text rendering for command results.

#![allow(clippy::print_stdout)]

use hemline_admin::DashboardStats;
use hemline_core::{Category, Order, Product};
use hemline_storefront::CartStore;

pub fn line(message: &str) {
    println!("{message}");
}

pub fn products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found");
        return;
    }
    for product in products {
        let stock = if product.in_stock() {
            format!("{} in stock", product.stock)
        } else {
            "sold out".to_string()
        };
        let discount = product
            .discount_percent()
            .map(|pct| format!(" (-{pct}%)"))
            .unwrap_or_default();
        println!(
            "{:<26} {:<32} {:>10}{discount}  {stock}",
            product.id.as_str(),
            product.name,
            product.price.to_string()
        );
    }
}

pub fn product_detail(product: &Product) {
    println!("{} ({})", product.name, product.id);
    match product.original_price {
        Some(original) if product.discount_percent().is_some() => {
            println!("Price:    {} (was {original})", product.price);
        }
        _ => println!("Price:    {}", product.price),
    }
    if let Some(category) = product.category_name() {
        println!("Category: {category}");
    }
    println!("Stock:    {}", product.stock);
    if !product.sizes.is_empty() {
        println!("Sizes:    {}", product.sizes.join(", "));
    }
    if let Some(image) = product.primary_image() {
        println!("Image:    {image}");
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
}

pub fn categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories found");
        return;
    }
    for category in categories {
        println!(
            "{:<26} {:<24} {:>4} products",
            category.id.as_str(),
            category.name,
            category.product_count
        );
    }
}

pub fn cart(cart: &CartStore) {
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }
    for item in cart.lines() {
        let size = if item.selected_size.is_empty() {
            String::new()
        } else {
            format!(" [{}]", item.selected_size)
        };
        println!(
            "{}  {} x {}{size}  {}",
            item.cart_line_id,
            item.quantity,
            item.name,
            item.line_total()
        );
    }
    println!("{} items, total {}", cart.total_items(), cart.total_price());
}

pub fn confirmation(order: &Order) {
    match &order.id {
        Some(id) => println!("Order {id} placed"),
        None => println!("Order placed"),
    }
    println!("Total: {}", order.total);
    println!("We will contact {} at {} to confirm delivery.", order.customer_name, order.customer_phone);
}

pub fn orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders found");
        return;
    }
    for order in orders {
        let id = order.id.as_ref().map_or("-", |id| id.as_str());
        let placed = order
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{id:<26} {:<11} {:<20} {:>10}  {placed}",
            order.status.to_string(),
            order.customer_name,
            order.total.to_string()
        );
    }
}

pub fn dashboard(stats: &DashboardStats, low_stock_threshold: u32) {
    println!("Products: {}", stats.product_count);
    println!("Orders:   {} ({} open)", stats.order_count, stats.open_orders());
    println!("Revenue:  {}", stats.revenue);
    for (status, count) in &stats.by_status {
        println!("  {status:<11} {count}");
    }
    if !stats.low_stock.is_empty() {
        println!();
        println!("Low stock (<= {low_stock_threshold}):");
        for product in &stats.low_stock {
            println!("  {:<32} {}", product.name, product.stock);
        }
    }
}
