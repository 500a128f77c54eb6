//! Plain-text rendering of view state. No colors here; the binary styles notices.

use std::fmt::Write;

use shopfront_catalog::{CartItem, CheckoutReceipt, Price, Product};

use crate::widget::CartWidget;

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn stock_label(product: &Product) -> String {
    if product.in_stock() {
        product.stock.to_string()
    } else {
        "out".to_string()
    }
}

pub fn product_table(products: &[&Product], widget: &CartWidget) -> String {
    let mut out = String::new();
    if products.is_empty() {
        out.push_str("No products found.\n");
    } else {
        let name_width = products
            .iter()
            .map(|p| p.name.chars().count())
            .max()
            .unwrap_or(0)
            .clamp(4, 24);
        let _ = writeln!(
            out,
            "{:>4}  {:<name_width$}  {:>9}  {:>5}  DESCRIPTION",
            "ID", "NAME", "PRICE", "STOCK"
        );
        for product in products {
            let _ = writeln!(
                out,
                "{:>4}  {:<name_width$}  {:>9}  {:>5}  {}",
                product.id,
                truncate(&product.name, name_width),
                product.price.to_string(),
                stock_label(product),
                truncate(product.description(), 40),
            );
        }
    }
    let _ = writeln!(out, "{}", widget.label());
    out
}

pub fn product_details(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", product.name, product.id);
    let description = match product.description() {
        "" => "-",
        text => text,
    };
    let _ = writeln!(out, "  description: {description}");
    let _ = writeln!(out, "  price:       {}", product.price);
    let _ = writeln!(out, "  stock:       {}", product.stock);
    out
}

pub fn cart_table(items: &[CartItem], total: Price) -> String {
    if items.is_empty() {
        return "Your cart is empty.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<24}  {:>9}  {:>4}  {:>10}",
        "ITEM", "PRODUCT", "PRICE", "QTY", "SUBTOTAL"
    );
    for item in items {
        let _ = writeln!(
            out,
            "{:>4}  {:<24}  {:>9}  {:>4}  {:>10}",
            item.id,
            truncate(&item.product.name, 24),
            item.product.price.to_string(),
            item.quantity,
            item.line_total().to_string(),
        );
    }
    let _ = writeln!(out, "Total: {total}");
    out
}

pub fn receipt(receipt: &CheckoutReceipt) -> String {
    format!(
        "{}\n  items purchased: {}\n  total paid:      {}\n",
        receipt.message, receipt.items_purchased, receipt.total_amount
    )
}
