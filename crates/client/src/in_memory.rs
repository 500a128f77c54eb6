//! In-process catalog for tests, demos and offline runs.
//!
//! Mirrors the observable behavior of the REST service: stock is reserved
//! when items enter the cart and restored when they leave it, checkout
//! totals the cart and empties it.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use shopfront_catalog::{
    Acknowledgement, CartItem, CheckoutReceipt, NewProduct, Price, Product, ProductUpdate,
};
use shopfront_core::{CartItemId, ProductId};

use crate::api::CatalogApi;
use crate::error::{ApiError, ApiResult};

const PRODUCT_NOT_FOUND: &str = "Product not found";
const CART_ITEM_NOT_FOUND: &str = "Cart item not found";
const NOT_ENOUGH_STOCK: &str = "Not enough stock available";

#[derive(Debug, Clone, Copy)]
struct CartLine {
    id: CartItemId,
    product_id: ProductId,
    quantity: u32,
}

#[derive(Debug, Default)]
struct State {
    products: Vec<Product>,
    cart: Vec<CartLine>,
    last_product_id: i64,
    last_cart_id: i64,
    unreachable: bool,
}

impl State {
    fn product(&self, id: ProductId) -> ApiResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::not_found(PRODUCT_NOT_FOUND))
    }

    fn product_mut(&mut self, id: ProductId) -> ApiResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::not_found(PRODUCT_NOT_FOUND))
    }

    fn line_index(&self, id: CartItemId) -> ApiResult<usize> {
        self.cart
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| ApiError::not_found(CART_ITEM_NOT_FOUND))
    }

    fn render_line(&self, line: &CartLine) -> ApiResult<CartItem> {
        Ok(CartItem {
            id: line.id,
            product_id: line.product_id,
            quantity: line.quantity,
            product: self.product(line.product_id)?.clone(),
        })
    }

    fn insert_product(&mut self, product: NewProduct) -> ApiResult<Product> {
        if self.products.iter().any(|p| p.name == product.name) {
            return Err(ApiError::bad_request("Product is already registered"));
        }
        self.last_product_id += 1;
        let created = product.into_product(ProductId::new(self.last_product_id));
        self.products.push(created.clone());
        Ok(created)
    }
}

/// Catalog held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: Mutex<State>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with `products` (ids assigned from 1).
    pub fn with_products(products: impl IntoIterator<Item = NewProduct>) -> Self {
        let catalog = Self::new();
        if let Ok(mut state) = catalog.inner.lock() {
            for product in products {
                if let Err(err) = state.insert_product(product) {
                    tracing::warn!(error = %err, "skipping seed product");
                }
            }
        }
        catalog
    }

    /// Small stationery catalog used by the `--demo` front-end.
    pub fn demo() -> Self {
        let seed = [
            ("Pen", "Smooth blue ink ballpoint", 150, 25),
            ("Pencil", "HB graphite, pre-sharpened", 80, 40),
            ("Notebook", "A5 dotted, 120 pages", 450, 12),
            ("Eraser", "Soft vinyl, dust-free", 120, 0),
            ("Stapler", "Desktop, 20 sheet capacity", 1250, 5),
        ];
        Self::with_products(seed.into_iter().map(|(name, description, cents, stock)| NewProduct {
            name: name.to_string(),
            description: description.to_string(),
            price: Price::from_cents(cents),
            stock,
        }))
    }

    /// Make every subsequent call fail as if the service were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        if let Ok(mut state) = self.inner.lock() {
            state.unreachable = unreachable;
        }
    }

    fn state(&self) -> ApiResult<MutexGuard<'_, State>> {
        let state = self
            .inner
            .lock()
            .map_err(|_| ApiError::Network("in-memory catalog lock poisoned".to_string()))?;
        if state.unreachable {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(state)
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        Ok(self.state()?.products.clone())
    }

    async fn get_product(&self, id: ProductId) -> ApiResult<Product> {
        self.state()?.product(id).cloned()
    }

    async fn create_product(&self, product: NewProduct) -> ApiResult<Product> {
        self.state()?.insert_product(product)
    }

    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> ApiResult<Product> {
        let mut state = self.state()?;
        let product = state.product_mut(id)?;
        update.apply_to(product);
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> ApiResult<Acknowledgement> {
        let mut state = self.state()?;
        state.product(id)?;
        state.products.retain(|p| p.id != id);
        // Orphaned lines would make the cart unreadable.
        state.cart.retain(|l| l.product_id != id);
        Ok(Acknowledgement {
            message: format!("Product with ID {id} has been deleted"),
        })
    }

    async fn list_cart_items(&self) -> ApiResult<Vec<CartItem>> {
        let state = self.state()?;
        state.cart.iter().map(|line| state.render_line(line)).collect()
    }

    async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> ApiResult<CartItem> {
        let mut state = self.state()?;
        let product = state.product_mut(product_id)?;
        if product.stock < i64::from(quantity) {
            return Err(ApiError::bad_request(NOT_ENOUGH_STOCK));
        }
        product.stock -= i64::from(quantity);

        let existing = state.cart.iter().position(|l| l.product_id == product_id);
        let line = match existing {
            Some(index) => {
                state.cart[index].quantity += quantity;
                state.cart[index]
            }
            None => {
                state.last_cart_id += 1;
                let line = CartLine {
                    id: CartItemId::new(state.last_cart_id),
                    product_id,
                    quantity,
                };
                state.cart.push(line);
                line
            }
        };
        state.render_line(&line)
    }

    async fn update_cart_item(&self, id: CartItemId, quantity: u32) -> ApiResult<CartItem> {
        let mut state = self.state()?;
        let index = state.line_index(id)?;
        let line = state.cart[index];

        let diff = i64::from(quantity) - i64::from(line.quantity);
        let product = state.product_mut(line.product_id)?;
        if diff > 0 && product.stock < diff {
            return Err(ApiError::bad_request(NOT_ENOUGH_STOCK));
        }
        product.stock -= diff;

        state.cart[index].quantity = quantity;
        let line = state.cart[index];
        state.render_line(&line)
    }

    async fn remove_from_cart(&self, id: CartItemId) -> ApiResult<Acknowledgement> {
        let mut state = self.state()?;
        let index = state.line_index(id)?;
        let line = state.cart.remove(index);
        if let Ok(product) = state.product_mut(line.product_id) {
            product.stock += i64::from(line.quantity);
        }
        Ok(Acknowledgement {
            message: format!("Cart item with ID {id} has been removed"),
        })
    }

    async fn clear_cart(&self) -> ApiResult<Acknowledgement> {
        let mut state = self.state()?;
        let lines = std::mem::take(&mut state.cart);
        for line in lines {
            if let Ok(product) = state.product_mut(line.product_id) {
                product.stock += i64::from(line.quantity);
            }
        }
        Ok(Acknowledgement {
            message: "Cart has been cleared".to_string(),
        })
    }

    async fn checkout(&self) -> ApiResult<CheckoutReceipt> {
        let mut state = self.state()?;
        if state.cart.is_empty() {
            return Err(ApiError::bad_request("Cart is empty"));
        }

        let mut total = Price::ZERO;
        for line in &state.cart {
            let product = state.product(line.product_id).map_err(|_| {
                ApiError::not_found(format!("Product with ID {} not found", line.product_id))
            })?;
            total = total + product.price.times(line.quantity);
        }

        // Stock was already reserved when the lines were added.
        let items_purchased = state.cart.len() as u32;
        state.cart.clear();

        Ok(CheckoutReceipt {
            message: "Checkout completed successfully".to_string(),
            total_amount: total,
            items_purchased,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str, cents: i64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: String::new(),
            price: Price::from_cents(cents),
            stock,
        }
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::with_products([new_product("Pen", 150, 5), new_product("Ink", 300, 1)])
    }

    async fn stock_of(catalog: &InMemoryCatalog, id: i64) -> i64 {
        catalog.get_product(ProductId::new(id)).await.unwrap().stock
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let catalog = catalog();
        let err = catalog.create_product(new_product("Pen", 1, 1)).await.unwrap_err();
        assert_eq!(err, ApiError::bad_request("Product is already registered"));
        assert_eq!(catalog.list_products().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn adding_reserves_stock_and_merges_lines() {
        let catalog = catalog();
        let pen = ProductId::new(1);

        let first = catalog.add_to_cart(pen, 1).await.unwrap();
        let second = catalog.add_to_cart(pen, 2).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 3);
        assert_eq!(second.product.stock, 2);
        assert_eq!(catalog.list_cart_items().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn adding_beyond_stock_fails_without_side_effects() {
        let catalog = catalog();
        let err = catalog.add_to_cart(ProductId::new(2), 2).await.unwrap_err();

        assert_eq!(err.detail(), NOT_ENOUGH_STOCK);
        assert_eq!(stock_of(&catalog, 2).await, 1);
        assert!(catalog.list_cart_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_moves_only_the_difference() {
        let catalog = catalog();
        let line = catalog.add_to_cart(ProductId::new(1), 2).await.unwrap();

        catalog.update_cart_item(line.id, 4).await.unwrap();
        assert_eq!(stock_of(&catalog, 1).await, 1);

        catalog.update_cart_item(line.id, 1).await.unwrap();
        assert_eq!(stock_of(&catalog, 1).await, 4);

        let err = catalog.update_cart_item(line.id, 9).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn remove_and_clear_restore_stock() {
        let catalog = catalog();
        let pen = catalog.add_to_cart(ProductId::new(1), 2).await.unwrap();
        catalog.add_to_cart(ProductId::new(2), 1).await.unwrap();

        catalog.remove_from_cart(pen.id).await.unwrap();
        assert_eq!(stock_of(&catalog, 1).await, 5);

        catalog.clear_cart().await.unwrap();
        assert_eq!(stock_of(&catalog, 2).await, 1);
        assert!(catalog.list_cart_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn checkout_totals_and_empties_cart() {
        let catalog = catalog();
        catalog.add_to_cart(ProductId::new(1), 2).await.unwrap();
        catalog.add_to_cart(ProductId::new(2), 1).await.unwrap();

        let receipt = catalog.checkout().await.unwrap();
        assert_eq!(receipt.total_amount, Price::from_cents(600));
        assert_eq!(receipt.items_purchased, 2);
        assert!(catalog.list_cart_items().await.unwrap().is_empty());
        // Reserved stock is not restored by checkout.
        assert_eq!(stock_of(&catalog, 1).await, 3);

        let err = catalog.checkout().await.unwrap_err();
        assert_eq!(err, ApiError::bad_request("Cart is empty"));
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let catalog = catalog();
        assert_eq!(
            catalog.delete_product(ProductId::new(99)).await.unwrap_err(),
            ApiError::not_found(PRODUCT_NOT_FOUND)
        );
        assert_eq!(
            catalog.remove_from_cart(CartItemId::new(99)).await.unwrap_err(),
            ApiError::not_found(CART_ITEM_NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn unreachable_catalog_fails_every_call() {
        let catalog = catalog();
        catalog.set_unreachable(true);
        assert!(matches!(catalog.list_products().await, Err(ApiError::Network(_))));

        catalog.set_unreachable(false);
        assert!(catalog.list_products().await.is_ok());
    }

    #[tokio::test]
    async fn deleting_a_product_drops_its_cart_lines() {
        let catalog = catalog();
        catalog.add_to_cart(ProductId::new(1), 1).await.unwrap();
        catalog.delete_product(ProductId::new(1)).await.unwrap();

        assert!(catalog.list_cart_items().await.unwrap().is_empty());
    }
}
