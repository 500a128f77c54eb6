//! The catalog service surface, one method per endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use shopfront_catalog::{
    Acknowledgement, CartItem, CheckoutReceipt, NewProduct, Product, ProductUpdate,
};
use shopfront_core::{CartItemId, ProductId};

use crate::error::ApiResult;

/// Remote products and cart.
///
/// Every method maps to exactly one HTTP call (see the route in each doc) and
/// returns the decoded body.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /products/`
    async fn list_products(&self) -> ApiResult<Vec<Product>>;

    /// `GET /products/{id}`
    async fn get_product(&self, id: ProductId) -> ApiResult<Product>;

    /// `POST /products/`
    async fn create_product(&self, product: NewProduct) -> ApiResult<Product>;

    /// `PUT /products/{id}`
    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> ApiResult<Product>;

    /// `DELETE /products/{id}`
    async fn delete_product(&self, id: ProductId) -> ApiResult<Acknowledgement>;

    /// `GET /cart/`
    async fn list_cart_items(&self) -> ApiResult<Vec<CartItem>>;

    /// `POST /cart/` with `{product_id, quantity}`
    async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> ApiResult<CartItem>;

    /// `PUT /cart/{id}` with `{quantity}`
    async fn update_cart_item(&self, id: CartItemId, quantity: u32) -> ApiResult<CartItem>;

    /// `DELETE /cart/{id}`
    async fn remove_from_cart(&self, id: CartItemId) -> ApiResult<Acknowledgement>;

    /// `DELETE /cart/`
    async fn clear_cart(&self) -> ApiResult<Acknowledgement>;

    /// `POST /cart/checkout`
    async fn checkout(&self) -> ApiResult<CheckoutReceipt>;
}

#[async_trait]
impl<S> CatalogApi for Arc<S>
where
    S: CatalogApi + ?Sized,
{
    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        (**self).list_products().await
    }

    async fn get_product(&self, id: ProductId) -> ApiResult<Product> {
        (**self).get_product(id).await
    }

    async fn create_product(&self, product: NewProduct) -> ApiResult<Product> {
        (**self).create_product(product).await
    }

    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> ApiResult<Product> {
        (**self).update_product(id, update).await
    }

    async fn delete_product(&self, id: ProductId) -> ApiResult<Acknowledgement> {
        (**self).delete_product(id).await
    }

    async fn list_cart_items(&self) -> ApiResult<Vec<CartItem>> {
        (**self).list_cart_items().await
    }

    async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> ApiResult<CartItem> {
        (**self).add_to_cart(product_id, quantity).await
    }

    async fn update_cart_item(&self, id: CartItemId, quantity: u32) -> ApiResult<CartItem> {
        (**self).update_cart_item(id, quantity).await
    }

    async fn remove_from_cart(&self, id: CartItemId) -> ApiResult<Acknowledgement> {
        (**self).remove_from_cart(id).await
    }

    async fn clear_cart(&self) -> ApiResult<Acknowledgement> {
        (**self).clear_cart().await
    }

    async fn checkout(&self) -> ApiResult<CheckoutReceipt> {
        (**self).checkout().await
    }
}
