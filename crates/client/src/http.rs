//! `reqwest`-backed catalog client.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use shopfront_catalog::{
    Acknowledgement, CartItem, CartItemUpdate, CheckoutReceipt, NewCartItem, NewProduct, Product,
    ProductUpdate,
};
use shopfront_core::{CartItemId, ProductId};

use crate::api::CatalogApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// HTTP client for the catalog service.
///
/// Holds one connection pool for its lifetime; the base URL cannot change
/// after construction.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl HttpCatalogClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        tracing::debug!(%method, %url, "catalog request");
        self.http.request(method, url)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ApiResult<T> {
        let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = ApiError::from_response(status.as_u16(), &body);
            tracing::debug!(status = status.as_u16(), error = %err, "catalog request rejected");
            return Err(err);
        }

        resp.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.send(self.request(Method::GET, "/products/")).await
    }

    async fn get_product(&self, id: ProductId) -> ApiResult<Product> {
        self.send(self.request(Method::GET, &format!("/products/{id}"))).await
    }

    async fn create_product(&self, product: NewProduct) -> ApiResult<Product> {
        self.send(self.request(Method::POST, "/products/").json(&product)).await
    }

    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> ApiResult<Product> {
        self.send(self.request(Method::PUT, &format!("/products/{id}")).json(&update))
            .await
    }

    async fn delete_product(&self, id: ProductId) -> ApiResult<Acknowledgement> {
        self.send(self.request(Method::DELETE, &format!("/products/{id}"))).await
    }

    async fn list_cart_items(&self) -> ApiResult<Vec<CartItem>> {
        self.send(self.request(Method::GET, "/cart/")).await
    }

    async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> ApiResult<CartItem> {
        let body = NewCartItem { product_id, quantity };
        self.send(self.request(Method::POST, "/cart/").json(&body)).await
    }

    async fn update_cart_item(&self, id: CartItemId, quantity: u32) -> ApiResult<CartItem> {
        let body = CartItemUpdate { quantity };
        self.send(self.request(Method::PUT, &format!("/cart/{id}")).json(&body))
            .await
    }

    async fn remove_from_cart(&self, id: CartItemId) -> ApiResult<Acknowledgement> {
        self.send(self.request(Method::DELETE, &format!("/cart/{id}"))).await
    }

    async fn clear_cart(&self) -> ApiResult<Acknowledgement> {
        self.send(self.request(Method::DELETE, "/cart/")).await
    }

    async fn checkout(&self) -> ApiResult<CheckoutReceipt> {
        self.send(self.request(Method::POST, "/cart/checkout")).await
    }
}
