//! `shopfront-client`
//!
//! **Responsibility:** talk to the catalog REST service.
//!
//! This crate provides:
//! - `CatalogApi`, one async method per endpoint
//! - `HttpCatalogClient`, the `reqwest` implementation
//! - `InMemoryCatalog`, an in-process stand-in with the service's semantics
//!
//! Calls are one request each: no retry, no cache, no timeout. Failures come
//! back as `ApiError` and the caller decides how to report them.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod in_memory;

pub use api::CatalogApi;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use http::HttpCatalogClient;
pub use in_memory::InMemoryCatalog;
