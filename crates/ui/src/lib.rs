//! `shopfront-ui`
//!
//! **Responsibility:** the client-side state a storefront front-end renders.
//!
//! This crate provides:
//! - `ProductListView`: searchable product grid, product dialogs, add-to-cart
//! - `CartView`: cart lines with quantity controls, clear and checkout
//! - `Storefront`: owns both views and routes cart changes back to the list
//! - a terminal front-end (`shopfront` binary) built on `commands` + `render`
//!
//! Views hold plain state and talk to the service only through
//! [`shopfront_client::CatalogApi`]. The service stays the authority; local
//! state is a mirror patched from responses or refetched.

pub mod app;
pub mod cart_view;
pub mod commands;
pub mod dialogs;
pub mod product_list;
pub mod render;
pub mod toast;
pub mod widget;

pub use app::Storefront;
pub use cart_view::{CartEvent, CartView};
pub use product_list::ProductListView;
pub use toast::{Toast, ToastConfig, ToastKind};
pub use widget::CartWidget;
