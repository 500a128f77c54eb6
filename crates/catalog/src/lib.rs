//! `shopfront-catalog`: client-side mirror of the catalog service's data.
//!
//! Products and cart lines as the REST service returns them, the payloads
//! sent back to it, form drafts, and the pure helpers views compute from
//! local state (search filtering, cart totals, quantity planning).

pub mod cart;
pub mod draft;
pub mod price;
pub mod product;
pub mod search;

pub use cart::{
    Acknowledgement, CartItem, CartItemUpdate, CartSummary, CheckoutReceipt, NewCartItem,
    QuantityChange,
};
pub use draft::ProductDraft;
pub use price::Price;
pub use product::{NewProduct, Product, ProductUpdate};
pub use search::SearchQuery;
pub use shopfront_core::{CartItemId, ProductId};
