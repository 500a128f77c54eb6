use serde::{Deserialize, Serialize};

use shopfront_core::{Entity, ProductId};

use crate::price::Price;

/// A catalog product as returned by `GET /products/`.
///
/// The client never mutates a product locally; it only mirrors what the
/// service sent back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
    pub stock: i64,
}

impl Product {
    /// Description text, empty when the service has none.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// Payload for `POST /products/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub stock: i64,
}

impl NewProduct {
    /// Materialize the product the service would store for this payload.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: Some(self.description),
            price: self.price,
            stock: self.stock,
        }
    }
}

/// Payload for `PUT /products/{id}`.
///
/// Absent fields are not serialized, so the service leaves them unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl ProductUpdate {
    /// Apply the provided fields to `product`, leaving the rest untouched.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = Some(description.clone());
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}
