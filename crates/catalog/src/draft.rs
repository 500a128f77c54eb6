//! Text form state backing the add/edit product dialogs.

use serde::{Deserialize, Serialize};
use shopfront_core::{DomainError, DomainResult};

use crate::price::Price;
use crate::product::{NewProduct, Product, ProductUpdate};

/// Raw dialog input. Price and stock stay text until submit, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
}

impl ProductDraft {
    /// Prefill a draft from an existing product (edit dialog).
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description().to_string(),
            price: product.price.amount().to_string(),
            stock: product.stock.to_string(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate and convert into a create payload. New products need a description.
    pub fn to_new_product(&self) -> DomainResult<NewProduct> {
        Ok(NewProduct {
            name: self.parse_name()?,
            description: self.parse_description()?,
            price: self.parse_price()?,
            stock: self.parse_stock()?,
        })
    }

    /// Validate and convert into a full update payload (every field set).
    pub fn to_update(&self) -> DomainResult<ProductUpdate> {
        Ok(ProductUpdate {
            name: Some(self.parse_name()?),
            description: Some(self.description.trim().to_string()),
            price: Some(self.parse_price()?),
            stock: Some(self.parse_stock()?),
        })
    }

    fn parse_name(&self) -> DomainResult<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        Ok(name.to_string())
    }

    fn parse_description(&self) -> DomainResult<String> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(DomainError::validation("description is required"));
        }
        Ok(description.to_string())
    }

    fn parse_price(&self) -> DomainResult<Price> {
        if self.price.trim().is_empty() {
            return Err(DomainError::validation("price is required"));
        }
        self.price.parse()
    }

    fn parse_stock(&self) -> DomainResult<i64> {
        let raw = self.stock.trim();
        let stock = raw
            .parse::<i64>()
            .map_err(|_| DomainError::validation(format!("stock '{raw}' is not a whole number")))?;
        if stock < 0 {
            return Err(DomainError::validation("stock must not be negative"));
        }
        Ok(stock)
    }
}
