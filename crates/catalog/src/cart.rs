use serde::{Deserialize, Serialize};

use shopfront_core::{CartItemId, Entity, ProductId};

use crate::price::Price;
use crate::product::Product;

/// A cart line as returned by `GET /cart/`, with its product embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub product: Product,
}

impl CartItem {
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }

    pub fn plan_increment(&self) -> QuantityChange {
        QuantityChange::SetTo(self.quantity.saturating_add(1))
    }

    /// A line never drops to zero: decrementing the last unit removes it.
    pub fn plan_decrement(&self) -> QuantityChange {
        if self.quantity <= 1 {
            QuantityChange::Remove
        } else {
            QuantityChange::SetTo(self.quantity - 1)
        }
    }
}

impl Entity for CartItem {
    type Id = CartItemId;

    fn id(&self) -> CartItemId {
        self.id
    }
}

/// What a quantity button should turn into on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// `PUT /cart/{id}` with this quantity.
    SetTo(u32),
    /// `DELETE /cart/{id}`.
    Remove,
}

fn default_quantity() -> u32 {
    1
}

/// Payload for `POST /cart/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Payload for `PUT /cart/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemUpdate {
    pub quantity: u32,
}

/// Item count and total shown by the cart widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub item_count: u64,
    pub total_price: Price,
}

impl CartSummary {
    pub fn of(items: &[CartItem]) -> Self {
        Self {
            item_count: items.iter().map(|i| u64::from(i.quantity)).sum(),
            total_price: items.iter().map(CartItem::line_total).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

/// Body of a successful `POST /cart/checkout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub message: String,
    pub total_amount: Price,
    pub items_purchased: u32,
}

/// `{"message": ...}` body returned by deletes and cart clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: String,
}
