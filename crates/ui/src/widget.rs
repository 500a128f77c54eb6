use serde::Serialize;
use shopfront_catalog::{CartItem, CartSummary, Price};

/// Always-visible cart badge: how many units, and what they cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CartWidget {
    pub item_count: u64,
    pub total_price: Price,
}

impl CartWidget {
    pub fn from_items(items: &[CartItem]) -> Self {
        CartSummary::of(items).into()
    }

    pub fn label(&self) -> String {
        match self.item_count {
            0 => format!("Empty cart ({})", self.total_price),
            1 => format!("Cart: 1 item ({})", self.total_price),
            n => format!("Cart: {n} items ({})", self.total_price),
        }
    }
}

impl From<CartSummary> for CartWidget {
    fn from(summary: CartSummary) -> Self {
        Self {
            item_count: summary.item_count,
            total_price: summary.total_price,
        }
    }
}
