//! Cart panel: line items with quantity controls, clear and checkout.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shopfront_catalog::{CartItem, CartItemId, CartSummary, CheckoutReceipt, Price, QuantityChange};
use shopfront_client::{ApiError, CatalogApi};
use shopfront_core::entity::remove_by_id;
use tokio::sync::mpsc::UnboundedSender;

use crate::toast::{Toast, ToastConfig};

/// What the cart view changed on the service. The owner refetches on receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "cart_item_id", rename_all = "snake_case")]
pub enum CartEvent {
    ItemUpdated(CartItemId),
    ItemRemoved(CartItemId),
    Cleared,
    CheckedOut,
}

pub struct CartView {
    api: Arc<dyn CatalogApi>,
    listener: Option<UnboundedSender<CartEvent>>,
    open: bool,
    items: Vec<CartItem>,
    loading: bool,
    updating: HashSet<CartItemId>,
    removing: HashSet<CartItemId>,
    toast: Toast,
}

impl CartView {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            listener: None,
            open: false,
            items: Vec::new(),
            loading: false,
            updating: HashSet::new(),
            removing: HashSet::new(),
            toast: Toast::default(),
        }
    }

    /// Send a `CartEvent` to `tx` after every successful mutation.
    pub fn with_listener(mut self, tx: UnboundedSender<CartEvent>) -> Self {
        self.listener = Some(tx);
        self
    }

    fn notify(&self, event: CartEvent) {
        if let Some(tx) = &self.listener {
            if tx.send(event).is_err() {
                tracing::debug!(?event, "cart listener dropped");
            }
        }
    }

    /// Show the panel and fetch its contents.
    pub async fn open(&mut self) {
        self.open = true;
        self.fetch_items().await;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub async fn fetch_items(&mut self) {
        self.loading = true;
        match self.api.list_cart_items().await {
            Ok(items) => self.items = items,
            Err(err) => tracing::error!(error = %err, "failed to fetch cart items"),
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.items)
    }

    pub fn is_updating(&self, id: CartItemId) -> bool {
        self.updating.contains(&id)
    }

    pub fn is_removing(&self, id: CartItemId) -> bool {
        self.removing.contains(&id)
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn dismiss_toast(&mut self) {
        self.toast.dismiss();
    }

    pub fn tick(&mut self, now: DateTime<Utc>, config: &ToastConfig) {
        self.toast.tick(now, config);
    }

    pub async fn increase(&mut self, id: CartItemId) -> bool {
        let Some(item) = self.item(id) else {
            return false;
        };
        let change = item.plan_increment();
        self.apply(id, change, "Failed to increase quantity").await
    }

    /// Decrementing the last unit removes the line.
    pub async fn decrease(&mut self, id: CartItemId) -> bool {
        let Some(item) = self.item(id) else {
            return false;
        };
        let change = item.plan_decrement();
        self.apply(id, change, "Failed to decrease quantity").await
    }

    async fn apply(&mut self, id: CartItemId, change: QuantityChange, fallback: &str) -> bool {
        let quantity = match change {
            QuantityChange::Remove => return self.remove(id).await,
            QuantityChange::SetTo(quantity) => quantity,
        };

        self.updating.insert(id);
        let result = self.api.update_cart_item(id, quantity).await;
        self.updating.remove(&id);

        match result {
            Ok(updated) => {
                tracing::info!(cart_item_id = %id, quantity = updated.quantity, "cart quantity updated");
                if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
                    item.quantity = updated.quantity;
                }
                self.notify(CartEvent::ItemUpdated(id));
                true
            }
            Err(err) => {
                tracing::warn!(cart_item_id = %id, error = %err, "cart quantity update failed");
                self.toast.error(user_message(&err, fallback));
                false
            }
        }
    }

    pub async fn remove(&mut self, id: CartItemId) -> bool {
        self.removing.insert(id);
        let result = self.api.remove_from_cart(id).await;
        self.removing.remove(&id);

        match result {
            Ok(_) => {
                tracing::info!(cart_item_id = %id, "cart item removed");
                remove_by_id(&mut self.items, id);
                self.notify(CartEvent::ItemRemoved(id));
                true
            }
            Err(err) => {
                tracing::warn!(cart_item_id = %id, error = %err, "remove from cart failed");
                self.toast.error("Failed to remove item from cart");
                false
            }
        }
    }

    pub async fn clear(&mut self) -> bool {
        match self.api.clear_cart().await {
            Ok(_) => {
                tracing::info!(lines = self.items.len(), "cart cleared");
                self.items.clear();
                self.notify(CartEvent::Cleared);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "clear cart failed");
                self.toast.error(user_message(&err, "Failed to clear cart"));
                false
            }
        }
    }

    pub async fn checkout(&mut self) -> Option<CheckoutReceipt> {
        match self.api.checkout().await {
            Ok(receipt) => {
                tracing::info!(
                    total = %receipt.total_amount,
                    items = receipt.items_purchased,
                    "checkout completed"
                );
                self.items.clear();
                self.toast
                    .success(format!("Checkout complete: {}", receipt.total_amount));
                self.notify(CartEvent::CheckedOut);
                Some(receipt)
            }
            Err(err) => {
                tracing::warn!(error = %err, "checkout failed");
                self.toast.error(user_message(&err, "Checkout failed"));
                None
            }
        }
    }
}

/// Backend detail when the service sent one, `fallback` otherwise.
fn user_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Api(_, detail) if !detail.is_empty() => detail.clone(),
        _ => fallback.to_string(),
    }
}
