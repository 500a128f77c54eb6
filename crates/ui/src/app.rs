//! The shell: owns both views and keeps the list in step with the cart.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shopfront_client::CatalogApi;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::cart_view::{CartEvent, CartView};
use crate::product_list::ProductListView;
use crate::toast::ToastConfig;

pub struct Storefront {
    pub products: ProductListView,
    pub cart: CartView,
    cart_events: UnboundedReceiver<CartEvent>,
    toast_config: ToastConfig,
}

impl Storefront {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            products: ProductListView::new(api.clone()),
            cart: CartView::new(api).with_listener(tx),
            cart_events: rx,
            toast_config: ToastConfig::default(),
        }
    }

    pub async fn mount(&mut self) {
        self.products.load().await;
    }

    pub async fn open_cart(&mut self) {
        self.cart.open().await;
    }

    pub fn close_cart(&mut self) {
        self.cart.close();
    }

    /// Drain pending cart events and, if there were any, refetch the list once.
    /// Returns how many events were consumed.
    pub async fn sync_cart_changes(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.cart_events.try_recv() {
            tracing::debug!(?event, "cart event");
            drained += 1;
        }
        if drained > 0 {
            self.products.on_cart_changed().await;
        }
        drained
    }

    /// Expire toasts in both views.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.products.tick(now, &self.toast_config);
        self.cart.tick(now, &self.toast_config);
    }
}
