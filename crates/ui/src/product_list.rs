//! Product grid: the source of truth for products and the cart summary.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use shopfront_catalog::{CartItem, Product, ProductId, SearchQuery};
use shopfront_client::CatalogApi;
use shopfront_core::entity::{remove_by_id, upsert_by_id};

use crate::dialogs::{AddProductDialog, DeleteProductDialog, EditProductDialog, ProductDetailsDialog};
use crate::toast::{Toast, ToastConfig};
use crate::widget::CartWidget;

/// State behind the product grid.
///
/// Collections are replaced wholesale on fetch; create/update/delete patch
/// them from the service's response, add-to-cart refetches.
pub struct ProductListView {
    api: Arc<dyn CatalogApi>,
    products: Vec<Product>,
    cart_items: Vec<CartItem>,
    loading: bool,
    load_error: Option<String>,
    search: SearchQuery,
    adding_to_cart: HashSet<ProductId>,
    toast: Toast,
    alert: Option<String>,

    pub add_dialog: AddProductDialog,
    pub edit_dialog: EditProductDialog,
    pub details_dialog: ProductDetailsDialog,
    pub delete_dialog: DeleteProductDialog,
}

impl ProductListView {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            products: Vec::new(),
            cart_items: Vec::new(),
            loading: true,
            load_error: None,
            search: SearchQuery::default(),
            adding_to_cart: HashSet::new(),
            toast: Toast::default(),
            alert: None,
            add_dialog: AddProductDialog::default(),
            edit_dialog: EditProductDialog::default(),
            details_dialog: ProductDetailsDialog::default(),
            delete_dialog: DeleteProductDialog::default(),
        }
    }

    /// Mount: fetch products and cart.
    pub async fn load(&mut self) {
        self.fetch_products().await;
        self.fetch_cart_items().await;
    }

    pub async fn fetch_products(&mut self) {
        match self.api.list_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "products fetched");
                self.products = products;
                self.load_error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch products");
                self.load_error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub async fn fetch_cart_items(&mut self) {
        match self.api.list_cart_items().await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "cart items fetched");
                self.cart_items = items;
            }
            Err(err) => tracing::error!(error = %err, "failed to fetch cart items"),
        }
    }

    /// Refetch after the cart view changed something (quantities move stock).
    pub async fn on_cart_changed(&mut self) {
        self.fetch_cart_items().await;
        self.fetch_products().await;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Why the last product fetch failed, until one succeeds.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn cart_items(&self) -> &[CartItem] {
        &self.cart_items
    }

    pub fn search(&self) -> &str {
        self.search.as_str()
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = SearchQuery::new(query);
    }

    /// Products matching the search box, recomputed on every call.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.search.filter(&self.products)
    }

    pub fn cart_widget(&self) -> CartWidget {
        CartWidget::from_items(&self.cart_items)
    }

    pub fn is_adding_to_cart(&self, id: ProductId) -> bool {
        self.adding_to_cart.contains(&id)
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

    /// Blocking alert awaiting acknowledgement, if any.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn raise_alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(alert = %message, "blocking alert");
        self.alert = Some(message);
    }

    /// Submit the add dialog. Returns the created product on success.
    pub async fn submit_add(&mut self) -> Option<Product> {
        let payload = match self.add_dialog.draft.to_new_product() {
            Ok(payload) => payload,
            Err(err) => {
                self.raise_alert(format!("Failed to add product: {err}"));
                return None;
            }
        };

        self.add_dialog.adding = true;
        let result = self.api.create_product(payload).await;
        self.add_dialog.adding = false;

        match result {
            Ok(created) => {
                tracing::info!(product_id = %created.id, name = %created.name, "product created");
                upsert_by_id(&mut self.products, created.clone());
                self.add_dialog.finish();
                Some(created)
            }
            Err(err) => {
                tracing::warn!(error = %err, "create product failed");
                self.raise_alert("Failed to add product");
                None
            }
        }
    }

    /// Open the edit dialog for a listed product. Returns false if it is not listed.
    pub fn open_edit(&mut self, id: ProductId) -> bool {
        match self.products.iter().find(|p| p.id == id) {
            Some(product) => {
                self.edit_dialog.open_for(product);
                true
            }
            None => false,
        }
    }

    /// Submit the edit dialog. Returns the updated product on success.
    pub async fn submit_edit(&mut self) -> Option<Product> {
        let id = self.edit_dialog.target()?;
        let update = match self.edit_dialog.draft.to_update() {
            Ok(update) => update,
            Err(err) => {
                self.raise_alert(format!("Failed to update product: {err}"));
                return None;
            }
        };

        self.edit_dialog.updating = true;
        let result = self.api.update_product(id, update).await;
        self.edit_dialog.updating = false;

        match result {
            Ok(updated) => {
                tracing::info!(product_id = %updated.id, "product updated");
                upsert_by_id(&mut self.products, updated.clone());
                self.edit_dialog.finish();
                Some(updated)
            }
            Err(err) => {
                tracing::warn!(product_id = %id, error = %err, "update product failed");
                self.raise_alert("Failed to update product");
                None
            }
        }
    }

    pub fn open_details(&mut self, id: ProductId) -> bool {
        match self.product(id).cloned() {
            Some(product) => {
                self.details_dialog.open_for(product);
                true
            }
            None => false,
        }
    }

    pub fn close_details(&mut self) {
        self.details_dialog.close();
    }

    /// First step of delete: open the confirmation for a listed product.
    pub fn request_delete(&mut self, id: ProductId) -> bool {
        match self.product(id).cloned() {
            Some(product) => {
                self.delete_dialog.open_for(product);
                true
            }
            None => false,
        }
    }

    /// Second step of delete. No-op without a target.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.delete_dialog.target().map(|p| p.id) else {
            return false;
        };

        self.delete_dialog.deleting = true;
        let result = self.api.delete_product(id).await;
        self.delete_dialog.deleting = false;

        match result {
            Ok(_) => {
                tracing::info!(product_id = %id, "product deleted");
                remove_by_id(&mut self.products, id);
                self.delete_dialog.finish();
                true
            }
            Err(err) => {
                tracing::warn!(product_id = %id, error = %err, "delete product failed");
                self.raise_alert("Failed to delete product");
                false
            }
        }
    }

    /// Put one unit in the cart, then refetch cart and products for the new stock.
    pub async fn add_to_cart(&mut self, product_id: ProductId) -> bool {
        self.adding_to_cart.insert(product_id);

        let ok = match self.api.add_to_cart(product_id, 1).await {
            Ok(line) => {
                tracing::info!(%product_id, cart_item_id = %line.id, quantity = line.quantity, "added to cart");
                self.fetch_cart_items().await;
                self.fetch_products().await;
                self.toast.success("Product added to cart!");
                true
            }
            Err(err) => {
                tracing::warn!(%product_id, error = %err, "add to cart failed");
                self.toast.error(format!("Failed to add to cart: {}", err.detail()));
                false
            }
        };

        self.adding_to_cart.remove(&product_id);
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_catalog::{NewProduct, Price};
    use shopfront_client::InMemoryCatalog;

    use crate::toast::ToastKind;

    fn seeded() -> Arc<InMemoryCatalog> {
        Arc::new(InMemoryCatalog::with_products([
            NewProduct {
                name: "Pen".into(),
                description: "Blue ink".into(),
                price: Price::from_cents(150),
                stock: 5,
            },
            NewProduct {
                name: "Stapler".into(),
                description: "Desktop".into(),
                price: Price::from_cents(1250),
                stock: 1,
            },
        ]))
    }

    async fn mounted(catalog: &Arc<InMemoryCatalog>) -> ProductListView {
        let mut view = ProductListView::new(catalog.clone());
        view.load().await;
        view
    }

    fn fill_draft(view: &mut ProductListView, name: &str) {
        view.add_dialog.open();
        let draft = &mut view.add_dialog.draft;
        draft.name = name.into();
        draft.description = "Soft vinyl".into();
        draft.price = "1.20".into();
        draft.stock = "8".into();
    }

    #[tokio::test]
    async fn load_populates_and_clears_loading() {
        let catalog = seeded();
        let view = mounted(&catalog).await;

        assert!(!view.is_loading());
        assert_eq!(view.products().len(), 2);
        assert!(view.cart_items().is_empty());
    }

    #[tokio::test]
    async fn failed_initial_load_is_silent() {
        let catalog = seeded();
        catalog.set_unreachable(true);
        let mut view = mounted(&catalog).await;

        assert!(!view.is_loading());
        assert!(view.products().is_empty());
        assert_eq!(view.load_error(), Some("network error: connection refused"));
        assert!(view.alert().is_none());
        assert!(!view.toast().is_visible());

        catalog.set_unreachable(false);
        view.fetch_products().await;
        assert_eq!(view.load_error(), None);
        assert_eq!(view.products().len(), 2);
    }

    #[tokio::test]
    async fn search_filters_name_and_description() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;

        view.set_search("PEN");
        assert_eq!(view.visible_products().len(), 1);

        view.set_search("desk");
        assert_eq!(view.visible_products()[0].name, "Stapler");

        view.set_search("eraser");
        assert!(view.visible_products().is_empty());
    }

    #[tokio::test]
    async fn created_product_appears_exactly_once() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;
        fill_draft(&mut view, "Eraser");

        let created = view.submit_add().await.expect("create succeeds");

        let hits = view.products().iter().filter(|p| p.id == created.id).count();
        assert_eq!(hits, 1);
        assert!(!view.add_dialog.is_open());
        assert!(!view.add_dialog.is_adding());
        assert_eq!(view.add_dialog.draft.name, "");

        // A refetch racing the optimistic append must not duplicate it either.
        view.fetch_products().await;
        assert_eq!(view.products().iter().filter(|p| p.id == created.id).count(), 1);
    }

    #[tokio::test]
    async fn failed_create_alerts_and_keeps_state() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;
        fill_draft(&mut view, "Pen");
        let before = view.products().to_vec();

        assert!(view.submit_add().await.is_none());

        assert_eq!(view.alert(), Some("Failed to add product"));
        assert_eq!(view.products(), before.as_slice());
        assert!(view.add_dialog.is_open());
        assert_eq!(view.add_dialog.draft.name, "Pen");
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_service() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;
        fill_draft(&mut view, "Glue");
        view.add_dialog.draft.price = "cheap".into();

        assert!(view.submit_add().await.is_none());
        let alert = view.alert().unwrap_or_default();
        assert!(alert.starts_with("Failed to add product: "), "{alert}");
        assert_eq!(catalog.list_products().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn edit_replaces_product_in_place() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;
        let pen = view.products()[0].id;

        assert!(view.open_edit(pen));
        view.edit_dialog.draft.price = "2.00".into();
        let updated = view.submit_edit().await.expect("update succeeds");

        assert_eq!(updated.price, Price::from_cents(200));
        assert_eq!(view.products()[0].price, Price::from_cents(200));
        assert_eq!(view.products().len(), 2);
        assert!(view.edit_dialog.target().is_none());
    }

    #[tokio::test]
    async fn failed_edit_alerts() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;
        let pen = view.products()[0].id;
        assert!(view.open_edit(pen));

        catalog.set_unreachable(true);
        assert!(view.submit_edit().await.is_none());
        assert_eq!(view.alert(), Some("Failed to update product"));
        assert_eq!(view.products()[0].price, Price::from_cents(150));

        view.dismiss_alert();
        assert!(view.alert().is_none());
    }

    #[tokio::test]
    async fn delete_is_two_step_and_removes_product() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;
        let stapler = view.products()[1].id;

        assert!(!view.confirm_delete().await);
        assert!(view.request_delete(stapler));
        assert!(view.delete_dialog.is_open());
        assert!(view.confirm_delete().await);

        assert!(view.product(stapler).is_none());
        assert!(!view.delete_dialog.is_open());
        assert!(view.delete_dialog.target().is_none());
    }

    #[tokio::test]
    async fn failed_delete_alerts_and_keeps_product() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;
        let pen = view.products()[0].id;
        view.request_delete(pen);

        catalog.set_unreachable(true);
        assert!(!view.confirm_delete().await);
        assert_eq!(view.alert(), Some("Failed to delete product"));
        assert!(view.product(pen).is_some());
    }

    #[tokio::test]
    async fn details_dialog_shows_selected_product() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;
        let pen = view.products()[0].id;

        assert!(!view.open_details(ProductId::new(404)));
        assert!(view.open_details(pen));
        assert_eq!(view.details_dialog.product().map(|p| p.id), Some(pen));
        view.close_details();
        assert!(!view.details_dialog.is_open());
    }

    #[tokio::test]
    async fn add_to_cart_refetches_stock_and_cart() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;
        let pen = view.products()[0].id;

        assert!(view.add_to_cart(pen).await);

        assert_eq!(view.product(pen).map(|p| p.stock), Some(4));
        assert_eq!(view.cart_widget().item_count, 1);
        assert_eq!(view.cart_widget().total_price, Price::from_cents(150));
        assert_eq!(view.toast().current(), Some((ToastKind::Success, "Product added to cart!")));
        assert!(!view.is_adding_to_cart(pen));
    }

    #[tokio::test]
    async fn add_to_cart_failure_changes_nothing_but_the_toast() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;
        let stapler = view.products()[1].id;
        assert!(view.add_to_cart(stapler).await);

        let products_before = view.products().to_vec();
        let cart_before = view.cart_items().to_vec();

        assert!(!view.add_to_cart(stapler).await);

        assert_eq!(view.products(), products_before.as_slice());
        assert_eq!(view.cart_items(), cart_before.as_slice());
        assert_eq!(
            view.toast().current(),
            Some((ToastKind::Error, "Failed to add to cart: Not enough stock available"))
        );
        assert!(!view.is_adding_to_cart(stapler));
    }

    #[tokio::test]
    async fn oversized_price_is_rejected_before_the_service() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;
        fill_draft(&mut view, "Gold pen");
        view.add_dialog.draft.price = "79228162514264337593543950335".into();

        assert!(view.submit_add().await.is_none());
        assert!(view.alert().unwrap_or_default().starts_with("Failed to add product: "));
        assert_eq!(catalog.list_products().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn cart_totals_saturate_for_extreme_server_prices() {
        let catalog = Arc::new(InMemoryCatalog::with_products([NewProduct {
            name: "Vault".into(),
            description: "Priced at the decimal limit".into(),
            price: Price::new(rust_decimal::Decimal::MAX),
            stock: 5,
        }]));
        let mut view = mounted(&catalog).await;
        let vault = view.products()[0].id;

        assert!(view.add_to_cart(vault).await);
        assert!(view.add_to_cart(vault).await);

        let widget = view.cart_widget();
        assert_eq!(widget.item_count, 2);
        assert_eq!(widget.total_price.amount(), rust_decimal::Decimal::MAX);

        let receipt = catalog.checkout().await.unwrap();
        assert_eq!(receipt.total_amount.amount(), rust_decimal::Decimal::MAX);
    }

    #[tokio::test]
    async fn network_failure_toast_uses_error_message() {
        let catalog = seeded();
        let mut view = mounted(&catalog).await;
        let pen = view.products()[0].id;
        catalog.set_unreachable(true);

        assert!(!view.add_to_cart(pen).await);
        let (kind, message) = view.toast().current().expect("toast shown");
        assert_eq!(kind, ToastKind::Error);
        assert_eq!(message, "Failed to add to cart: network error: connection refused");
    }
}
