//! Modal dialog state for the product list.
//!
//! Dialogs only hold what they display plus their busy flag; the list view
//! owns them and performs the calls.

use shopfront_catalog::{Product, ProductDraft, ProductId};

/// "Add product" form.
#[derive(Debug, Clone, Default)]
pub struct AddProductDialog {
    open: bool,
    pub draft: ProductDraft,
    pub(crate) adding: bool,
}

impl AddProductDialog {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the form. The draft survives so reopening shows what was typed.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub(crate) fn finish(&mut self) {
        self.open = false;
        self.draft.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_adding(&self) -> bool {
        self.adding
    }
}

/// "Edit product" form, prefilled from the product being edited.
#[derive(Debug, Clone, Default)]
pub struct EditProductDialog {
    open: bool,
    product_id: Option<ProductId>,
    pub draft: ProductDraft,
    pub(crate) updating: bool,
}

impl EditProductDialog {
    pub fn open_for(&mut self, product: &Product) {
        self.product_id = Some(product.id);
        self.draft = ProductDraft::from_product(product);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub(crate) fn finish(&mut self) {
        self.open = false;
        self.product_id = None;
        self.draft.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn target(&self) -> Option<ProductId> {
        self.product_id
    }

    pub fn is_updating(&self) -> bool {
        self.updating
    }
}

/// Read-only product details.
#[derive(Debug, Clone, Default)]
pub struct ProductDetailsDialog {
    open: bool,
    product: Option<Product>,
}

impl ProductDetailsDialog {
    pub fn open_for(&mut self, product: Product) {
        self.product = Some(product);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }
}

/// Delete confirmation.
#[derive(Debug, Clone, Default)]
pub struct DeleteProductDialog {
    open: bool,
    product: Option<Product>,
    pub(crate) deleting: bool,
}

impl DeleteProductDialog {
    pub fn open_for(&mut self, product: Product) {
        self.product = Some(product);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub(crate) fn finish(&mut self) {
        self.open = false;
        self.product = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn target(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }
}
