//! The dashboard: view state, fetch adapter, and mutators.
//!
//! A [`Dashboard`] holds a transient local copy of the store's product and
//! order collections plus the operator's view state, and applies mutations
//! through the confirmation seam.
//!
//! # Consistency policy
//!
//! Every successful remote write is mirrored by an in-place local update
//! (a verified local patch); no operation implicitly re-fetches. Metrics
//! are recomputed after any local change to the order collection.
//! Explicit [`Dashboard::refresh_orders`] / [`Dashboard::refresh_products`]
//! remain available for reconciliation.

use clementine_core::{
    AssetRef, Metrics, Order, OrderId, OrderStatus, Product, ProductId, StatusFilter,
    filter_orders,
};
use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument};

use crate::error::DashboardError;
use crate::prompt::{
    OperatorPrompt, delete_order_prompt, delete_product_prompt, error_notice, status_change_prompt,
    success_notice,
};
use crate::session::Session;
use crate::store::{ContentStore, ImageUpload};

/// Active dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Orders,
    Products,
}

/// Result of a confirmed mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operator confirmed and the write went through.
    Applied,
    /// The operator declined the prompt; nothing was written.
    Cancelled,
}

/// Staged product edits, keyed by product id via [`ProductEdit`].
///
/// Fields are scratch state only: nothing touches the remote store until
/// [`Dashboard::save_product`], which sends all staged fields in a single
/// partial patch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i64>,
    /// Set by `save_product` after a staged image upload succeeds.
    pub image: Option<AssetRef>,
}

impl ProductDraft {
    fn from_product(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            description: product.description.clone(),
            price: Some(product.price),
            stock_quantity: Some(product.stock_quantity),
            image: None,
        }
    }

    /// The partial-update payload containing every staged field.
    fn to_patch(&self) -> serde_json::Value {
        let mut set = serde_json::Map::new();
        if let Some(name) = &self.name {
            set.insert("name".to_string(), serde_json::json!(name));
        }
        if let Some(description) = &self.description {
            set.insert("description".to_string(), serde_json::json!(description));
        }
        if let Some(price) = &self.price {
            set.insert("price".to_string(), serde_json::json!(price));
        }
        if let Some(stock_quantity) = &self.stock_quantity {
            set.insert("stock_quantity".to_string(), serde_json::json!(stock_quantity));
        }
        if let Some(image) = &self.image {
            set.insert("image".to_string(), serde_json::json!(image.as_str()));
        }
        serde_json::Value::Object(set)
    }

    /// Merge the staged fields into a locally held product.
    fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            product.description = Some(description.clone());
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock_quantity) = self.stock_quantity {
            product.stock_quantity = stock_quantity;
        }
        if let Some(image) = &self.image {
            product.image = Some(image.clone());
        }
    }
}

/// An in-progress product edit.
#[derive(Debug, Clone, PartialEq)]
struct ProductEdit {
    id: ProductId,
    draft: ProductDraft,
    staged_image: Option<ImageUpload>,
}

/// Admin dashboard over a remote content store.
///
/// Generic over the store and prompt seams so behavior is testable with
/// in-memory fakes.
pub struct Dashboard<S, P> {
    store: S,
    prompt: P,
    section: Section,
    status_filter: StatusFilter,
    products: Vec<Product>,
    orders: Vec<Order>,
    metrics: Metrics,
    selected_product: Option<ProductId>,
    edit: Option<ProductEdit>,
}

impl<S: ContentStore, P: OperatorPrompt> Dashboard<S, P> {
    /// Create a dashboard for an authenticated operator.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::NotAuthenticated` if the session is not
    /// authenticated; the dashboard never runs without that capability.
    pub fn new(store: S, prompt: P, session: &Session) -> Result<Self, DashboardError> {
        if !session.is_authenticated() {
            return Err(DashboardError::NotAuthenticated);
        }

        Ok(Self {
            store,
            prompt,
            section: Section::default(),
            status_filter: StatusFilter::default(),
            products: Vec::new(),
            orders: Vec::new(),
            metrics: Metrics::default(),
            selected_product: None,
            edit: None,
        })
    }

    // =========================================================================
    // Fetch adapter
    // =========================================================================

    /// Load both collections (initial activation).
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Store` if either fetch fails.
    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        self.refresh_products().await?;
        self.refresh_orders().await
    }

    /// Re-fetch the product collection.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Store` if the fetch fails.
    #[instrument(skip(self))]
    pub async fn refresh_products(&mut self) -> Result<(), DashboardError> {
        self.products = self.store.fetch_products().await?;
        debug!(count = self.products.len(), "loaded products");
        Ok(())
    }

    /// Re-fetch the order collection and recompute metrics.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Store` if the fetch fails.
    #[instrument(skip(self))]
    pub async fn refresh_orders(&mut self) -> Result<(), DashboardError> {
        self.orders = self.store.fetch_orders().await?;
        self.recompute_metrics();
        debug!(count = self.orders.len(), "loaded orders");
        Ok(())
    }

    fn recompute_metrics(&mut self) {
        self.metrics = Metrics::from_orders(&self.orders);
    }

    // =========================================================================
    // Order mutators
    // =========================================================================

    /// Change an order's status after operator confirmation.
    ///
    /// Only the selectable statuses can be written; `Unknown` and `Unset`
    /// values render in lists but are refused here.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::StatusNotSelectable` for a non-selectable
    /// status, `DashboardError::OrderNotFound` if the order is not in the
    /// local collection, and `DashboardError::Store` if the write fails
    /// (also reported through the notification surface).
    #[instrument(skip(self, status), fields(order_id = %id, status = %status))]
    pub async fn set_order_status(
        &mut self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Outcome, DashboardError> {
        if !status.is_selectable() {
            return Err(DashboardError::StatusNotSelectable(status.to_string()));
        }
        if !self.orders.iter().any(|order| order.id == *id) {
            return Err(DashboardError::OrderNotFound(id.clone()));
        }

        if !self.prompt.confirm(&status_change_prompt(&status)) {
            debug!("status change declined");
            return Ok(Outcome::Cancelled);
        }

        let set = serde_json::json!({ "status": status.as_wire_str() });
        match self.store.patch(id.as_str(), set).await {
            Ok(()) => {
                if let Some(order) = self.orders.iter_mut().find(|order| order.id == *id) {
                    order.status = status;
                }
                self.recompute_metrics();
                info!("order status updated");
                self.prompt
                    .notify(&success_notice("Updated!", "Order status updated successfully"));
                Ok(Outcome::Applied)
            }
            Err(e) => {
                error!(error = %e, "failed to update order status");
                self.prompt
                    .notify(&error_notice("Something went wrong while updating the status."));
                Err(e.into())
            }
        }
    }

    /// Delete an order after confirmation with an irreversibility warning.
    ///
    /// On success the entry is removed from the local collection by id; no
    /// re-fetch is needed. On failure the local collection is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::OrderNotFound` if the order is not held
    /// locally, and `DashboardError::Store` if the remote delete fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete_order(&mut self, id: &OrderId) -> Result<Outcome, DashboardError> {
        if !self.orders.iter().any(|order| order.id == *id) {
            return Err(DashboardError::OrderNotFound(id.clone()));
        }

        if !self.prompt.confirm(&delete_order_prompt()) {
            debug!("order delete declined");
            return Ok(Outcome::Cancelled);
        }

        match self.store.delete(id.as_str()).await {
            Ok(()) => {
                self.orders.retain(|order| order.id != *id);
                self.recompute_metrics();
                info!("order deleted");
                self.prompt
                    .notify(&success_notice("Deleted!", "Your order has been deleted."));
                Ok(Outcome::Applied)
            }
            Err(e) => {
                error!(error = %e, "failed to delete order");
                self.prompt
                    .notify(&error_notice("Something went wrong while deleting."));
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Product mutators
    // =========================================================================

    /// Begin editing a product: stages its editable fields as scratch state.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::ProductNotFound` if the product is not in
    /// the local collection.
    pub fn begin_product_edit(&mut self, id: &ProductId) -> Result<(), DashboardError> {
        let product = self
            .products
            .iter()
            .find(|product| product.id == *id)
            .ok_or_else(|| DashboardError::ProductNotFound(id.clone()))?;

        self.edit = Some(ProductEdit {
            id: product.id.clone(),
            draft: ProductDraft::from_product(product),
            staged_image: None,
        });
        Ok(())
    }

    /// Stage a new name on the in-progress edit.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::NoEditInProgress` if no edit was begun.
    pub fn edit_name(&mut self, name: impl Into<String>) -> Result<(), DashboardError> {
        self.edit_mut()?.draft.name = Some(name.into());
        Ok(())
    }

    /// Stage a new description on the in-progress edit.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::NoEditInProgress` if no edit was begun.
    pub fn edit_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<(), DashboardError> {
        self.edit_mut()?.draft.description = Some(description.into());
        Ok(())
    }

    /// Stage a new price on the in-progress edit.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::NoEditInProgress` if no edit was begun.
    pub fn edit_price(&mut self, price: Decimal) -> Result<(), DashboardError> {
        self.edit_mut()?.draft.price = Some(price);
        Ok(())
    }

    /// Stage a new stock quantity on the in-progress edit.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::NoEditInProgress` if no edit was begun.
    pub fn edit_stock_quantity(&mut self, stock_quantity: i64) -> Result<(), DashboardError> {
        self.edit_mut()?.draft.stock_quantity = Some(stock_quantity);
        Ok(())
    }

    /// Stage an image file for upload on save.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::NoEditInProgress` if no edit was begun.
    pub fn stage_image(&mut self, upload: ImageUpload) -> Result<(), DashboardError> {
        self.edit_mut()?.staged_image = Some(upload);
        Ok(())
    }

    /// Discard the in-progress edit without touching the store.
    pub fn cancel_product_edit(&mut self) {
        self.edit = None;
    }

    fn edit_mut(&mut self) -> Result<&mut ProductEdit, DashboardError> {
        self.edit.as_mut().ok_or(DashboardError::NoEditInProgress)
    }

    /// Save the in-progress edit: upload the staged image first (if any),
    /// substitute the returned asset reference into the staged fields, then
    /// send one partial patch with everything staged. On success the staged
    /// fields are merged into the local product and the draft is cleared;
    /// on failure the draft is kept so the operator can retry.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::NoEditInProgress` if no edit was begun, and
    /// `DashboardError::Store` if the upload or patch fails (also reported
    /// through the notification surface).
    #[instrument(skip(self))]
    pub async fn save_product(&mut self) -> Result<(), DashboardError> {
        let Some(edit) = self.edit.as_mut() else {
            return Err(DashboardError::NoEditInProgress);
        };

        // Asset upload comes first so the patch can carry the reference.
        if let Some(upload) = &edit.staged_image {
            match self.store.upload_image(upload).await {
                Ok(reference) => {
                    edit.draft.image = Some(reference);
                    edit.staged_image = None;
                }
                Err(e) => {
                    error!(error = %e, "failed to upload product image");
                    self.prompt
                        .notify(&error_notice("Something went wrong while uploading the image."));
                    return Err(e.into());
                }
            }
        }

        let product_id = edit.id.clone();
        let payload = edit.draft.to_patch();

        match self.store.patch(product_id.as_str(), payload).await {
            Ok(()) => {
                if let Some(finished) = self.edit.take()
                    && let Some(product) = self
                        .products
                        .iter_mut()
                        .find(|product| product.id == finished.id)
                {
                    finished.draft.apply_to(product);
                }
                info!(product_id = %product_id, "product updated");
                self.prompt
                    .notify(&success_notice("Updated!", "Product details have been updated."));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, product_id = %product_id, "failed to save product");
                self.prompt
                    .notify(&error_notice("Something went wrong while saving the product."));
                Err(e.into())
            }
        }
    }

    /// Delete a product after confirmation.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::ProductNotFound` if the product is not held
    /// locally, and `DashboardError::Store` if the remote delete fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&mut self, id: &ProductId) -> Result<Outcome, DashboardError> {
        if !self.products.iter().any(|product| product.id == *id) {
            return Err(DashboardError::ProductNotFound(id.clone()));
        }

        if !self.prompt.confirm(&delete_product_prompt()) {
            debug!("product delete declined");
            return Ok(Outcome::Cancelled);
        }

        match self.store.delete(id.as_str()).await {
            Ok(()) => {
                self.products.retain(|product| product.id != *id);
                if self.selected_product.as_ref() == Some(id) {
                    self.selected_product = None;
                }
                if self.edit.as_ref().is_some_and(|edit| edit.id == *id) {
                    self.edit = None;
                }
                info!("product deleted");
                self.prompt
                    .notify(&success_notice("Deleted!", "Product removed successfully"));
                Ok(Outcome::Applied)
            }
            Err(e) => {
                error!(error = %e, "failed to delete product");
                self.prompt
                    .notify(&error_notice("Something went wrong while deleting."));
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // View state
    // =========================================================================

    /// The locally held product collection.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The locally held order collection.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Metrics derived from the current order collection.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Orders passing the active status filter, in original order.
    #[must_use]
    pub fn filtered_orders(&self) -> Vec<&Order> {
        filter_orders(&self.orders, self.status_filter)
    }

    /// The active section.
    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    pub fn set_section(&mut self, section: Section) {
        self.section = section;
    }

    /// The active order status filter.
    #[must_use]
    pub const fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    /// Select a product for the read-only detail view.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::ProductNotFound` if the product is not in
    /// the local collection.
    pub fn select_product(&mut self, id: &ProductId) -> Result<(), DashboardError> {
        if !self.products.iter().any(|product| product.id == *id) {
            return Err(DashboardError::ProductNotFound(id.clone()));
        }
        self.selected_product = Some(id.clone());
        Ok(())
    }

    /// The product selected for the detail view, if any.
    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        let id = self.selected_product.as_ref()?;
        self.products.iter().find(|product| product.id == *id)
    }

    pub fn clear_selected_product(&mut self) {
        self.selected_product = None;
    }

    /// The product id and staged fields of the in-progress edit, if any.
    #[must_use]
    pub fn product_edit(&self) -> Option<(&ProductId, &ProductDraft)> {
        self.edit.as_ref().map(|edit| (&edit.id, &edit.draft))
    }
}
