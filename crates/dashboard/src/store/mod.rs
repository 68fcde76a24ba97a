//! Hosted content-lake client.
//!
//! The content lake is the remote structured store holding product and
//! order documents. It is queried with a projection query and mutated via
//! partial patch or delete; image assets are uploaded to its asset store.
//!
//! [`ContentStore`] is the seam the dashboard talks through, so dashboard
//! behavior is testable against an in-memory fake. [`StoreClient`] is the
//! reqwest-backed implementation.

mod client;
pub mod queries;

pub use client::StoreClient;

use clementine_core::{AssetRef, Order, Product};
use thiserror::Error;

/// Errors that can occur when interacting with the content lake.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error body.
    #[error("Store error: {0}")]
    Api(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the store.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// An image file staged for upload to the asset store.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original filename, forwarded to the asset store.
    pub filename: String,
    /// MIME type (e.g., `image/png`).
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

/// Operations the dashboard needs from the remote structured store.
///
/// Implemented by [`StoreClient`] for the hosted content lake and by
/// in-memory fakes in tests.
#[allow(async_fn_in_trait)]
pub trait ContentStore {
    /// Fetch all product documents.
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Fetch all order documents with line items resolved (denormalized
    /// join per [`queries::ORDERS_WITH_ITEMS`]).
    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError>;

    /// Apply a partial update to the document with the given id.
    async fn patch(&self, document_id: &str, set: serde_json::Value) -> Result<(), StoreError>;

    /// Delete the document with the given id.
    async fn delete(&self, document_id: &str) -> Result<(), StoreError>;

    /// Upload an image to the asset store, returning the reference of the
    /// created asset document.
    async fn upload_image(&self, upload: &ImageUpload) -> Result<AssetRef, StoreError>;
}
