//! Reqwest-backed content-lake client.

use std::sync::Arc;

use clementine_core::{AssetRef, Order, Product};
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use super::{ContentStore, ImageUpload, StoreError, queries};
use crate::config::DashboardConfig;

/// Content-lake API client.
///
/// Provides access to the dataset holding product and order documents:
/// projection queries, partial patches, deletes, and image asset uploads.
/// Cheap to clone; all clones share the same HTTP connection pool.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    dataset: String,
    token: SecretString,
}

/// Query response wrapper: `{"result": [...]}`.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Mutation acknowledgment: `{"transactionId": "..."}`.
#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(rename = "transactionId")]
    transaction_id: Option<String>,
}

/// Asset upload response: `{"document": {"_id": "image-..."}}`.
#[derive(Debug, Deserialize)]
struct AssetResponse {
    document: AssetDocument,
}

#[derive(Debug, Deserialize)]
struct AssetDocument {
    #[serde(rename = "_id")]
    id: AssetRef,
}

/// Error body returned on non-2xx responses:
/// `{"error": {"description": "..."}}`.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    description: String,
}

impl StoreClient {
    /// Create a new content-lake client from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: &DashboardConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(StoreClientInner {
                client,
                base_url: config.store_url.clone(),
                api_version: config.api_version.clone(),
                dataset: config.dataset.clone(),
                token: config.token.clone(),
            }),
        }
    }

    fn endpoint(&self, kind: &str) -> String {
        format!(
            "{}/{}/data/{kind}/{}",
            self.inner.base_url, self.inner.api_version, self.inner.dataset
        )
    }

    /// Execute a projection query and deserialize the `result` array.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unauthorized` on 401, `StoreError::RateLimited`
    /// on 429, `StoreError::Api` for other error bodies, and
    /// `StoreError::Http` on network failures.
    #[instrument(skip(self, query))]
    pub async fn query<T: DeserializeOwned>(&self, query: &str) -> Result<Vec<T>, StoreError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("query"))
            .query(&[("query", query)])
            .bearer_auth(self.inner.token.expose_secret())
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body: QueryResponse<Vec<T>> = response.json().await?;
        Ok(body.result)
    }

    /// Submit a mutation batch to the dataset.
    async fn mutate(&self, mutations: serde_json::Value) -> Result<(), StoreError> {
        let body = serde_json::json!({ "mutations": mutations });

        let response = self
            .inner
            .client
            .post(self.endpoint("mutate"))
            .bearer_auth(self.inner.token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let ack: MutateResponse = response.json().await?;
        debug!(transaction = ?ack.transaction_id, "mutation committed");
        Ok(())
    }

    /// Map error statuses before handing the response to a JSON decoder.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(StoreError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(StoreError::Unauthorized(
                "store rejected the API token".to_string(),
            ));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(response.url().path().to_string()));
        }

        if !status.is_success() {
            let description = response
                .json::<ErrorResponse>()
                .await
                .map_or_else(|_| format!("HTTP {status}"), |body| body.error.description);
            return Err(StoreError::Api(description));
        }

        Ok(response)
    }
}

impl ContentStore for StoreClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        self.query(queries::PRODUCTS).await
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.query(queries::ORDERS_WITH_ITEMS).await
    }

    #[instrument(skip(self, set), fields(document_id = %document_id))]
    async fn patch(&self, document_id: &str, set: serde_json::Value) -> Result<(), StoreError> {
        self.mutate(serde_json::json!([
            { "patch": { "id": document_id, "set": set } }
        ]))
        .await
    }

    #[instrument(skip(self), fields(document_id = %document_id))]
    async fn delete(&self, document_id: &str) -> Result<(), StoreError> {
        self.mutate(serde_json::json!([
            { "delete": { "id": document_id } }
        ]))
        .await
    }

    #[instrument(skip(self, upload), fields(filename = %upload.filename))]
    async fn upload_image(&self, upload: &ImageUpload) -> Result<AssetRef, StoreError> {
        let url = format!(
            "{}/{}/assets/images/{}",
            self.inner.base_url, self.inner.api_version, self.inner.dataset
        );

        let response = self
            .inner
            .client
            .post(url)
            .query(&[("filename", upload.filename.as_str())])
            .header(CONTENT_TYPE, &upload.content_type)
            .bearer_auth(self.inner.token.expose_secret())
            .body(upload.bytes.clone())
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body: AssetResponse = response.json().await?;
        Ok(body.document.id)
    }
}
