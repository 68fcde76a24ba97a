//! CDN URL resolution for image asset references.
//!
//! Asset references have the form `image-<hash>-<width>x<height>-<format>`;
//! the CDN serves the file at
//! `{cdn}/images/{project}/{dataset}/<hash>-<width>x<height>.<format>`.
//! Resolution is pure and synchronous; no network involved.

use clementine_core::AssetRef;
use thiserror::Error;
use url::Url;

/// Errors that can occur while resolving an asset reference.
#[derive(Debug, Error)]
pub enum AssetUrlError {
    /// The reference does not follow the `image-<hash>-<dims>-<format>` form.
    #[error("Malformed asset reference: {0}")]
    MalformedReference(String),

    /// The configured CDN base URL is not a valid URL.
    #[error("Invalid CDN base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Resolves asset references to renderable CDN URLs.
#[derive(Debug, Clone)]
pub struct AssetUrlResolver {
    cdn_url: String,
    project_id: String,
    dataset: String,
}

impl AssetUrlResolver {
    /// Create a resolver for the given CDN base, project, and dataset.
    #[must_use]
    pub fn new(
        cdn_url: impl Into<String>,
        project_id: impl Into<String>,
        dataset: impl Into<String>,
    ) -> Self {
        Self {
            cdn_url: cdn_url.into(),
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// Build a resolver from dashboard configuration.
    #[must_use]
    pub fn from_config(config: &crate::config::DashboardConfig) -> Self {
        Self::new(&config.cdn_url, &config.project_id, &config.dataset)
    }

    /// Resolve an asset reference to its CDN URL.
    ///
    /// # Errors
    ///
    /// Returns `AssetUrlError::MalformedReference` if the reference does not
    /// have the expected `image-<hash>-<dims>-<format>` shape.
    pub fn url_for(&self, reference: &AssetRef) -> Result<Url, AssetUrlError> {
        let malformed = || AssetUrlError::MalformedReference(reference.as_str().to_string());

        let rest = reference.as_str().strip_prefix("image-").ok_or_else(malformed)?;
        // rest = "<hash>-<width>x<height>-<format>"
        let (body, format) = rest.rsplit_once('-').ok_or_else(malformed)?;
        if body.is_empty() || format.is_empty() || !body.contains('-') {
            return Err(malformed());
        }

        let url = format!(
            "{}/images/{}/{}/{body}.{format}",
            self.cdn_url, self.project_id, self.dataset
        );
        Ok(Url::parse(&url)?)
    }
}
