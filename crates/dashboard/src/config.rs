//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CLEMENTINE_STORE_URL` - Base URL of the hosted content lake
//!   (e.g., `https://acme.api.lumenlake.io`)
//! - `CLEMENTINE_STORE_PROJECT` - Project identifier (used in CDN asset paths)
//! - `CLEMENTINE_STORE_TOKEN` - API token with read/write access
//!
//! ## Optional
//! - `CLEMENTINE_STORE_DATASET` - Dataset name (default: `production`)
//! - `CLEMENTINE_STORE_API_VERSION` - API version segment (default: `v1`)
//! - `CLEMENTINE_CDN_URL` - Asset CDN base URL (default: `https://cdn.lumenlake.io`)

use secrecy::SecretString;
use thiserror::Error;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Dashboard configuration.
///
/// Implements `Debug` manually to redact the store token.
#[derive(Clone)]
pub struct DashboardConfig {
    /// Base URL of the hosted content lake.
    pub store_url: String,
    /// Project identifier.
    pub project_id: String,
    /// Dataset name (e.g., `production`).
    pub dataset: String,
    /// API version path segment (e.g., `v1`).
    pub api_version: String,
    /// API token with read/write access to the dataset.
    pub token: SecretString,
    /// Base URL of the asset CDN.
    pub cdn_url: String,
}

impl std::fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("store_url", &self.store_url)
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("token", &"[REDACTED]")
            .field("cdn_url", &self.cdn_url)
            .finish()
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or if the
    /// token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store_url = trim_trailing_slash(get_required_env("CLEMENTINE_STORE_URL")?);
        let project_id = get_required_env("CLEMENTINE_STORE_PROJECT")?;
        let dataset = get_env_or_default("CLEMENTINE_STORE_DATASET", "production");
        let api_version = get_env_or_default("CLEMENTINE_STORE_API_VERSION", "v1");
        let token = get_validated_secret("CLEMENTINE_STORE_TOKEN")?;
        let cdn_url = trim_trailing_slash(get_env_or_default(
            "CLEMENTINE_CDN_URL",
            "https://cdn.lumenlake.io",
        ));

        Ok(Self {
            store_url,
            project_id,
            dataset,
            api_version,
            token,
            cdn_url,
        })
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a secret is not an obvious placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
