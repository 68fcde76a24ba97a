//! Clementine Dashboard - admin dashboard core.
//!
//! This crate holds everything behind the storefront's admin dashboard
//! except the terminal surface itself:
//!
//! - [`config`] - environment-driven configuration for the hosted store
//! - [`store`] - the content-lake client (queries, patches, deletes,
//!   asset uploads) and the [`store::ContentStore`] seam
//! - [`assets`] - pure CDN URL resolution for image asset references
//! - [`prompt`] - the confirmation/notification seam mutations go through
//! - [`session`] - the explicit authentication capability
//! - [`dashboard`] - the view-state holder, fetch adapter, and mutators
//!
//! All persistence, querying, and image processing is delegated to the
//! hosted content lake; this crate holds only transient local copies of
//! its documents.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod assets;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod prompt;
pub mod session;
pub mod store;

pub use dashboard::{Dashboard, Outcome, ProductDraft, Section};
pub use error::DashboardError;
pub use session::Session;
