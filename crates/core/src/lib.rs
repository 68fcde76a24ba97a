//! Clementine Core - Shared types library.
//!
//! This crate provides the common types used across the Clementine admin
//! components:
//! - `dashboard` - The admin dashboard core (store client, mutators, view state)
//! - `cli` - Command-line entry point for operators
//!
//! # Architecture
//!
//! The core crate contains only types and pure computations - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Entity types mirroring the hosted content lake's documents
//! - [`metrics`] - Derived order metrics and status filtering

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod metrics;
pub mod types;

pub use metrics::{Metrics, filter_orders};
pub use types::*;
