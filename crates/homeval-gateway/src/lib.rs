//! # homeval-gateway
//!
//! Web form and JSON API for house price predictions.
//!
//! This crate provides:
//! - Main entry point for the HTTP service
//! - Request field extraction and validation
//! - HTML page rendering
//! - Prometheus metrics export
//! - Configuration management
//! - Health checks

#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod extract;
pub mod logger;
pub mod metrics;
pub mod page;
pub mod server;

pub use config::AppConfig;
pub use metrics::MetricsRegistry;
pub use server::{router, serve, ServiceContext};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::extract::{extract_form, extract_json, Extraction};
    pub use crate::metrics::MetricsRegistry;
    pub use crate::server::{router, serve, ServiceContext};
}
