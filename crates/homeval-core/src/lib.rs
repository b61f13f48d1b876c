//! # homeval-core
//!
//! Core types, traits, and utilities for the homeval house price predictor.
//!
//! This crate provides:
//! - The fixed five-column feature schema: `Feature`
//! - Validated model input: `FeatureVector`
//! - Predicted price with its display format: `Price`
//! - Traits implemented by fitted scalers and regressors
//!
//! ## Example
//!
//! ```rust
//! use homeval_core::types::{Feature, FeatureVector, Price};
//!
//! let input = FeatureVector::new([68_583.1, 5.98, 6.99, 3.98, 36_163.5]).unwrap();
//! assert_eq!(input.get(Feature::Income), 68_583.1);
//! assert_eq!(Price::new(450_000.0).to_string(), "$450,000");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{Error, FieldError, Result};
pub use traits::*;
pub use types::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::constants::*;
    pub use crate::error::{Error, FieldError, Result};
    pub use crate::traits::*;
    pub use crate::types::*;
}
