//! # homeval-model
//!
//! Model loading and inference for house price prediction.
//!
//! This crate provides:
//! - A standard scaler fitted offline
//! - A linear regression model fitted offline
//! - Startup artifact loading with a degraded not-loaded state
//!
//! ## Example
//!
//! ```rust,ignore
//! use homeval_model::artifacts::{ArtifactPaths, ModelState};
//!
//! let state = ModelState::load(&ArtifactPaths::default());
//! if let Some(predictor) = state.predictor() {
//!     let prediction = predictor.predict(&features)?;
//!     println!("{}", prediction.price);
//! }
//! ```

#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc
)]

pub mod artifacts;
pub mod inference;
pub mod preprocessing;

pub use artifacts::{load_predictor, ArtifactPaths, ModelState};
pub use inference::{LinearRegression, Prediction, Predictor};
pub use preprocessing::StandardScaler;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::artifacts::{ArtifactPaths, ModelState};
    pub use crate::inference::{LinearRegression, Prediction, Predictor};
    pub use crate::preprocessing::StandardScaler;
}
