//! Core traits for the prediction pipeline.

use ndarray::{Array1, Array2};

/// A fitted, read-only transform applied to raw features before inference
pub trait FeatureTransform: Send + Sync {
    /// Number of input columns the transform was fitted on
    fn n_features(&self) -> usize;

    /// Transform a `(rows, n_features)` matrix
    fn transform(&self, input: &Array2<f64>) -> Result<Array2<f64>, crate::Error>;
}

/// A fitted, read-only regression model
pub trait Regressor: Send + Sync {
    /// Model name for logging
    fn name(&self) -> &str;

    /// Number of input columns the model was fitted on
    fn n_features(&self) -> usize;

    /// Predict one value per input row
    fn predict(&self, input: &Array2<f64>) -> Result<Array1<f64>, crate::Error>;
}
