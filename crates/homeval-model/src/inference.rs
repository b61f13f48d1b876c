//! Linear regression inference over standardized features.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use homeval_core::constants::FEATURE_COUNT;
use homeval_core::error::{Error, Result};
use homeval_core::traits::{FeatureTransform, Regressor};
use homeval_core::types::{FeatureVector, Price};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Ordinary least squares model: `y = x · coefficients + intercept`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    /// One weight per input column
    coefficients: Vec<f64>,
    /// Bias term
    intercept: f64,
}

impl LinearRegression {
    /// Create a model from fitted parameters
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        let model = Self {
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    /// Load a model artifact from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a model artifact from a JSON document
    pub fn from_json(content: &str) -> Result<Self> {
        let model: LinearRegression = serde_json::from_str(content)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(Error::ArtifactError("model has no coefficients".to_string()));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::ArtifactError(
                "model parameters must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl Regressor for LinearRegression {
    fn name(&self) -> &str {
        "linear_regression"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, input: &Array2<f64>) -> Result<Array1<f64>> {
        if input.ncols() != self.coefficients.len() {
            return Err(Error::ShapeMismatch {
                expected: self.coefficients.len(),
                actual: input.ncols(),
            });
        }

        let weights = ArrayView1::from(self.coefficients.as_slice());
        Ok(input.dot(&weights) + self.intercept)
    }
}

/// Model prediction output
#[derive(Debug, Clone, Copy)]
pub struct Prediction {
    /// Predicted price
    pub price: Price,
    /// Scaler plus model latency in nanoseconds
    pub latency_ns: u64,
}

/// Scaler and model pair applied to one feature vector at a time.
///
/// Both halves are shared read-only, so a `Predictor` can be cloned into
/// every request handler without locking.
#[derive(Clone)]
pub struct Predictor {
    scaler: Arc<dyn FeatureTransform>,
    model: Arc<dyn Regressor>,
}

impl Predictor {
    /// Pair a scaler with a model, checking both match the feature schema
    pub fn new(scaler: Arc<dyn FeatureTransform>, model: Arc<dyn Regressor>) -> Result<Self> {
        for actual in [scaler.n_features(), model.n_features()] {
            if actual != FEATURE_COUNT {
                return Err(Error::ShapeMismatch {
                    expected: FEATURE_COUNT,
                    actual,
                });
            }
        }
        Ok(Self { scaler, model })
    }

    /// Standardize `input`, then run the model on it
    pub fn predict(&self, input: &FeatureVector) -> Result<Prediction> {
        let start = Instant::now();

        let scaled = self.scaler.transform(&input.to_array())?;
        let output = self.model.predict(&scaled)?;

        let value = output
            .first()
            .copied()
            .ok_or_else(|| Error::ModelError("no output from model".to_string()))?;
        if !value.is_finite() {
            return Err(Error::ModelError(format!(
                "{} produced a non-finite prediction",
                self.model.name()
            )));
        }

        Ok(Prediction {
            price: Price::new(value),
            latency_ns: start.elapsed().as_nanos() as u64,
        })
    }

    /// Name of the underlying model
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("model", &self.model.name())
            .field("n_features", &self.model.n_features())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::StandardScaler;
    use ndarray::array;

    struct Exploding;

    impl Regressor for Exploding {
        fn name(&self) -> &str {
            "exploding"
        }

        fn n_features(&self) -> usize {
            FEATURE_COUNT
        }

        fn predict(&self, input: &Array2<f64>) -> Result<Array1<f64>> {
            Ok(Array1::from_elem(input.nrows(), f64::INFINITY))
        }
    }

    fn sample_predictor() -> Predictor {
        let scaler = StandardScaler::new(
            vec![68_000.0, 6.0, 7.0, 4.0, 36_000.0],
            vec![10_000.0, 1.0, 1.0, 1.0, 10_000.0],
        )
        .unwrap();
        let model = LinearRegression::new(
            vec![230_000.0, 165_000.0, 120_000.0, 3_000.0, 150_000.0],
            1_232_000.0,
        )
        .unwrap();
        Predictor::new(Arc::new(scaler), Arc::new(model)).unwrap()
    }

    #[test]
    fn test_linear_predict() {
        let model = LinearRegression::new(vec![2.0, -1.0], 0.5).unwrap();
        let out = model.predict(&array![[3.0, 1.0], [0.0, 0.0]]).unwrap();
        assert_eq!(out, array![5.5, 0.5]);
    }

    #[test]
    fn test_linear_column_mismatch() {
        let model = LinearRegression::new(vec![1.0; 5], 0.0).unwrap();
        assert!(model.predict(&array![[1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_model_from_json() {
        let model =
            LinearRegression::from_json(r#"{"coefficients": [1, 2, 3, 4, 5], "intercept": -7.5}"#)
                .unwrap();
        assert_eq!(
            model,
            LinearRegression::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], -7.5).unwrap()
        );
    }

    #[test]
    fn test_model_rejects_empty() {
        let err = LinearRegression::from_json(r#"{"coefficients": [], "intercept": 1.0}"#)
            .unwrap_err();
        assert!(matches!(err, Error::ArtifactError(_)));
    }

    #[test]
    fn test_model_rejects_missing_intercept() {
        let err = LinearRegression::from_json(r#"{"coefficients": [1.0]}"#).unwrap_err();
        assert!(matches!(err, Error::SerializationError(_)));
    }

    #[test]
    fn test_predictor_at_mean_returns_intercept() {
        let predictor = sample_predictor();
        let input = FeatureVector::new([68_000.0, 6.0, 7.0, 4.0, 36_000.0]).unwrap();
        let prediction = predictor.predict(&input).unwrap();
        assert!((prediction.price.as_f64() - 1_232_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_predictor_applies_scaler_before_model() {
        let predictor = sample_predictor();
        // One standard deviation above the mean income
        let input = FeatureVector::new([78_000.0, 6.0, 7.0, 4.0, 36_000.0]).unwrap();
        let prediction = predictor.predict(&input).unwrap();
        assert!((prediction.price.as_f64() - 1_462_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_predictor_rejects_schema_mismatch() {
        let scaler = StandardScaler::identity(4);
        let model = LinearRegression::new(vec![1.0; 5], 0.0).unwrap();
        let err = Predictor::new(Arc::new(scaler), Arc::new(model)).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: 5,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_predictor_non_finite_is_model_error() {
        let predictor =
            Predictor::new(Arc::new(StandardScaler::identity(FEATURE_COUNT)), Arc::new(Exploding))
                .unwrap();
        let input = FeatureVector::new([1.0; FEATURE_COUNT]).unwrap();
        let err = predictor.predict(&input).unwrap_err();
        assert!(matches!(err, Error::ModelError(_)));
    }
}
