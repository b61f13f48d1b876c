//! Feature standardization fitted offline.

use std::path::Path;

use homeval_core::error::{Error, Result};
use homeval_core::traits::FeatureTransform;
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Z-score scaler: `(x - mean) / scale` per column.
///
/// Parameters come from an externally fitted standard scaler and are never
/// modified after load. A zero scale means the column was constant during
/// fitting and is treated as `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column means
    mean: Vec<f64>,
    /// Per-column standard deviations
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Create a scaler from fitted statistics
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Identity scaler over `num_features` columns
    #[must_use]
    pub fn identity(num_features: usize) -> Self {
        Self {
            mean: vec![0.0; num_features],
            scale: vec![1.0; num_features],
        }
    }

    /// Load a scaler artifact from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a scaler artifact from a JSON document
    pub fn from_json(content: &str) -> Result<Self> {
        let scaler: StandardScaler = serde_json::from_str(content)?;
        scaler.validate()?;
        Ok(scaler)
    }

    fn validate(&self) -> Result<()> {
        if self.mean.len() != self.scale.len() {
            return Err(Error::ArtifactError(format!(
                "scaler has {} means but {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err(Error::ArtifactError(
                "scaler parameters must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Get means
    #[must_use]
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Get scales
    #[must_use]
    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}

impl FeatureTransform for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, input: &Array2<f64>) -> Result<Array2<f64>> {
        if input.ncols() != self.mean.len() {
            return Err(Error::ShapeMismatch {
                expected: self.mean.len(),
                actual: input.ncols(),
            });
        }

        let mean = ArrayView1::from(self.mean.as_slice());
        let scale = ArrayView1::from(self.scale.as_slice())
            .mapv(|s| if s == 0.0 { 1.0 } else { s });

        Ok((input - &mean) / &scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(vec![10.0, 2.0], vec![5.0, 0.5]).unwrap();
        let out = scaler.transform(&array![[20.0, 1.0]]).unwrap();

        assert!((out[[0, 0]] - 2.0).abs() < 1e-12);
        assert!((out[[0, 1]] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_scale_is_unit() {
        let scaler = StandardScaler::new(vec![3.0], vec![0.0]).unwrap();
        let out = scaler.transform(&array![[5.0]]).unwrap();
        assert_eq!(out[[0, 0]], 2.0);
    }

    #[test]
    fn test_identity() {
        let scaler = StandardScaler::identity(3);
        let input = array![[1.0, 2.0, 3.0]];
        assert_eq!(scaler.transform(&input).unwrap(), input);
    }

    #[test]
    fn test_column_mismatch() {
        let scaler = StandardScaler::identity(5);
        let err = scaler.transform(&array![[1.0, 2.0]]).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: 5,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_from_json() {
        let scaler = StandardScaler::from_json(r#"{"mean": [1.0, 2.0], "scale": [3.0, 4.0]}"#)
            .unwrap();
        assert_eq!(scaler.mean(), &[1.0, 2.0]);
        assert_eq!(scaler.scale(), &[3.0, 4.0]);
        assert_eq!(scaler.n_features(), 2);
    }

    #[test]
    fn test_from_json_rejects_mismatched_lengths() {
        let err = StandardScaler::from_json(r#"{"mean": [1.0, 2.0], "scale": [3.0]}"#).unwrap_err();
        assert!(matches!(err, Error::ArtifactError(_)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = StandardScaler::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::SerializationError(_)));
    }
}
