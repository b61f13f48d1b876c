//! Startup loading of the scaler and model artifacts.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use homeval_core::constants::{DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE};
use homeval_core::error::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::inference::{LinearRegression, Predictor};
use crate::preprocessing::StandardScaler;

/// Locations of the two artifact files, relative to the working directory
/// unless absolute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    /// Serialized regression model
    pub model_path: PathBuf,
    /// Serialized feature scaler
    pub scaler_path: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            scaler_path: PathBuf::from(DEFAULT_SCALER_FILE),
        }
    }
}

impl ArtifactPaths {
    /// Both default file names inside `dir`
    #[must_use]
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            model_path: dir.join(DEFAULT_MODEL_FILE),
            scaler_path: dir.join(DEFAULT_SCALER_FILE),
        }
    }
}

/// Load both artifacts and pair them into a predictor
pub fn load_predictor(paths: &ArtifactPaths) -> Result<Predictor> {
    let scaler = StandardScaler::load(&paths.scaler_path)
        .map_err(|e| describe(&paths.scaler_path, &e))?;
    let model = LinearRegression::load(&paths.model_path)
        .map_err(|e| describe(&paths.model_path, &e))?;
    Predictor::new(Arc::new(scaler), Arc::new(model))
}

fn describe(path: &Path, err: &Error) -> Error {
    Error::ArtifactError(format!("{}: {err}", path.display()))
}

/// Readiness of the prediction pipeline, fixed once at startup
#[derive(Debug, Clone)]
pub enum ModelState {
    /// Artifacts loaded, predictions available
    Ready(Predictor),
    /// Artifacts unavailable, every prediction request is refused
    NotLoaded {
        /// Why loading failed
        reason: String,
    },
}

impl ModelState {
    /// Attempt to load the artifacts, degrading instead of failing
    #[must_use]
    pub fn load(paths: &ArtifactPaths) -> Self {
        match load_predictor(paths) {
            Ok(predictor) => {
                tracing::info!(
                    model = %paths.model_path.display(),
                    scaler = %paths.scaler_path.display(),
                    "Models loaded successfully"
                );
                ModelState::Ready(predictor)
            }
            Err(e) => {
                tracing::error!("Error loading models: {}", e);
                tracing::error!("Prediction endpoints will report that the model is not loaded");
                ModelState::NotLoaded {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Check if predictions are available
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready(_))
    }

    /// The predictor, when ready
    #[must_use]
    pub fn predictor(&self) -> Option<&Predictor> {
        match self {
            ModelState::Ready(p) => Some(p),
            ModelState::NotLoaded { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SCALER: &str = r#"{"mean": [68583.1, 5.98, 6.99, 3.98, 36163.5],
                             "scale": [10657.9, 0.99, 1.0, 1.23, 9925.6]}"#;
    const MODEL: &str = r#"{"coefficients": [230745.0, 163580.0, 120660.0, 2140.0, 151250.0],
                            "intercept": 1232072.6}"#;

    fn write_artifacts(dir: &Path, scaler: &str, model: &str) -> ArtifactPaths {
        let paths = ArtifactPaths::in_dir(dir);
        fs::write(&paths.scaler_path, scaler).unwrap();
        fs::write(&paths.model_path, model).unwrap();
        paths
    }

    #[test]
    fn test_default_paths() {
        let paths = ArtifactPaths::default();
        assert_eq!(paths.model_path, PathBuf::from("linear_regression_model.json"));
        assert_eq!(paths.scaler_path, PathBuf::from("scaler.json"));
    }

    #[test]
    fn test_load_ready() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_artifacts(dir.path(), SCALER, MODEL);

        let state = ModelState::load(&paths);
        assert!(state.is_ready());
        assert_eq!(state.predictor().unwrap().model_name(), "linear_regression");
    }

    #[test]
    fn test_missing_files_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let state = ModelState::load(&ArtifactPaths::in_dir(dir.path()));

        assert!(!state.is_ready());
        assert!(state.predictor().is_none());
        match state {
            ModelState::NotLoaded { reason } => assert!(reason.contains("scaler.json")),
            ModelState::Ready(_) => panic!("expected NotLoaded"),
        }
    }

    #[test]
    fn test_corrupt_model_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_artifacts(dir.path(), SCALER, "{\"coefficients\": [1.0,");

        let err = load_predictor(&paths).unwrap_err();
        assert!(matches!(err, Error::ArtifactError(_)));
        assert!(err.to_string().contains("linear_regression_model.json"));
        assert!(!ModelState::load(&paths).is_ready());
    }

    #[test]
    fn test_wrong_width_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_artifacts(
            dir.path(),
            r#"{"mean": [1.0, 2.0], "scale": [1.0, 1.0]}"#,
            r#"{"coefficients": [1.0, 2.0], "intercept": 0.0}"#,
        );

        assert!(matches!(
            load_predictor(&paths).unwrap_err(),
            Error::ShapeMismatch { .. }
        ));
    }
}
