//! Constants used throughout homeval.

/// Number of features in the model input schema
pub const FEATURE_COUNT: usize = 5;

/// Average area income below which the form path asks the user to double check
pub const LOW_INCOME_THRESHOLD: f64 = 10_000.0;

/// Predictions above this value are abbreviated to millions
pub const MILLION_THRESHOLD: f64 = 1_000_000.0;

/// Default file name of the serialized regression model
pub const DEFAULT_MODEL_FILE: &str = "linear_regression_model.json";

/// Default file name of the serialized feature scaler
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Message shown for every prediction request while the artifacts are unavailable
pub const MODEL_NOT_LOADED: &str = "Model not loaded";
