//! Turning request fields into a validated feature vector.
//!
//! Both request paths check fields in schema order and stop at the first
//! failure:
//! - missing, empty or null: [`FieldError::Missing`]
//! - not a finite number: [`FieldError::Invalid`]
//! - below zero: [`FieldError::Negative`]
//!
//! Only the form path applies the low-income check.

use std::collections::HashMap;

use homeval_core::constants::FEATURE_COUNT;
use homeval_core::error::FieldError;
use homeval_core::types::{Feature, FeatureVector};
use serde_json::Value;
use thiserror::Error;

/// Outcome of a successful form extraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extraction {
    /// All fields valid, ready for the model
    Ready(FeatureVector),
    /// All fields valid but the income is suspiciously low; redisplay, do not predict
    LowIncome(FeatureVector),
}

impl Extraction {
    /// The parsed values, whatever the outcome
    #[must_use]
    pub const fn values(&self) -> &FeatureVector {
        match self {
            Extraction::Ready(v) | Extraction::LowIncome(v) => v,
        }
    }
}

/// Why a JSON body could not be turned into a feature vector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonInputError {
    /// Body is valid JSON but not an object
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// A field failed validation
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Extract features from form fields keyed by feature name
pub fn extract_form(
    fields: &HashMap<String, String>,
    low_income_threshold: f64,
) -> Result<Extraction, FieldError> {
    let mut values = [0.0; FEATURE_COUNT];
    for feature in Feature::ALL {
        let raw = fields
            .get(feature.name())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or(FieldError::Missing(feature))?;
        let parsed: f64 = raw.parse().map_err(|_| FieldError::Invalid(feature))?;
        values[feature.index()] = feature.check(parsed)?;
    }

    let vector = FeatureVector::new(values)?;
    if vector.income() < low_income_threshold {
        Ok(Extraction::LowIncome(vector))
    } else {
        Ok(Extraction::Ready(vector))
    }
}

/// Extract features from a JSON object keyed by feature name
pub fn extract_json(body: &Value) -> Result<FeatureVector, JsonInputError> {
    let object = body.as_object().ok_or(JsonInputError::NotAnObject)?;

    let mut values = [0.0; FEATURE_COUNT];
    for feature in Feature::ALL {
        let value = match object.get(feature.name()) {
            None | Some(Value::Null) => return Err(FieldError::Missing(feature).into()),
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(FieldError::Missing(feature).into())
            }
            Some(Value::Number(n)) => n.as_f64().ok_or(FieldError::Invalid(feature))?,
            Some(_) => return Err(FieldError::Invalid(feature).into()),
        };
        values[feature.index()] = feature.check(value)?;
    }

    Ok(FeatureVector::new(values)?)
}
