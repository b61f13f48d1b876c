//! Input feature schema.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::FEATURE_COUNT;
use crate::error::FieldError;

/// One column of the model input.
///
/// The declaration order is the column order the scaler and model were
/// fitted with. The display name doubles as the form field name and the
/// JSON key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Feature {
    /// Average income of residents in the area
    #[serde(rename = "Avg. Area Income")]
    Income = 0,
    /// Average age of houses in the area
    #[serde(rename = "Avg. Area House Age")]
    HouseAge = 1,
    /// Average number of rooms per house
    #[serde(rename = "Avg. Area Number of Rooms")]
    Rooms = 2,
    /// Average number of bedrooms per house
    #[serde(rename = "Avg. Area Number of Bedrooms")]
    Bedrooms = 3,
    /// Population of the area
    #[serde(rename = "Area Population")]
    AreaPopulation = 4,
}

impl Feature {
    /// All features in schema order
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Income,
        Feature::HouseAge,
        Feature::Rooms,
        Feature::Bedrooms,
        Feature::AreaPopulation,
    ];

    /// Wire name used by the form and the JSON API
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Feature::Income => "Avg. Area Income",
            Feature::HouseAge => "Avg. Area House Age",
            Feature::Rooms => "Avg. Area Number of Rooms",
            Feature::Bedrooms => "Avg. Area Number of Bedrooms",
            Feature::AreaPopulation => "Area Population",
        }
    }

    /// Column index in the feature vector
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Check a parsed value against the domain of every feature.
    ///
    /// Non-finite values are invalid, values below zero are negative.
    pub fn check(self, value: f64) -> Result<f64, FieldError> {
        if !value.is_finite() {
            Err(FieldError::Invalid(self))
        } else if value < 0.0 {
            Err(FieldError::Negative(self))
        } else {
            Ok(value)
        }
    }
}

impl fmt::Debug for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Feature({})", self.name())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
