//! Fixed-schema feature vector.

use ndarray::Array2;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::constants::FEATURE_COUNT;
use crate::error::FieldError;
use crate::types::Feature;

/// Validated model input.
///
/// Always holds exactly [`FEATURE_COUNT`] finite, non-negative values in
/// [`Feature::ALL`] order. The only way to build one is through the checked
/// constructors.
///
/// # Example
///
/// ```rust
/// use homeval_core::types::{Feature, FeatureVector};
///
/// let v = FeatureVector::new([68_000.0, 6.0, 7.0, 4.0, 36_000.0]).unwrap();
/// assert_eq!(v.get(Feature::Rooms), 7.0);
/// assert!(FeatureVector::new([68_000.0, -6.0, 7.0, 4.0, 36_000.0]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Create a vector, checking each value in schema order
    pub fn new(values: [f64; FEATURE_COUNT]) -> std::result::Result<Self, FieldError> {
        for feature in Feature::ALL {
            feature.check(values[feature.index()])?;
        }
        Ok(Self(values))
    }

    /// Value of one feature
    #[inline]
    #[must_use]
    pub const fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    /// Average area income, the first column
    #[inline]
    #[must_use]
    pub const fn income(&self) -> f64 {
        self.get(Feature::Income)
    }

    /// Raw values in schema order
    #[inline]
    #[must_use]
    pub const fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Iterate `(feature, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Single-row matrix of shape `(1, FEATURE_COUNT)` for the scaler and model
    #[must_use]
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, FEATURE_COUNT), |(_, j)| self.0[j])
    }
}

/// Serialized as a map keyed by feature name, in schema order
impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.name(), &value)?;
        }
        map.end()
    }
}
