//! Core domain types for house price prediction.

mod feature;
mod price;
mod vector;

pub use feature::Feature;
pub use price::Price;
pub use vector::FeatureVector;
