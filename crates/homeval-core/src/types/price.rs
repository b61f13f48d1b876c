//! Predicted price and its display format.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MILLION_THRESHOLD;

/// A predicted house price in dollars.
///
/// `Display` renders the human-readable form: values above one million are
/// abbreviated (`$1.25M`), everything else is a rounded, thousands-grouped
/// dollar amount (`$450,000`).
///
/// # Example
///
/// ```rust
/// use homeval_core::types::Price;
///
/// assert_eq!(Price::new(1_250_000.0).to_string(), "$1.25M");
/// assert_eq!(Price::new(450_000.0).to_string(), "$450,000");
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Wrap a raw dollar amount
    #[inline]
    #[must_use]
    pub const fn new(dollars: f64) -> Self {
        Self(dollars)
    }

    /// Raw dollar amount
    #[inline]
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0
    }

    /// Human-readable form, same as `Display`
    #[must_use]
    pub fn formatted(self) -> String {
        self.to_string()
    }
}

/// Group the integer digits of `rounded` with commas, keeping a leading sign.
fn group_thousands(rounded: &str) -> String {
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded),
    };
    // "-0" after rounding a tiny negative value
    let sign = if digits.bytes().all(|b| b == b'0') { "" } else { sign };

    let mut out = String::with_capacity(rounded.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({})", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > MILLION_THRESHOLD {
            write!(f, "${:.2}M", self.0 / MILLION_THRESHOLD)
        } else {
            write!(f, "${}", group_thousands(&format!("{:.0}", self.0)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_millions() {
        assert_eq!(Price::new(1_250_000.0).to_string(), "$1.25M");
        assert_eq!(Price::new(1_234_567.89).to_string(), "$1.23M");
        assert_eq!(Price::new(12_500_000.0).to_string(), "$12.50M");
    }

    #[test]
    fn test_price_thousands() {
        assert_eq!(Price::new(450_000.0).to_string(), "$450,000");
        assert_eq!(Price::new(999_999.4).to_string(), "$999,999");
        assert_eq!(Price::new(1_234.0).to_string(), "$1,234");
        assert_eq!(Price::new(999.0).to_string(), "$999");
        assert_eq!(Price::new(0.0).to_string(), "$0");
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(Price::new(1_000_000.0).to_string(), "$1,000,000");
        assert_eq!(Price::new(1_000_001.0).to_string(), "$1.00M");
    }

    #[test]
    fn test_price_ties_round_to_even() {
        assert_eq!(Price::new(0.5).to_string(), "$0");
        assert_eq!(Price::new(2.5).to_string(), "$2");
        assert_eq!(Price::new(3.5).to_string(), "$4");
        assert_eq!(Price::new(450_000.5).to_string(), "$450,000");
        assert_eq!(Price::new(999_999.5).to_string(), "$1,000,000");
    }

    #[test]
    fn test_price_negative() {
        assert_eq!(Price::new(-12_345.0).to_string(), "$-12,345");
        assert_eq!(Price::new(-0.3).to_string(), "$0");
    }

    #[test]
    fn test_price_serde_transparent() {
        let json = serde_json::to_string(&Price::new(450_000.5)).unwrap();
        assert_eq!(json, "450000.5");
    }
}
