//! Best-effort log line for each successful prediction.

use chrono::{SecondsFormat, Utc};
use homeval_core::types::{FeatureVector, Price};
use serde::Serialize;

/// Current time as an ISO-8601 / RFC 3339 string with microseconds
#[must_use]
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    timestamp: String,
    source: &'a str,
    input: &'a FeatureVector,
    prediction: f64,
}

/// Emit one `info` event describing the prediction.
///
/// Never fails: if the entry cannot be built the problem is logged as a
/// warning and the request carries on.
pub fn log_prediction(source: &str, input: &FeatureVector, price: Price) {
    let entry = LogEntry {
        timestamp: timestamp(),
        source,
        input,
        prediction: price.as_f64(),
    };

    match serde_json::to_string(&entry) {
        Ok(json) => {
            tracing::info!(
                target: "homeval::predictions",
                entry = %json,
                "Prediction logged: {}",
                price
            );
        }
        // Unreachable for plain numeric entries
        Err(e) => tracing::warn!("Could not log prediction: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_rfc3339() {
        let ts = timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn test_entry_shape() {
        let input = FeatureVector::new([60_000.0, 5.0, 6.0, 3.0, 30_000.0]).unwrap();
        let entry = LogEntry {
            timestamp: timestamp(),
            source: "form",
            input: &input,
            prediction: 1_100_000.0,
        };
        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["source"], "form");
        assert_eq!(json["input"]["Avg. Area Income"], 60_000.0);
        assert_eq!(json["prediction"], 1_100_000.0);
    }

    #[test]
    fn test_non_finite_prediction_serializes_as_null() {
        let input = FeatureVector::new([0.0; 5]).unwrap();
        let entry = LogEntry {
            timestamp: timestamp(),
            source: "api",
            input: &input,
            prediction: f64::NAN,
        };
        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert!(json["prediction"].is_null());

        log_prediction("api", &input, Price::new(f64::NAN));
    }
}
