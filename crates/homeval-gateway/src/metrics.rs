//! Prometheus metrics for monitoring.

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::metrics::histogram::{exponential_buckets, Histogram};
use prometheus_client::registry::Registry;

/// Metrics registry for the prediction service
#[derive(Debug)]
pub struct MetricsRegistry {
    /// Prometheus registry
    registry: Registry,
    /// Successful predictions
    pub predictions_total: Counter,
    /// Requests rejected by field validation
    pub validation_failures_total: Counter,
    /// Form submissions answered with the low-income warning
    pub low_income_warnings_total: Counter,
    /// Scaler or model failures
    pub computation_failures_total: Counter,
    /// 1 when the artifacts are loaded, 0 otherwise
    pub model_ready: Gauge,
    /// Scaler plus model latency histogram (nanoseconds)
    pub inference_latency_ns: Histogram,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRegistry {
    /// Create a new metrics registry
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let predictions_total = Counter::default();
        registry.register(
            "homeval_predictions",
            "Total number of successful predictions",
            predictions_total.clone(),
        );

        let validation_failures_total = Counter::default();
        registry.register(
            "homeval_validation_failures",
            "Total prediction requests rejected by field validation",
            validation_failures_total.clone(),
        );

        let low_income_warnings_total = Counter::default();
        registry.register(
            "homeval_low_income_warnings",
            "Total form submissions answered with the low income warning",
            low_income_warnings_total.clone(),
        );

        let computation_failures_total = Counter::default();
        registry.register(
            "homeval_computation_failures",
            "Total scaler or model failures",
            computation_failures_total.clone(),
        );

        let model_ready = Gauge::default();
        registry.register(
            "homeval_model_ready",
            "Whether the model and scaler artifacts are loaded",
            model_ready.clone(),
        );

        // 100ns to ~100ms
        let inference_latency_ns = Histogram::new(exponential_buckets(100.0, 2.0, 20));
        registry.register(
            "homeval_inference_latency_ns",
            "Scaler plus model latency in nanoseconds",
            inference_latency_ns.clone(),
        );

        Self {
            registry,
            predictions_total,
            validation_failures_total,
            low_income_warnings_total,
            computation_failures_total,
            model_ready,
            inference_latency_ns,
        }
    }

    /// Record a successful prediction
    pub fn record_prediction(&self, latency_ns: u64) {
        self.predictions_total.inc();
        self.inference_latency_ns.observe(latency_ns as f64);
    }

    /// Record a validation failure
    pub fn record_validation_failure(&self) {
        self.validation_failures_total.inc();
    }

    /// Record a low-income warning
    pub fn record_low_income_warning(&self) {
        self.low_income_warnings_total.inc();
    }

    /// Record a scaler or model failure
    pub fn record_computation_failure(&self) {
        self.computation_failures_total.inc();
    }

    /// Update model readiness
    pub fn set_model_ready(&self, ready: bool) {
        self.model_ready.set(i64::from(ready));
    }

    /// Encode metrics for Prometheus scraping
    pub fn encode(&self) -> Result<String, std::fmt::Error> {
        let mut buffer = String::new();
        encode(&mut buffer, &self.registry)?;
        Ok(buffer)
    }
}
