//! HTTP server for the prediction form, JSON API, metrics and health checks.

use std::any::Any;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use homeval_core::constants::{LOW_INCOME_THRESHOLD, MODEL_NOT_LOADED};
use homeval_core::types::FeatureVector;
use homeval_model::artifacts::ModelState;
use homeval_model::inference::Prediction;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, PredictionConfig};
use crate::extract::{extract_form, extract_json, Extraction};
use crate::logger::{log_prediction, timestamp};
use crate::metrics::MetricsRegistry;
use crate::page::{Notice, Page};

const LOW_INCOME_WARNING: &str = "Income seems unusually low. Please check your input.";
const COMPUTATION_FAILED: &str = "Prediction failed, could not compute a price for this input";

/// Read-only state shared by every request handler.
///
/// Built once at startup. The model state never changes afterwards, so
/// handlers read it without locking.
pub struct ServiceContext {
    /// Loaded artifacts, or the reason they are missing
    pub model: ModelState,
    /// Metrics registry
    pub metrics: Arc<MetricsRegistry>,
    /// Form submissions below this income get a warning
    pub low_income_threshold: f64,
    /// Emit a log line per successful prediction
    pub log_predictions: bool,
    started: Instant,
}

impl ServiceContext {
    /// Create a context around an already loaded model state
    #[must_use]
    pub fn new(model: ModelState, metrics: Arc<MetricsRegistry>) -> Self {
        metrics.set_model_ready(model.is_ready());
        Self {
            model,
            metrics,
            low_income_threshold: LOW_INCOME_THRESHOLD,
            log_predictions: true,
            started: Instant::now(),
        }
    }

    /// Load the artifacts named in `config` and build the context
    #[must_use]
    pub fn from_config(config: &AppConfig, metrics: Arc<MetricsRegistry>) -> Self {
        Self::new(ModelState::load(&config.artifacts), metrics)
            .with_prediction_config(&config.prediction)
    }

    /// Apply prediction handling settings
    #[must_use]
    pub fn with_prediction_config(mut self, config: &PredictionConfig) -> Self {
        self.low_income_threshold = config.low_income_threshold;
        self.log_predictions = config.log_predictions;
        self
    }

    /// Check if predictions are available
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.model.is_ready()
    }

    /// Seconds since the context was built
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    fn record_success(&self, source: &str, input: &FeatureVector, prediction: &Prediction) {
        self.metrics.record_prediction(prediction.latency_ns);
        if self.log_predictions {
            log_prediction(source, input, prediction.price);
        }
    }

    fn record_failure(&self, err: &homeval_core::Error) {
        self.metrics.record_computation_failure();
        tracing::error!("Prediction failed: {}", err);
    }
}

/// Successful `/api/predict` response
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Raw predicted price
    pub prediction: f64,
    /// Human-readable price
    pub formatted_prediction: String,
    /// Time of the prediction
    pub timestamp: String,
}

/// Failed `/api/predict` response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// What went wrong
    pub error: String,
}

fn api_error(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string
    pub status: String,
    /// Application version
    pub version: String,
    /// Whether the artifacts are loaded
    pub model_loaded: bool,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

async fn home() -> Page {
    Page::blank()
}

async fn predict_form(
    State(ctx): State<Arc<ServiceContext>>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Page {
    let Some(predictor) = ctx.model.predictor() else {
        return Page::error(format!(
            "{MODEL_NOT_LOADED}. Please provide the model and scaler artifacts."
        ));
    };

    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            tracing::debug!("Unreadable form body: {}", rejection);
            HashMap::new()
        }
    };

    let input = match extract_form(&fields, ctx.low_income_threshold) {
        Ok(Extraction::Ready(input)) => input,
        Ok(Extraction::LowIncome(input)) => {
            ctx.metrics.record_low_income_warning();
            return Page::with_notice(Notice::Warning(LOW_INCOME_WARNING.to_string()))
                .with_inputs(input);
        }
        Err(e) => {
            ctx.metrics.record_validation_failure();
            return Page::error(e.to_string());
        }
    };

    match predictor.predict(&input) {
        Ok(prediction) => {
            ctx.record_success("form", &input, &prediction);
            Page::with_notice(Notice::Prediction(prediction.price)).with_inputs(input)
        }
        Err(e) => {
            ctx.record_failure(&e);
            Page::error(COMPUTATION_FAILED)
        }
    }
}

async fn predict_api(
    State(ctx): State<Arc<ServiceContext>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Some(predictor) = ctx.model.predictor() else {
        return api_error(StatusCode::INTERNAL_SERVER_ERROR, MODEL_NOT_LOADED);
    };

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            ctx.metrics.record_validation_failure();
            return api_error(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let input = match extract_json(&body) {
        Ok(input) => input,
        Err(e) => {
            ctx.metrics.record_validation_failure();
            return api_error(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    match predictor.predict(&input) {
        Ok(prediction) => {
            ctx.record_success("api", &input, &prediction);
            Json(PredictResponse {
                prediction: prediction.price.as_f64(),
                formatted_prediction: prediction.price.formatted(),
                timestamp: timestamp(),
            })
            .into_response()
        }
        Err(e) => {
            ctx.record_failure(&e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, COMPUTATION_FAILED)
        }
    }
}

async fn health(State(ctx): State<Arc<ServiceContext>>) -> (StatusCode, Json<HealthResponse>) {
    let ready = ctx.is_ready();
    let code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = HealthResponse {
        status: (if ready { "ok" } else { "degraded" }).to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_loaded: ready,
        uptime_secs: ctx.uptime_secs(),
    };
    (code, Json(body))
}

async fn metrics(State(ctx): State<Arc<ServiceContext>>) -> Response {
    match ctx.metrics.encode() {
        Ok(body) => (
            [(
                header::CONTENT_TYPE,
                "application/openmetrics-text; version=1.0.0; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn not_found() -> (StatusCode, Page) {
    (StatusCode::NOT_FOUND, Page::error("Page not found."))
}

fn internal_error(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Request handler panicked: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Page::error("Internal server error."),
    )
        .into_response()
}

/// Build the application router
pub fn router(ctx: Arc<ServiceContext>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict_form))
        .route("/api/predict", post(predict_api))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(internal_error))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Serve the application until Ctrl+C
pub async fn serve(ctx: Arc<ServiceContext>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Access the app at http://{}", listener.local_addr()?);

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
