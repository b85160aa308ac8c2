//! Prometheus metrics for palette-service.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;
use std::time::Instant;

/// Registry plus every collector registered in it.
pub struct Metrics {
    pub registry: Registry,
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub palette_generations_total: IntCounterVec,
    pub palette_provider_latency_seconds: HistogramVec,
    pub palette_provider_errors_total: IntCounterVec,
    pub palette_tokens_total: IntCounterVec,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Initialize all metrics. Later and concurrent calls share the first result.
pub fn init_metrics() -> &'static Metrics {
    METRICS.get_or_init(|| {
        let metrics = Metrics::new();
        tracing::info!("Prometheus metrics initialized");
        metrics
    })
}

impl Metrics {
    fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("Failed to create http_requests_total metric");

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
            &["method", "path"],
        )
        .expect("Failed to create http_request_duration_seconds metric");

        // outcome: success, inference_error, invalid_structure, shape_mismatch
        let palette_generations_total = IntCounterVec::new(
            Opts::new("palette_generations_total", "Total palette generations"),
            &["outcome"],
        )
        .expect("Failed to create palette_generations_total metric");

        let palette_provider_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "palette_provider_latency_seconds",
                "Inference provider latency in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 30.0, 60.0]),
            &["provider", "model"],
        )
        .expect("Failed to create palette_provider_latency_seconds metric");

        let palette_provider_errors_total = IntCounterVec::new(
            Opts::new(
                "palette_provider_errors_total",
                "Total inference provider errors",
            ),
            &["provider", "error_type"],
        )
        .expect("Failed to create palette_provider_errors_total metric");

        let palette_tokens_total = IntCounterVec::new(
            Opts::new("palette_tokens_total", "Total tokens processed"),
            &["model", "type"], // type: input, output
        )
        .expect("Failed to create palette_tokens_total metric");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("Failed to register http_requests_total");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("Failed to register http_request_duration_seconds");
        registry
            .register(Box::new(palette_generations_total.clone()))
            .expect("Failed to register palette_generations_total");
        registry
            .register(Box::new(palette_provider_latency_seconds.clone()))
            .expect("Failed to register palette_provider_latency_seconds");
        registry
            .register(Box::new(palette_provider_errors_total.clone()))
            .expect("Failed to register palette_provider_errors_total");
        registry
            .register(Box::new(palette_tokens_total.clone()))
            .expect("Failed to register palette_tokens_total");

        Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            palette_generations_total,
            palette_provider_latency_seconds,
            palette_provider_errors_total,
            palette_tokens_total,
        }
    }
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let metric_families = init_metrics().registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

/// Record a completed HTTP request.
pub fn record_http_request(method: &str, path: &str, status: &str, duration_secs: f64) {
    let metrics = init_metrics();
    metrics
        .http_requests_total
        .with_label_values(&[method, path, status])
        .inc();
    metrics
        .http_request_duration_seconds
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Record the outcome of one palette generation.
pub fn record_generation(outcome: &str) {
    init_metrics()
        .palette_generations_total
        .with_label_values(&[outcome])
        .inc();
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    init_metrics()
        .palette_provider_latency_seconds
        .with_label_values(&[provider, model])
        .observe(duration_secs);
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    init_metrics()
        .palette_provider_errors_total
        .with_label_values(&[provider, error_type])
        .inc();
}

/// Record token usage.
pub fn record_tokens(model: &str, input_tokens: u32, output_tokens: u32) {
    let counter = &init_metrics().palette_tokens_total;
    counter
        .with_label_values(&[model, "input"])
        .inc_by(u64::from(input_tokens));
    counter
        .with_label_values(&[model, "output"])
        .inc_by(u64::from(output_tokens));
}

/// Axum middleware recording request count and latency.
pub async fn http_metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    // Route templates keep label cardinality bounded.
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;

    record_http_request(
        &method,
        &path,
        response.status().as_str(),
        start.elapsed().as_secs_f64(),
    );

    response
}
