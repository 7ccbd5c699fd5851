use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    trace::{Sampler, SdkTracerProvider},
    Resource,
};
use tracing::{error, info};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::TelemetryConfig;

const DEFAULT_FILTER: &str = "info,sqlx=warn,hyper=warn,tower=warn";

/// Install the global subscriber: JSON lines on stdout filtered by
/// `RUST_LOG`, plus OTLP span export when enabled. Call once, before
/// anything logs.
pub fn init_tracing(telemetry: &TelemetryConfig) {
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_target(false)
                .with_span_events(fmt::format::FmtSpan::CLOSE),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)));

    if !telemetry.otel_enabled {
        subscriber.init();
        return;
    }

    match tracer_provider(telemetry) {
        Ok(provider) => {
            let tracer = provider.tracer(telemetry.service_name.clone());
            opentelemetry::global::set_tracer_provider(provider);
            subscriber.with(OpenTelemetryLayer::new(tracer)).init();

            info!(
                endpoint = %telemetry.otlp_endpoint,
                sampling_rate = telemetry.sampling_rate,
                "OTLP trace export enabled"
            );
        }
        Err(e) => {
            subscriber.init();
            error!("OTLP exporter unavailable, logging to stdout only: {}", e);
        }
    }
}

/// Resource attributes attached to every exported span
pub fn service_resource(telemetry: &TelemetryConfig) -> Resource {
    Resource::builder()
        .with_service_name(telemetry.service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("deployment.environment", telemetry.environment.clone()),
        ])
        .build()
}

fn tracer_provider(
    telemetry: &TelemetryConfig,
) -> Result<SdkTracerProvider, Box<dyn std::error::Error>> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(telemetry.otlp_endpoint.clone())
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_resource(service_resource(telemetry))
        .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
            telemetry.sampling_rate,
        ))))
        .with_batch_exporter(exporter)
        .build())
}
