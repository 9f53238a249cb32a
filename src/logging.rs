use color_eyre::Result;
use color_eyre::eyre::Context;
use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Keeps the OTLP exporter alive; flushes pending spans when dropped.
pub struct TracingGuard {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("Failed to shut down tracer provider: {e}");
            }
        }
    }
}

/// Install the global subscriber. `log` records are forwarded into it as events.
pub fn init_tracing(
    service_name: &str,
    otlp_endpoint: Option<&str>,
    tracing_level: &str,
) -> Result<TracingGuard> {
    let filter_layer =
        EnvFilter::try_new(tracing_level).wrap_err("Failed to create tracing filter")?;
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    let Some(otlp_endpoint) = otlp_endpoint else {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init()
            .wrap_err("Failed to install tracing subscriber")?;
        return Ok(TracingGuard {
            tracer_provider: None,
        });
    };

    let resource = Resource::builder()
        .with_attributes(vec![KeyValue::new(
            opentelemetry_semantic_conventions::resource::SERVICE_NAME,
            service_name.to_string(),
        )])
        .build();

    let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_endpoint)
        .build()
        .wrap_err("Failed to create OTLP span exporter")?;

    let tracer_provider = SdkTracerProvider::builder()
        .with_batch_exporter(otlp_exporter)
        .with_resource(resource)
        .build();

    opentelemetry::global::set_tracer_provider(tracer_provider.clone());
    let tracer = tracer_provider.tracer("streamflix");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .try_init()
        .wrap_err("Failed to install tracing subscriber")?;

    Ok(TracingGuard {
        tracer_provider: Some(tracer_provider),
    })
}
