use super::exporter::file_tracer_provider;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Installs the global tracing subscriber.
///
/// Only the first call in a process takes effect. A trace file whose parent
/// directory cannot be created disables span export but keeps stderr output.
pub fn init_tracing(config: &Config) {
    let otel_layer = config.trace_file.as_deref().and_then(|file| {
        let path = PathBuf::from(file);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("repolens: span export disabled, cannot create {}: {e}", parent.display());
                return None;
            }
        }

        let resource = Resource::new(vec![
            KeyValue::new("service.name", "repolens"),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]);
        let provider = file_tracer_provider(path, resource);
        Some(OpenTelemetryLayer::new(provider.tracer("repolens")))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
