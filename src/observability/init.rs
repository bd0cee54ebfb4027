//! Subscriber setup.

use super::export::file_tracer_provider;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "MachineTracker";
const TRACE_FILE: &str = "machine-tracker-otlp.json";

/// Routes `tracing` spans into the rotating trace file.
///
/// The level comes from `config.trace_level` as an [`EnvFilter`] directive.
/// Tracing is best effort: when the data directory cannot be created the
/// plugin runs without it.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("tracing disabled, cannot create {}: {e}", data_dir.display());
        return;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|e| {
        eprintln!("invalid trace_level {:?}: {e}; using info", config.trace_level);
        EnvFilter::new("info")
    });

    let provider = file_tracer_provider(data_dir.join(TRACE_FILE), SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
