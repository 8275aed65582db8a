use std::time::Duration;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::{
    logs::SdkLoggerProvider, metrics::SdkMeterProvider, trace::SdkTracerProvider,
};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{
    EnvFilter, Layer as _, filter::Directive, layer::SubscriberExt as _,
    util::SubscriberInitExt as _,
};

use crate::cli::{CliArgs, CliArgsOtelExporter, CliArgsOtelExporterProtocol};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub struct Provider {
    logger: SdkLoggerProvider,
    meter: SdkMeterProvider,
    service_name: String,
    tracer: SdkTracerProvider,
}

impl Provider {
    /// # Errors
    ///
    /// Will return `Err` if an OTLP exporter is requested without an endpoint
    /// or protocol, or if an exporter could not be built.
    pub fn new(cli: &CliArgs) -> Result<Self, BoxError> {
        Ok(Self {
            logger: logger_provider(cli)?,
            meter: meter_provider(cli)?,
            service_name: cli.otel_service_name.clone(),
            tracer: tracer_provider(cli)?,
        })
    }

    #[must_use]
    pub fn meter(&self) -> &SdkMeterProvider {
        &self.meter
    }

    pub fn init_tracing_subscriber(&self) {
        let logger_layer =
            OpenTelemetryTracingBridge::new(&self.logger).with_filter(external_component_filter());

        let tracer_layer = OpenTelemetryLayer::new(self.tracer.tracer(self.service_name.clone()))
            .with_filter(external_component_filter());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_thread_names(true)
            .with_filter(EnvFilter::from_default_env());

        tracing_subscriber::registry()
            .with(logger_layer)
            .with(tracer_layer)
            .with(fmt_layer)
            .init();
    }

    /// # Errors
    ///
    /// Will return `Err` if open telemetry providers could not shutdown.
    pub fn shutdown(&self) -> Result<(), BoxError> {
        let shutdown_errors: Vec<_> = [
            ("tracer", self.tracer.shutdown()),
            ("meter", self.meter.shutdown()),
            ("logger", self.logger.shutdown()),
        ]
        .into_iter()
        .filter_map(|(provider, result)| {
            result
                .err()
                .map(|error| format!("{provider} provider: {error}"))
        })
        .collect();

        if shutdown_errors.is_empty() {
            Ok(())
        } else {
            Err(format!("failed to shutdown providers: {}", shutdown_errors.join(", ")).into())
        }
    }
}

/// Drops events from the transport crates used by the OTLP exporters.
fn external_component_filter() -> EnvFilter {
    ["hyper=off", "tonic=off", "h2=off", "reqwest=off"]
        .into_iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(EnvFilter::from_default_env(), EnvFilter::add_directive)
}

fn resource(cli: &CliArgs) -> opentelemetry_sdk::Resource {
    opentelemetry_sdk::Resource::builder()
        .with_service_name(cli.otel_service_name.clone())
        .build()
}

impl From<CliArgsOtelExporterProtocol> for Protocol {
    fn from(value: CliArgsOtelExporterProtocol) -> Self {
        match value {
            CliArgsOtelExporterProtocol::Grpc => Protocol::Grpc,
            CliArgsOtelExporterProtocol::HttpProtobuf => Protocol::HttpBinary,
            CliArgsOtelExporterProtocol::HttpJson => Protocol::HttpJson,
        }
    }
}

/*
 * ============================================================================
 * Signals
 * ============================================================================
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Logs,
    Metrics,
    Traces,
}

impl Signal {
    fn path(self) -> &'static str {
        match self {
            Signal::Logs => "logs",
            Signal::Metrics => "metrics",
            Signal::Traces => "traces",
        }
    }

    fn exporters(self, cli: &CliArgs) -> &[CliArgsOtelExporter] {
        match self {
            Signal::Logs => cli.otel_logs_exporter.as_deref(),
            Signal::Metrics => cli.otel_metrics_exporter.as_deref(),
            Signal::Traces => cli.otel_traces_exporter.as_deref(),
        }
        .unwrap_or_default()
    }

    fn endpoint(self, cli: &CliArgs) -> Option<&String> {
        match self {
            Signal::Logs => cli.otel_exporter_otlp_logs_endpoint.as_ref(),
            Signal::Metrics => cli.otel_exporter_otlp_metrics_endpoint.as_ref(),
            Signal::Traces => cli.otel_exporter_otlp_traces_endpoint.as_ref(),
        }
    }

    fn protocol(self, cli: &CliArgs) -> Option<CliArgsOtelExporterProtocol> {
        match self {
            Signal::Logs => cli.otel_exporter_otlp_logs_protocol,
            Signal::Metrics => cli.otel_exporter_otlp_metrics_protocol,
            Signal::Traces => cli.otel_exporter_otlp_traces_protocol,
        }
    }

    fn timeout(self, cli: &CliArgs) -> Option<u64> {
        match self {
            Signal::Logs => cli.otel_exporter_otlp_logs_timeout,
            Signal::Metrics => cli.otel_exporter_otlp_metrics_timeout,
            Signal::Traces => cli.otel_exporter_otlp_traces_timeout,
        }
    }
}

/// Resolved settings of an OTLP exporter for one signal.
#[derive(Debug, PartialEq)]
struct OtlpConfig {
    endpoint: String,
    protocol: Protocol,
    timeout: Duration,
}

impl OtlpConfig {
    /// Signal specific settings take precedence over the shared ones.
    ///
    /// A shared endpoint is suffixed with `/v1/<signal>` for HTTP protocols.
    fn resolve(cli: &CliArgs, signal: Signal) -> Result<Self, BoxError> {
        let signal_name = signal.path().to_uppercase();

        let protocol: Protocol = signal
            .protocol(cli)
            .or(cli.otel_exporter_otlp_protocol)
            .ok_or_else(|| {
                format!(
                    "OTEL_EXPORTER_OTLP_{signal_name}_PROTOCOL or OTEL_EXPORTER_OTLP_PROTOCOL must be set"
                )
            })?
            .into();

        let endpoint = match (signal.endpoint(cli), &cli.otel_exporter_otlp_endpoint) {
            (Some(endpoint), _) => endpoint.clone(),
            (None, Some(endpoint)) => match protocol {
                Protocol::Grpc => endpoint.clone(),
                Protocol::HttpBinary | Protocol::HttpJson => {
                    format!("{}/v1/{}", endpoint.trim_end_matches('/'), signal.path())
                }
            },
            (None, None) => {
                return Err(format!(
                    "OTEL_EXPORTER_OTLP_{signal_name}_ENDPOINT or OTEL_EXPORTER_OTLP_ENDPOINT must be set"
                )
                .into());
            }
        };

        let timeout = Duration::from_millis(
            signal
                .timeout(cli)
                .unwrap_or(cli.otel_exporter_otlp_timeout),
        );

        Ok(Self {
            endpoint,
            protocol,
            timeout,
        })
    }
}

/*
 * ============================================================================
 * Providers
 * ============================================================================
 */
fn logger_provider(cli: &CliArgs) -> Result<SdkLoggerProvider, BoxError> {
    let mut provider_builder = SdkLoggerProvider::builder().with_resource(resource(cli));
    let exporters = Signal::Logs.exporters(cli);

    if exporters.contains(&CliArgsOtelExporter::Console) {
        provider_builder =
            provider_builder.with_simple_exporter(opentelemetry_stdout::LogExporter::default());
    }

    if exporters.contains(&CliArgsOtelExporter::Otlp) {
        let config = OtlpConfig::resolve(cli, Signal::Logs)?;
        let exporter = match config.protocol {
            Protocol::Grpc => opentelemetry_otlp::LogExporter::builder()
                .with_tonic()
                .with_endpoint(config.endpoint)
                .with_protocol(config.protocol)
                .with_timeout(config.timeout)
                .build()?,
            Protocol::HttpBinary | Protocol::HttpJson => {
                opentelemetry_otlp::LogExporter::builder()
                    .with_http()
                    .with_endpoint(config.endpoint)
                    .with_protocol(config.protocol)
                    .with_timeout(config.timeout)
                    .build()?
            }
        };
        provider_builder = provider_builder.with_batch_exporter(exporter);
    }

    Ok(provider_builder.build())
}

fn meter_provider(cli: &CliArgs) -> Result<SdkMeterProvider, BoxError> {
    let mut provider_builder = SdkMeterProvider::builder().with_resource(resource(cli));
    let exporters = Signal::Metrics.exporters(cli);

    if exporters.contains(&CliArgsOtelExporter::Console) {
        provider_builder = provider_builder.with_periodic_exporter(
            opentelemetry_stdout::MetricExporterBuilder::default().build(),
        );
    }

    if exporters.contains(&CliArgsOtelExporter::Otlp) {
        let config = OtlpConfig::resolve(cli, Signal::Metrics)?;
        let exporter = match config.protocol {
            Protocol::Grpc => opentelemetry_otlp::MetricExporter::builder()
                .with_tonic()
                .with_endpoint(config.endpoint)
                .with_protocol(config.protocol)
                .with_timeout(config.timeout)
                .build()?,
            Protocol::HttpBinary | Protocol::HttpJson => {
                opentelemetry_otlp::MetricExporter::builder()
                    .with_http()
                    .with_endpoint(config.endpoint)
                    .with_protocol(config.protocol)
                    .with_timeout(config.timeout)
                    .build()?
            }
        };
        provider_builder = provider_builder.with_periodic_exporter(exporter);
    }

    Ok(provider_builder.build())
}

fn tracer_provider(cli: &CliArgs) -> Result<SdkTracerProvider, BoxError> {
    let mut provider_builder = SdkTracerProvider::builder().with_resource(resource(cli));
    let exporters = Signal::Traces.exporters(cli);

    if exporters.contains(&CliArgsOtelExporter::Console) {
        provider_builder =
            provider_builder.with_simple_exporter(opentelemetry_stdout::SpanExporter::default());
    }

    if exporters.contains(&CliArgsOtelExporter::Otlp) {
        let config = OtlpConfig::resolve(cli, Signal::Traces)?;
        let exporter = match config.protocol {
            Protocol::Grpc => opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(config.endpoint)
                .with_protocol(config.protocol)
                .with_timeout(config.timeout)
                .build()?,
            Protocol::HttpBinary | Protocol::HttpJson => {
                opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .with_endpoint(config.endpoint)
                    .with_protocol(config.protocol)
                    .with_timeout(config.timeout)
                    .build()?
            }
        };
        provider_builder = provider_builder.with_batch_exporter(exporter);
    }

    Ok(provider_builder.build())
}
