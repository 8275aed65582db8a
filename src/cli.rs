use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/*
 * ============================================================================
 * Cli
 * ============================================================================
 */
#[allow(clippy::module_name_repetitions)]
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommands,

    /// Base endpoint of the OTLP collector.
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", global = true)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_LOGS_ENDPOINT", global = true)]
    pub otel_exporter_otlp_logs_endpoint: Option<String>,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_METRICS_ENDPOINT", global = true)]
    pub otel_exporter_otlp_metrics_endpoint: Option<String>,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_TRACES_ENDPOINT", global = true)]
    pub otel_exporter_otlp_traces_endpoint: Option<String>,

    /// Transport protocol of the OTLP exporters.
    #[arg(long, env = "OTEL_EXPORTER_OTLP_PROTOCOL", value_enum, global = true)]
    pub otel_exporter_otlp_protocol: Option<CliArgsOtelExporterProtocol>,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_LOGS_PROTOCOL", value_enum, global = true)]
    pub otel_exporter_otlp_logs_protocol: Option<CliArgsOtelExporterProtocol>,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_METRICS_PROTOCOL", value_enum, global = true)]
    pub otel_exporter_otlp_metrics_protocol: Option<CliArgsOtelExporterProtocol>,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_TRACES_PROTOCOL", value_enum, global = true)]
    pub otel_exporter_otlp_traces_protocol: Option<CliArgsOtelExporterProtocol>,

    /// Export timeout of the OTLP exporters in milliseconds.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_TIMEOUT",
        default_value_t = 10_000,
        global = true
    )]
    pub otel_exporter_otlp_timeout: u64,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_LOGS_TIMEOUT", global = true)]
    pub otel_exporter_otlp_logs_timeout: Option<u64>,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_METRICS_TIMEOUT", global = true)]
    pub otel_exporter_otlp_metrics_timeout: Option<u64>,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_TRACES_TIMEOUT", global = true)]
    pub otel_exporter_otlp_traces_timeout: Option<u64>,

    /// Log exporters, comma separated.
    #[arg(
        long,
        env = "OTEL_LOGS_EXPORTER",
        value_enum,
        value_delimiter = ',',
        global = true
    )]
    pub otel_logs_exporter: Option<Vec<CliArgsOtelExporter>>,

    /// Metric exporters, comma separated.
    #[arg(
        long,
        env = "OTEL_METRICS_EXPORTER",
        value_enum,
        value_delimiter = ',',
        global = true
    )]
    pub otel_metrics_exporter: Option<Vec<CliArgsOtelExporter>>,

    /// Trace exporters, comma separated.
    #[arg(
        long,
        env = "OTEL_TRACES_EXPORTER",
        value_enum,
        value_delimiter = ',',
        global = true
    )]
    pub otel_traces_exporter: Option<Vec<CliArgsOtelExporter>>,

    #[arg(
        long,
        env = "OTEL_SERVICE_NAME",
        default_value = "manila-operator",
        global = true
    )]
    pub otel_service_name: String,
}

#[must_use]
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[allow(clippy::module_name_repetitions)]
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliArgsOtelExporter {
    Console,
    Otlp,
}

#[allow(clippy::module_name_repetitions)]
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliArgsOtelExporterProtocol {
    #[value(name = "grpc")]
    Grpc,

    #[value(name = "http/protobuf")]
    HttpProtobuf,

    #[value(name = "http/json")]
    HttpJson,
}

#[allow(clippy::module_name_repetitions)]
#[derive(Subcommand, Debug)]
pub enum CliCommands {
    /// Controller
    Controller(ControllerArgs),

    /// Custom Resource Definition
    Crd(CrdArgs),
}

/*
 * ============================================================================
 * Controller
 * ============================================================================
 */
#[derive(Args, Debug)]
pub struct ControllerArgs {
    #[command(subcommand)]
    pub command: ControllerCommands,
}

#[derive(Subcommand, Debug)]
pub enum ControllerCommands {
    /// Run
    Run(ControllerRunArgs),
}

#[derive(Args, Debug)]
pub struct ControllerRunArgs {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Pull policy of the manila scheduler image.
    #[arg(long, default_value = "IfNotPresent")]
    pub image_pull_policy: String,
}

/*
 * ============================================================================
 * Custom Resource Definition
 * ============================================================================
 */
#[derive(Args, Debug)]
pub struct CrdArgs {
    #[command(subcommand)]
    pub command: CrdCommands,
}

#[derive(Subcommand, Debug)]
pub enum CrdCommands {
    /// Generate
    Generate(CrdGenerateArgs),
}

#[derive(Args, Debug)]
pub struct CrdGenerateArgs {
    #[arg(long, value_enum, default_value_t = CrdGenerateArgsFormat::Yaml)]
    pub format: CrdGenerateArgsFormat,

    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrdGenerateArgsFormat {
    Json,
    Yaml,
}
