use std::{fs::File, io::Write, net::SocketAddr};

use kube::Client;
use manila_operator::{
    cli::{
        CliArgs, CliCommands, ControllerArgs, ControllerCommands, ControllerRunArgs, CrdArgs,
        CrdCommands, CrdGenerateArgs, CrdGenerateArgsFormat, parse,
    },
    http_server,
    manila_scheduler::{self, generate_custom_resource_definition},
    metrics::Metrics,
    otel::Provider,
};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = &parse();

    let provider = Provider::new(cli)?;
    provider.init_tracing_subscriber();

    let metrics = Metrics::new(provider.meter());

    let result = match &cli.command {
        CliCommands::Controller(controller) => match &controller.command {
            ControllerCommands::Run(run) => controller_run(cli, controller, run, metrics).await,
        },
        CliCommands::Crd(crd) => match &crd.command {
            CrdCommands::Generate(generate) => crd_generate(cli, crd, generate),
        },
    };

    if let Err(error) = &result {
        tracing::error!(error =% error, "failed");
    }

    provider.shutdown()?;

    result
}

async fn controller_run(
    _cli: &CliArgs,
    _controller: &ControllerArgs,
    run: &ControllerRunArgs,
    metrics: Metrics,
) -> Result<(), BoxError> {
    let addr: SocketAddr = format!("{}:{}", run.host, run.port).parse()?;

    let client = Client::try_default().await?;

    let http_server = http_server::run(addr);
    let controller = manila_scheduler::run_controller(
        client,
        manila_scheduler::Config {
            image_pull_policy: run.image_pull_policy.clone(),
        },
        metrics,
    );

    tokio::select! {
        result = http_server => result?,
        () = controller => {},
    }

    Ok(())
}

fn crd_generate(
    _cli: &CliArgs,
    _crd: &CrdArgs,
    generate: &CrdGenerateArgs,
) -> Result<(), BoxError> {
    let crd = generate_custom_resource_definition();

    let (content, extension) = match generate.format {
        CrdGenerateArgsFormat::Json => (serde_json::to_string_pretty(&crd)?, "json"),
        CrdGenerateArgsFormat::Yaml => (serde_yaml::to_string(&crd)?, "yaml"),
    };

    if let Some(output) = &generate.output {
        File::create(output.join(format!("manilascheduler.{extension}")))?
            .write_all(content.as_bytes())?;
    } else {
        print!("{content}");
    }

    Ok(())
}
