//! CLI entrypoint for Consilium
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use consilium_application::{
    ExportReportError, ExportReportInput, ExportReportUseCase, FetchResponsesUseCase,
    SessionController,
};
use consilium_domain::OutputFormat;
use consilium_infrastructure::{
    ConfigLoader, EnvCredentialResolver, FileConfig, FileReportSink, GeminiGateway, GeminiSettings,
};
use consilium_presentation::{ChatRepl, Cli, ConsoleFormatter, CyclePrinter, OutputConfig};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_NAME: &str = "consilium.log";

/// Install the subscriber; the returned guard must live until exit.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        );

    let Some(dir) = log_dir else {
        registry.init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, LOG_FILE_NAME));
    registry
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();

    Ok(Some(guard))
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    info!("Starting Consilium");

    let config = load_config(&cli)?;

    let output = OutputConfig {
        format: cli
            .output
            .map(OutputFormat::from)
            .unwrap_or(config.output.format),
        color: config.output.color,
        report_dir: cli
            .report_dir
            .clone()
            .unwrap_or_else(|| config.output.report_dir()),
    };
    output.apply_color();

    // === Dependency Injection ===
    let credentials = EnvCredentialResolver::from_env(&config.credential.env_vars);
    let gateway = Arc::new(GeminiGateway::new(GeminiSettings::from(&config.backend))?);
    let behavior = config.behavior.to_behavior_config();
    let fetcher = FetchResponsesUseCase::new(gateway, &credentials).with_behavior(behavior);
    let controller = Arc::new(SessionController::new(fetcher, behavior));
    let sink = Arc::new(FileReportSink::new(&output.report_dir));

    // Chat mode
    if cli.chat {
        let repl = ChatRepl::new(controller, sink)
            .with_progress(!cli.quiet && config.repl.show_progress)
            .with_format(output.format)
            .with_history_file(config.repl.history_file());

        repl.run().await?;
        return Ok(());
    }

    // Single query mode - query is required
    let Some(query) = cli.query.as_deref() else {
        bail!("Query is required. Use --chat for interactive mode.");
    };

    if output.format == OutputFormat::Full && !cli.quiet {
        println!("{}", ConsoleFormatter::header(controller.is_online()));
    }

    let printer = CyclePrinter::new(output.format, !cli.quiet);
    let Some(snapshot) = printer.run(&controller, query).await else {
        bail!("Query cannot be empty");
    };

    if cli.export {
        match ExportReportInput::from_agreed_snapshot(&snapshot) {
            Ok(input) => {
                let exported = ExportReportUseCase::new(sink).execute(input)?;
                eprintln!("Report saved: {}", exported.path.display());
            }
            Err(ExportReportError::NotAgreed) => {
                eprintln!("No report written: the council did not reach AGREEMENT");
            }
            Err(e) => return Err(e.into()),
        }
    }

    controller.shutdown();
    Ok(())
}
