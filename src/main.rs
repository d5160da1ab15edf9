//! PredictCare: chronic disease risk assessment client
//!
//! Main entry point for the terminal application and its CLI.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use predictcare::adapters::sanitize::SanitizingMakeWriter;
use predictcare::adapters::HttpPredictionClient;
use predictcare::application::{present, probability_label, FormController, PredictionService};
use predictcare::config::{load_settings, LogMode, Settings};
use predictcare::tui::App;
use predictcare::Domain;

#[derive(Parser)]
#[command(name = "predictcare", version, about = "Risk assessment for CHD, stroke and diabetes")]
struct Cli {
    /// Configuration file (defaults to ./predictcare.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal UI (default)
    Tui,

    /// Run one assessment against the prediction service
    Predict {
        /// chd, stroke or diabetes
        domain: Domain,

        /// Override a parameter, e.g. `--set sysBP=140`
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },

    /// List a model's parameters with their ranges and defaults
    Fields { domain: Domain },

    /// Probe the prediction service
    Health,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref()).context("loading configuration")?;
    let command = cli.command.unwrap_or(Command::Tui);

    let _guard = init_logging(&settings, matches!(command, Command::Tui))?;

    match command {
        Command::Tui => {
            tracing::info!("Starting PredictCare...");
            let mut app = App::new(&settings)?;
            app.run()?;
            tracing::info!("PredictCare shutdown complete.");
        }
        Command::Predict {
            domain,
            overrides,
            json,
        } => predict(&settings, domain, &overrides, json)?,
        Command::Fields { domain } => print_fields(domain),
        Command::Health => health(&settings)?,
    }

    Ok(())
}

/// Writing logs to the terminal corrupts the TUI's alternate screen, so in
/// `auto` mode the TUI logs to a file. CLI subcommands keep stdout for their
/// output and log to stderr.
fn init_logging(settings: &Settings, tui: bool) -> Result<WorkerGuard> {
    let use_file = match settings.logging.mode {
        LogMode::File => true,
        LogMode::Stdout => false,
        LogMode::Auto => tui && std::io::stdout().is_terminal(),
    };

    let (writer, guard) = if use_file {
        let log_file = &settings.logging.file;
        if let Some(parent) = log_file.parent() {
            // Best-effort: the open below reports the real problem.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("opening log file {}", log_file.display()))?;
        tracing_appender::non_blocking(file)
    } else if tui {
        tracing_appender::non_blocking(std::io::stdout())
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    let default_level = if tui { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    Ok(guard)
}

fn prediction_service(settings: &Settings) -> Result<PredictionService<HttpPredictionClient>> {
    let client = HttpPredictionClient::new(&settings.backend.base_url, settings.backend.timeout())?;
    Ok(PredictionService::new(Arc::new(client)))
}

fn predict(settings: &Settings, domain: Domain, overrides: &[String], json: bool) -> Result<()> {
    let mut form = FormController::new(domain);
    for pair in overrides {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("expected KEY=VALUE, got '{pair}'"))?;
        form.set(key.trim(), value.trim())?;
    }

    let service = prediction_service(settings)?;
    let assessment = service.assess(form.request())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    let view = present(assessment.domain, assessment.tier);
    println!("{} {}", view.icon, view.title);
    println!();
    println!("  {}", view.headline);
    println!("  {}", probability_label(assessment.probability));
    println!();
    println!("{}", view.explanation);
    Ok(())
}

fn print_fields(domain: Domain) {
    let form = FormController::new(domain);
    println!("{} ({} parameters)", domain.title(), form.fields().len());
    for spec in form.fields() {
        let default = form.display_value(spec.key).unwrap_or_default();
        println!("  {:<20} {:<28} {:<20} default: {}", spec.key, spec.label, spec.hint, default);
    }
}

fn health(settings: &Settings) -> Result<()> {
    let service = prediction_service(settings)?;
    match service.health() {
        Ok(health) => {
            println!("{}: {}", settings.backend.base_url, health.status);
            if let Some(message) = health.message {
                println!("{message}");
            }
            Ok(())
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("backend at {} is unreachable", settings.backend.base_url))),
    }
}
