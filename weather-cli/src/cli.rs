use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, anyhow};
use clap::{Parser, ValueEnum};
use tracing::info;
use weather_core::{
    Config, NwsClient, Outcome, Pipeline, PipelineOptions, ReportKind, StationRegistry,
};

use crate::{logging, prompt};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Fetch weather forecast or current conditions for a location."
)]
pub struct Cli {
    /// Location to retrieve weather for (one of the configured station names).
    #[arg(short, long)]
    pub location: Option<String>,

    /// Type of weather information.
    #[arg(short = 't', long = "type", value_enum)]
    pub kind: Option<KindArg>,

    /// Config file; defaults to weather.toml in the platform config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Forecast,
    Current,
}

impl From<KindArg> for ReportKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Forecast => ReportKind::Forecast,
            KindArg::Current => ReportKind::Current,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load(self.config.as_deref())?;
        logging::init(&config)?;
        info!("weather {} starting", env!("CARGO_PKG_VERSION"));

        let registry = StationRegistry::load(&config.stations)
            .context("Invalid station configuration")?;

        let location = match self.location {
            Some(name) => validate_location(&registry, name)?,
            None => prompt::location(&registry)?,
        };
        let kind = match self.kind {
            Some(arg) => arg.into(),
            None => prompt::report_kind()?,
        };

        let client = NwsClient::new((&config).into())?;
        let pipeline = Pipeline::new(&registry, &client, PipelineOptions::from(&config));

        println!();
        let outcome = pipeline.run(&location, kind).await;
        let code = write_outcome(&outcome, &mut io::stdout().lock())?;

        Ok(ExitCode::from(code))
    }
}

/// Prints the table or the error message, then a blank line. Returns the exit status.
fn write_outcome(outcome: &Outcome, out: &mut impl Write) -> io::Result<u8> {
    match outcome {
        Outcome::Rendered(table) => writeln!(out, "{table}")?,
        Outcome::Failed { message, .. } => writeln!(out, "{message}")?,
    }
    writeln!(out)?;
    out.flush()?;

    Ok(if outcome.is_success() { 0 } else { 1 })
}

fn validate_location(registry: &StationRegistry, name: String) -> anyhow::Result<String> {
    if registry.resolve(&name).is_ok() {
        return Ok(name);
    }
    Err(anyhow!(
        "Unknown location '{name}'. Configured locations: {}.",
        registry.list().join(", ")
    ))
}
