//! One invocation: resolve station, build URL, fetch, assemble, present.

use tracing::{debug, error, info};

use crate::{
    client::WeatherClient,
    conditions::assemble_conditions,
    config::{Config, DEFAULT_BASE_URL},
    error::WeatherError,
    forecast::assemble_forecast,
    model::ReportKind,
    present::{render_conditions, render_forecast},
    registry::{GridPoint, StationRecord, StationRegistry},
};

/// Where a run currently is. A failure in any of the first four stops the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SelectStation,
    BuildRequest,
    Fetch,
    Assemble,
    Present,
    Done,
}

#[derive(Debug)]
pub struct PipelineFailure {
    pub stage: Stage,
    /// Set once the request URL is known.
    pub url: Option<String>,
    pub error: WeatherError,
}

/// Result of [`Pipeline::run`]: either the table to print or the message to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered(String),
    Failed { stage: Stage, message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Rendered(_))
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub base_url: String,
    pub include_precipitation: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), include_precipitation: true }
    }
}

impl From<&Config> for PipelineOptions {
    fn from(cfg: &Config) -> Self {
        Self { base_url: cfg.base_url.clone(), include_precipitation: cfg.display.precipitation }
    }
}

pub fn forecast_url(base: &str, grid: &GridPoint) -> String {
    format!(
        "{}/gridpoints/{}/{},{}/forecast",
        base.trim_end_matches('/'),
        grid.office,
        grid.x,
        grid.y
    )
}

pub fn observation_url(base: &str, station_id: &str) -> String {
    format!("{}/stations/{}/observations/latest", base.trim_end_matches('/'), station_id)
}

#[derive(Debug)]
pub struct Pipeline<'a> {
    registry: &'a StationRegistry,
    client: &'a dyn WeatherClient,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        registry: &'a StationRegistry,
        client: &'a dyn WeatherClient,
        options: PipelineOptions,
    ) -> Self {
        Self { registry, client, options }
    }

    /// Runs to completion and never prints a partial table; failures are logged.
    pub async fn run(&self, station: &str, kind: ReportKind) -> Outcome {
        match self.execute(station, kind).await {
            Ok(table) => Outcome::Rendered(table),
            Err(PipelineFailure { stage, url, error }) => {
                let url = url.as_deref().unwrap_or("-");
                error!(station, report = %kind, ?stage, url, "{error}");
                Outcome::Failed { stage, message: format!("Error: {error}") }
            }
        }
    }

    pub async fn execute(
        &self,
        station: &str,
        kind: ReportKind,
    ) -> Result<String, PipelineFailure> {
        let record = self.registry.resolve(station).map_err(at(Stage::SelectStation, None))?;

        let url = self.build_url(record, kind).map_err(at(Stage::BuildRequest, None))?;

        info!(url = %url, "Fetching {kind} for: {}", record.locale);
        let body = self
            .client
            .fetch(&url)
            .await
            .map_err(|e| at(Stage::Fetch, Some(&url))(e.into()))?;

        debug!(stage = ?Stage::Assemble, bytes = body.len());
        let table = match kind {
            ReportKind::Forecast => {
                let periods = assemble_forecast(&body).map_err(at(Stage::Assemble, Some(&url)))?;
                if let Some(start) = periods.first().and_then(|p| p.start_time) {
                    info!(station, "Forecast starts at {start}");
                }
                debug!(stage = ?Stage::Present, periods = periods.len());
                render_forecast(&record.locale, &periods, self.options.include_precipitation)
            }
            ReportKind::Current => {
                let (snapshot, rows) =
                    assemble_conditions(&body).map_err(at(Stage::Assemble, Some(&url)))?;
                if let Some(ts) = snapshot.timestamp {
                    info!(station, "Observation taken at {ts}");
                }
                debug!(stage = ?Stage::Present, rows = rows.len());
                render_conditions(&record.locale, &rows)
            }
        };

        debug!(stage = ?Stage::Done, station);
        Ok(table)
    }

    fn build_url(&self, record: &StationRecord, kind: ReportKind) -> Result<String, WeatherError> {
        let base = &self.options.base_url;
        Ok(match kind {
            ReportKind::Forecast => forecast_url(base, record.grid()?),
            ReportKind::Current => observation_url(base, record.station_id()?),
        })
    }
}

fn at(stage: Stage, url: Option<&str>) -> impl Fn(WeatherError) -> PipelineFailure + '_ {
    move |error| PipelineFailure { stage, url: url.map(str::to_string), error }
}
