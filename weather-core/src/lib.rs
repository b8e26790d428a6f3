//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration and the read-only station registry
//! - The api.weather.gov client and its typed errors
//! - Assembly of forecast and observation JSON into display rows
//! - Plain-text table rendering and the per-invocation pipeline
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod conditions;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod pipeline;
pub mod present;
pub mod registry;
pub mod units;

pub use client::{ClientConfig, NwsClient, WeatherClient};
pub use config::{Config, StationConfig};
pub use error::{FetchError, WeatherError};
pub use model::{ConditionsRow, ConditionsSnapshot, ForecastPeriod, ReportKind};
pub use pipeline::{Outcome, Pipeline, PipelineOptions, Stage};
pub use registry::{GridPoint, StationRecord, StationRegistry};
