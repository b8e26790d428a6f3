//! Turns a `/gridpoints/{office}/{x},{y}/forecast` body into display rows.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::{error::WeatherError, model::ForecastPeriod, units::round_display};

#[derive(Debug, Deserialize)]
struct NwsForecastResponse {
    properties: NwsForecastProperties,
}

#[derive(Debug, Deserialize)]
struct NwsForecastProperties {
    periods: Vec<NwsPeriod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NwsPeriod {
    name: String,
    start_time: Option<String>,
    temperature: Option<Value>,
    #[serde(default)]
    temperature_unit: String,
    #[serde(default)]
    wind_speed: String,
    #[serde(default)]
    wind_direction: String,
    #[serde(default)]
    short_forecast: String,
    #[serde(default)]
    probability_of_precipitation: Option<NwsQuantity>,
}

#[derive(Debug, Deserialize)]
struct NwsQuantity {
    value: Option<f64>,
}

/// Parse the forecast body, keeping source (chronological) order.
pub fn assemble_forecast(body: &str) -> Result<Vec<ForecastPeriod>, WeatherError> {
    let parsed: NwsForecastResponse = serde_json::from_str(body).map_err(|e| {
        WeatherError::MalformedResponse(format!("expected properties.periods in forecast: {e}"))
    })?;

    Ok(parsed.properties.periods.into_iter().map(into_period).collect())
}

fn into_period(p: NwsPeriod) -> ForecastPeriod {
    let start_time = p.start_time.as_deref().and_then(|s| parse_time(&p.name, s));

    let precipitation = match p.probability_of_precipitation.and_then(|q| q.value) {
        Some(value) => format!("{}%", round_display(value)),
        None => "0%".to_string(),
    };

    ForecastPeriod {
        temperature: match display_number(p.temperature.as_ref()) {
            Some(t) => format!("{t}{}", p.temperature_unit),
            None => "N/A".to_string(),
        },
        wind: format!("{} {}", p.wind_speed, p.wind_direction),
        name: p.name,
        start_time,
        short_forecast: p.short_forecast,
        precipitation,
    }
}

fn parse_time(period: &str, raw: &str) -> Option<DateTime<FixedOffset>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt),
        Err(e) => {
            warn!(period, raw, "Unparseable forecast startTime: {e}");
            None
        }
    }
}

// Temperatures arrive as integers, but some offices send floats or null.
fn display_number(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i.to_string()),
            None => n.as_f64().map(|f| round_display(f).to_string()),
        },
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
