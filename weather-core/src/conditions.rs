//! Turns a `/stations/{id}/observations/latest` body into the six display rows.

use chrono::DateTime;
use serde::Deserialize;
use tracing::warn;

use crate::{
    error::WeatherError,
    model::{ConditionsRow, ConditionsSnapshot},
    units::{celsius_to_fahrenheit, degrees_to_cardinal, kph_to_mph, round_display},
};

const DEG: char = '°';
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct NwsObservationResponse {
    properties: NwsObservationProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NwsObservationProperties {
    timestamp: Option<String>,
    temperature: Option<Measurement>,
    dewpoint: Option<Measurement>,
    relative_humidity: Option<Measurement>,
    wind_direction: Option<Measurement>,
    wind_speed: Option<Measurement>,
    wind_gust: Option<Measurement>,
}

/// `{ "unitCode": "...", "value": 12.3 }`; a missing or null object reads as a null value.
#[derive(Debug, Deserialize)]
struct Measurement {
    #[serde(default)]
    value: Option<f64>,
}

fn value_of(m: Option<Measurement>) -> Option<f64> {
    m.and_then(|m| m.value)
}

pub fn parse_observation(body: &str) -> Result<ConditionsSnapshot, WeatherError> {
    let parsed: NwsObservationResponse = serde_json::from_str(body).map_err(|e| {
        WeatherError::MalformedResponse(format!("expected properties in observation: {e}"))
    })?;
    let p = parsed.properties;

    let timestamp = p.timestamp.as_deref().and_then(|raw| {
        DateTime::parse_from_rfc3339(raw)
            .inspect_err(|e| warn!(raw, "Unparseable observation timestamp: {e}"))
            .ok()
    });

    Ok(ConditionsSnapshot {
        timestamp,
        temperature_c: value_of(p.temperature),
        dewpoint_c: value_of(p.dewpoint),
        relative_humidity: value_of(p.relative_humidity),
        wind_direction_deg: value_of(p.wind_direction),
        wind_speed_kph: value_of(p.wind_speed),
        wind_gust_kph: value_of(p.wind_gust),
    })
}

/// Rows in fixed order: Temperature, Dewpoint, Humidity, Wind Direction,
/// Wind Speed, Wind Gust.
pub fn conditions_rows(snapshot: &ConditionsSnapshot) -> Vec<ConditionsRow> {
    // A null direction is reported as calm.
    let direction = snapshot.wind_direction_deg.unwrap_or(0.0);

    let rows = [
        ("Temperature", fahrenheit(snapshot.temperature_c)),
        ("Dewpoint", fahrenheit(snapshot.dewpoint_c)),
        (
            "Humidity",
            snapshot
                .relative_humidity
                .map(|h| format!("{}%", round_display(h)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        (
            "Wind Direction",
            format!("{} ({}{DEG})", degrees_to_cardinal(direction), display_degrees(direction)),
        ),
        (
            "Wind Speed",
            match snapshot.wind_speed_kph {
                Some(kph) => format!("{} mph", round_display(kph_to_mph(kph))),
                None => "0 mph".to_string(),
            },
        ),
        (
            "Wind Gust",
            match snapshot.wind_gust_kph {
                Some(kph) if kph != 0.0 => round_display(kph_to_mph(kph)).to_string(),
                _ => "None".to_string(),
            },
        ),
    ];

    rows.into_iter().map(|(label, value)| ConditionsRow { label, value }).collect()
}

pub fn assemble_conditions(
    body: &str,
) -> Result<(ConditionsSnapshot, Vec<ConditionsRow>), WeatherError> {
    let snapshot = parse_observation(body)?;
    let rows = conditions_rows(&snapshot);
    Ok((snapshot, rows))
}

fn fahrenheit(celsius: Option<f64>) -> String {
    match celsius {
        Some(c) => format!("{}{DEG} F", round_display(celsius_to_fahrenheit(c))),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn display_degrees(deg: f64) -> String {
    if deg.fract() == 0.0 { format!("{deg:.0}") } else { deg.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(rows: &[ConditionsRow]) -> Vec<&str> {
        rows.iter().map(|r| r.value.as_str()).collect()
    }

    fn observation(props: serde_json::Value) -> String {
        json!({ "id": "https://api.weather.gov/stations/KSPI/observations/x", "properties": props })
            .to_string()
    }

    #[test]
    fn full_observation() {
        let body = observation(json!({
            "timestamp": "2024-06-01T17:53:00+00:00",
            "temperature": { "unitCode": "wmoUnit:degC", "value": 22.2 },
            "dewpoint": { "unitCode": "wmoUnit:degC", "value": 10.0 },
            "relativeHumidity": { "unitCode": "wmoUnit:percent", "value": 45.6 },
            "windDirection": { "unitCode": "wmoUnit:degree_(angle)", "value": 230 },
            "windSpeed": { "unitCode": "wmoUnit:km_h-1", "value": 18.36 },
            "windGust": { "unitCode": "wmoUnit:km_h-1", "value": 15.0 }
        }));

        let (snapshot, rows) = assemble_conditions(&body).unwrap();

        assert!(snapshot.timestamp.is_some());
        let labels: Vec<_> = rows.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            ["Temperature", "Dewpoint", "Humidity", "Wind Direction", "Wind Speed", "Wind Gust"]
        );
        assert_eq!(values(&rows), ["72° F", "50° F", "46%", "SW (230°)", "11 mph", "9"]);
    }

    #[test]
    fn null_policy() {
        let body = observation(json!({
            "temperature": { "value": null },
            "dewpoint": { "value": null },
            "relativeHumidity": { "value": null },
            "windDirection": { "value": null },
            "windSpeed": { "value": null },
            "windGust": { "value": 0 }
        }));

        let (_, rows) = assemble_conditions(&body).unwrap();
        assert_eq!(values(&rows), ["N/A", "N/A", "N/A", "N (0°)", "0 mph", "None"]);
    }

    #[test]
    fn missing_measurements_read_as_null() {
        let (_, rows) = assemble_conditions(&observation(json!({}))).unwrap();
        assert_eq!(values(&rows), ["N/A", "N/A", "N/A", "N (0°)", "0 mph", "None"]);
    }

    #[test]
    fn fractional_direction_keeps_fraction() {
        let snapshot = ConditionsSnapshot {
            wind_direction_deg: Some(92.5),
            ..Default::default()
        };
        assert_eq!(conditions_rows(&snapshot)[3].value, "E (92.5°)");
    }

    #[test]
    fn missing_properties_is_malformed() {
        let err = assemble_conditions(r#"{"type": "Feature"}"#).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }
}
