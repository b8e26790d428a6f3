use chrono::{DateTime, FixedOffset};

/// Which report the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportKind {
    Forecast,
    #[default]
    Current,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Forecast => "forecast",
            ReportKind::Current => "current",
        }
    }

    pub const fn all() -> &'static [ReportKind] {
        &[ReportKind::Forecast, ReportKind::Current]
    }

    /// Human label used by the interactive prompt.
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Forecast => "Forecast",
            ReportKind::Current => "Current conditions",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ReportKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "forecast" => Ok(ReportKind::Forecast),
            "current" => Ok(ReportKind::Current),
            _ => Err(anyhow::anyhow!(
                "Unknown report type '{value}'. Supported types: forecast, current."
            )),
        }
    }
}

/// One day or night of a gridpoint forecast, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPeriod {
    pub name: String,
    pub start_time: Option<DateTime<FixedOffset>>,
    /// e.g. "72F"
    pub temperature: String,
    /// e.g. "10 to 15 mph SW"
    pub wind: String,
    pub short_forecast: String,
    /// e.g. "40%", "0%" when the source has no value
    pub precipitation: String,
}

/// Latest station observation in source units (Celsius, km/h, degrees).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionsSnapshot {
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub temperature_c: Option<f64>,
    pub dewpoint_c: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub wind_speed_kph: Option<f64>,
    pub wind_gust_kph: Option<f64>,
}

/// Label/value pair of the current-conditions table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionsRow {
    pub label: &'static str,
    pub value: String,
}
