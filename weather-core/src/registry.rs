//! Read-only registry of the stations a user can pick from.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::{config::StationConfig, error::WeatherError};

/// NWS gridpoint used by the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPoint {
    pub office: String,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    pub name: String,
    pub locale: String,
    pub is_default: bool,
    grid: Option<GridPoint>,
    station_id: Option<String>,
}

impl StationRecord {
    /// Gridpoint for forecasts, or a config error if this station has none.
    pub fn grid(&self) -> Result<&GridPoint, WeatherError> {
        self.grid.as_ref().ok_or_else(|| {
            WeatherError::Config(format!(
                "station '{}' has no noaa_office/noaa_grid_x/noaa_grid_y; forecasts are unavailable",
                self.name
            ))
        })
    }

    /// Observation station id, or a config error if this station has none.
    pub fn station_id(&self) -> Result<&str, WeatherError> {
        self.station_id.as_deref().ok_or_else(|| {
            WeatherError::Config(format!(
                "station '{}' has no station_id; current conditions are unavailable",
                self.name
            ))
        })
    }

    fn from_config(cfg: &StationConfig) -> Result<Self, WeatherError> {
        let grid = match (&cfg.noaa_office, cfg.noaa_grid_x, cfg.noaa_grid_y) {
            (Some(office), Some(x), Some(y)) => Some(GridPoint { office: office.clone(), x, y }),
            (None, None, None) => None,
            _ => {
                return Err(WeatherError::Config(format!(
                    "station '{}' must set all of noaa_office, noaa_grid_x and noaa_grid_y",
                    cfg.name
                )));
            }
        };

        let station_id = cfg.station_id.clone().filter(|id| !id.trim().is_empty());

        if grid.is_none() && station_id.is_none() {
            return Err(WeatherError::Config(format!(
                "station '{}' needs a gridpoint or a station_id",
                cfg.name
            )));
        }

        Ok(Self {
            name: cfg.name.clone(),
            locale: cfg.locale.clone(),
            is_default: cfg.default,
            grid,
            station_id,
        })
    }
}

#[derive(Debug, Clone)]
pub struct StationRegistry {
    stations: Vec<StationRecord>,
    by_name: HashMap<String, usize>,
    default_name: String,
}

impl StationRegistry {
    /// Validate the configured stations and build the lookup index.
    ///
    /// The default is the first station flagged `default`; if none is flagged
    /// the first station in declaration order is used.
    pub fn load(configs: &[StationConfig]) -> Result<Self, WeatherError> {
        if configs.is_empty() {
            return Err(WeatherError::Config("no stations configured".to_string()));
        }

        let mut stations = Vec::with_capacity(configs.len());
        let mut by_name = HashMap::with_capacity(configs.len());

        for cfg in configs {
            let record = StationRecord::from_config(cfg)?;
            if by_name.insert(record.name.clone(), stations.len()).is_some() {
                return Err(WeatherError::Config(format!(
                    "station name '{}' is declared more than once",
                    record.name
                )));
            }
            stations.push(record);
        }

        let flagged: Vec<&str> =
            stations.iter().filter(|s| s.is_default).map(|s| s.name.as_str()).collect();

        let default_name = match flagged.as_slice() {
            [] => stations[0].name.clone(),
            [only] => only.to_string(),
            [first, rest @ ..] => {
                warn!(default = %first, ignored = ?rest, "Multiple stations marked default");
                first.to_string()
            }
        };

        info!("Default station: {default_name}");

        Ok(Self { stations, by_name, default_name })
    }

    /// Station names in declaration order.
    pub fn list(&self) -> Vec<&str> {
        self.stations.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn resolve(&self, name: &str) -> Result<&StationRecord, WeatherError> {
        self.by_name
            .get(name)
            .map(|&idx| &self.stations[idx])
            .ok_or_else(|| WeatherError::NotFound(name.to_string()))
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Position of the default station within [`Self::list`].
    pub fn default_index(&self) -> usize {
        self.by_name.get(&self.default_name).copied().unwrap_or(0)
    }
}
