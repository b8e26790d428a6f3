use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Deserializer};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// One `[[stations]]` entry as written in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub name: String,
    pub locale: String,

    /// Accepts `true`/`false` as well as the legacy strings `"True"`/`"False"`.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub default: bool,

    pub noaa_office: Option<String>,
    pub noaa_grid_x: Option<i64>,
    pub noaa_grid_y: Option<i64>,
    pub station_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    /// Log file path; falls back to the platform data directory.
    pub file: Option<PathBuf>,

    /// `tracing` filter directive, e.g. "info" or "weather_core=debug".
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Whether the forecast table gets a "Chance of Precip." column.
    #[serde(default = "default_true")]
    pub precipitation: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { precipitation: true }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Contact string sent in the User-Agent header, as api.weather.gov asks for.
    #[serde(default = "default_contact")]
    pub contact: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub stations: Vec<StationConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contact: default_contact(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            log: LogConfig::default(),
            display: DisplayConfig::default(),
            stations: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from `path`, or from the platform config directory when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_file_path()?,
        };

        if !path.exists() {
            return Err(anyhow!(
                "Config file not found: {}\n\
                 Hint: create it with at least one [[stations]] entry.",
                path.display()
            ));
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("weather.toml"))
    }

    /// Configured log file, or `weather.log` in the platform data directory.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.log.file {
            Some(file) => Ok(file.clone()),
            None => Ok(project_dirs()?.data_dir().join("weather.log")),
        }
    }

    pub fn user_agent(&self) -> String {
        format!("weather-cli/{}", self.contact)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-task", "weather-cli")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

fn default_contact() -> String {
    "unknown".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_true() -> bool {
    true
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.trim().eq_ignore_ascii_case("true"),
    })
}
